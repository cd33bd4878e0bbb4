/// Logger setup.  One stdout dispatch with seconds-since-start timestamps;
/// the chatty wgpu internals are capped at warn.
pub fn init(level: log::LevelFilter) -> Result<(), fern::InitError> {
    let start = std::time::Instant::now();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{:>9.3} {:<5} {}] {}",
                start.elapsed().as_secs_f32(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("wgpu_core", log::LevelFilter::Warn)
        .level_for("wgpu_hal", log::LevelFilter::Warn)
        .level_for("naga", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
