use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = irid_app::AppConfig::load_or_default(Path::new("irid.toml"));
    irid_app::logging::init(config.log_filter())?;
    log::info!("starting {} ({}x{})", config.title, config.width, config.height);
    irid_app::run(config)
}
