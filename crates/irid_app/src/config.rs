/// Application configuration, loaded from a TOML file next to the binary.
///
/// Every field has a default so an absent or partial file still yields a
/// runnable configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use irid_renderer::ShaderProfile;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// OBJ model to load into the scene.
    pub model_path: PathBuf,
    /// Directory holding the six skybox face images
    /// (`posx/negx/posy/negy/posz/negz.png`).
    pub skybox_dir: PathBuf,
    /// When set, WGSL is read from this directory instead of the copies
    /// embedded in the binary, so shaders can be iterated without a rebuild.
    pub shader_dir: Option<PathBuf>,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Irid".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            model_path: PathBuf::from("assets/models/scene.obj"),
            skybox_dir: PathBuf::from("assets/skybox"),
            shader_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Loads `path`, falling back to defaults when the file is absent or
    /// unparseable.  A parse failure is logged; a missing file is not.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config `{}` ignored: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Cube face images in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn skybox_paths(&self) -> [PathBuf; 6] {
        ["posx", "negx", "posy", "negy", "posz", "negz"]
            .map(|face| self.skybox_dir.join(format!("{face}.png")))
    }

    pub fn shader_profile(&self) -> ShaderProfile {
        match &self.shader_dir {
            Some(dir) => ShaderProfile::Dir(dir.clone()),
            None => ShaderProfile::Embedded,
        }
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        match self.log_level.as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config: AppConfig = toml::from_str("width = 640\nlog_level = \"debug\"").unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 720);
        assert_eq!(config.title, "Irid");
        assert_eq!(config.log_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn skybox_faces_are_ordered_px_nx_py_ny_pz_nz() {
        let config = AppConfig::default();
        let paths = config.skybox_paths();
        assert!(paths[0].ends_with("posx.png"));
        assert!(paths[1].ends_with("negx.png"));
        assert!(paths[4].ends_with("posz.png"));
        assert!(paths[5].ends_with("negz.png"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "verbose".into(),
            ..Default::default()
        };
        assert_eq!(config.log_filter(), log::LevelFilter::Info);
    }
}
