//! `irid_app` — the desktop application shell.
//!
//! Owns the window, the surface, logging and configuration; everything
//! rendered lives in `irid_renderer::Scene`.

pub mod config;
pub mod graphics;
pub mod logging;
pub mod runner;

pub use config::AppConfig;
pub use runner::run;
