//! `irid_core` — platform-independent primitives shared by the renderer and
//! the application shell.
//!
//! | Module    | Responsibility                                      |
//! |-----------|-----------------------------------------------------|
//! | `camera`  | Free fly camera + `CameraMovement` directions       |
//! | `context` | wgpu instance/adapter/device/queue container        |
//! | `input`   | Keyboard table + mouse deltas (feature `input`)     |
//! | `time`    | Frame clock with delta clamping                     |

pub mod camera;
pub mod context;
#[cfg(feature = "input")]
pub mod input;
pub mod time;

pub use camera::{Camera, CameraMovement};
pub use context::EngineContext;
#[cfg(feature = "input")]
pub use input::InputState;
pub use time::{Time, TimeClock};

pub use glam;
