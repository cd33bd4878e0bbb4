//! `irid_renderer` — GPU resource orchestration for the irid renderer.
//!
//! # Module layout
//!
//! | Module          | Responsibility                                        |
//! |-----------------|-------------------------------------------------------|
//! | `descriptor`    | Fixed-capacity shader-resource table + stable handles |
//! | `resources`     | Buffer/texture allocation, per-frame uniforms         |
//! | `geometry`      | `Vertex`/`SkyVertex`, `Mesh`, built-in primitives     |
//! | `uniforms`      | GPU-visible payload structs (`Transform`, `SceneData`)|
//! | `pipeline`      | Bind-group layouts, pipeline builder, the three       |
//! |                 | frozen pipelines (model, skybox, irradiance bake)     |
//! | `render_target` | Depth attachment                                      |
//! | `scene`         | Frame orchestrator: init / per-frame update / draw    |

pub mod descriptor;
pub mod geometry;
pub mod pipeline;
pub mod render_target;
pub mod resources;
pub mod scene;
pub mod uniforms;

#[cfg(test)]
pub(crate) mod test_support;

pub use descriptor::{DescriptorHandle, DescriptorTable};
pub use geometry::{Mesh, SkyVertex, Vertex};
pub use pipeline::{PipelineError, ShaderProfile};
pub use render_target::DepthTarget;
pub use resources::buffer::FrameUniform;
pub use resources::texture::Texture;
pub use scene::{Scene, SceneConfig, SceneError};
pub use uniforms::{Light, SceneData, TransformUniform};

/// Number of frames the CPU may prepare while the GPU is still consuming
/// earlier ones.  Every per-frame constant buffer exists in this many
/// copies; the frame index handed to [`Scene::update`]/[`Scene::draw`] must
/// stay below it.
pub const FRAMES_IN_FLIGHT: usize = 2;
