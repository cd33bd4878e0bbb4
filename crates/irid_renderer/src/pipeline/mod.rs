pub mod builder;
pub mod irradiance;
pub mod layout;
pub mod model;
pub mod skybox;

pub use builder::{PipelineBuilder, PipelineError, ShaderProfile};
pub use irradiance::{bake_irradiance, BakeOutput, BakeReport};
pub use layout::PipelineLayouts;
pub use model::ModelPipeline;
pub use skybox::SkyboxPipeline;
