pub mod buffer;
pub mod texture;

pub use buffer::FrameUniform;
pub use texture::Texture;
