pub mod mesh;
pub mod primitives;
pub mod vertex;

pub use mesh::Mesh;
pub use vertex::{SkyVertex, Vertex};
