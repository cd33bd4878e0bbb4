//! `irid_assets` — CPU-side asset import: OBJ meshes and image files.
//!
//! Everything here is plain data; GPU upload happens in `irid_renderer`.

pub mod image;
pub mod mesh;

pub use image::{decode_cube_faces, decode_image, DecodedImage};
pub use mesh::{load_obj, ImportedMesh, ImportedVertex};
