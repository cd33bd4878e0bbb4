mod cube;

pub use cube::sky_cube;
