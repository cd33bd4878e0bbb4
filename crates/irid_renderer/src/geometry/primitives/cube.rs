/// Unit cube centred at the origin, position-only.
///
/// 8 unique vertices, 36 indices (2 triangles per face × 6 faces).  The
/// skybox pass draws all 36; the irradiance bake draws only the first 6
/// (the +Z face), so that face must come first in the index list.
use crate::geometry::{Mesh, SkyVertex};
use crate::resources::buffer;

pub fn sky_cube(device: &wgpu::Device) -> Mesh {
    let v = |x: f32, y: f32, z: f32| SkyVertex { position: [x, y, z] };

    let vertices: &[SkyVertex] = &[
        v(-1.0, -1.0, 1.0),  // 0
        v(1.0, -1.0, 1.0),   // 1
        v(1.0, 1.0, 1.0),    // 2
        v(-1.0, 1.0, 1.0),   // 3
        v(-1.0, -1.0, -1.0), // 4
        v(1.0, -1.0, -1.0),  // 5
        v(1.0, 1.0, -1.0),   // 6
        v(-1.0, 1.0, -1.0),  // 7
    ];

    #[rustfmt::skip]
    let indices: &[u16] = &[
        0, 1, 2,  2, 3, 0, // front (z+) — the bake draws exactly these six
        5, 4, 7,  7, 6, 5, // back  (z-)
        4, 0, 3,  3, 7, 4, // left  (x-)
        1, 5, 6,  6, 2, 1, // right (x+)
        3, 2, 6,  6, 7, 3, // top   (y+)
        4, 5, 1,  1, 0, 4, // bottom (y-)
    ];

    Mesh {
        vertex_buffer: buffer::create_vertex(device, "Sky Cube VB", vertices),
        index_buffer: buffer::create_index(device, "Sky Cube IB", indices),
        index_count: indices.len() as u32,
        index_format: wgpu::IndexFormat::Uint16,
    }
}
