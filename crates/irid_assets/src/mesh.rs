/// OBJ mesh import.
///
/// Produces one [`ImportedMesh`] per OBJ model, with the vertex attributes
/// the render pipelines expect.  OBJ files carry no tangents, so they are
/// derived from the UV gradients of each triangle after loading.
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use glam::{Vec2, Vec3};

/// A single imported vertex, matching the GPU vertex layout field-for-field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub color: [f32; 4],
}

/// Immutable imported geometry: vertices, indices and the diffuse texture
/// path of the mesh's material (if any).
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    pub vertices: Vec<ImportedVertex>,
    pub indices: Vec<u32>,
    pub diffuse_map_path: Option<PathBuf>,
}

/// Loads every model in an OBJ file.
///
/// Material diffuse texture paths are resolved relative to the OBJ's parent
/// directory.  Missing normals or UVs fall back to zero; tangents are always
/// recomputed.
pub fn load_obj(path: &Path) -> anyhow::Result<Vec<ImportedMesh>> {
    let (models, materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
        .with_context(|| format!("failed to load OBJ `{}`", path.display()))?;
    let materials = materials.unwrap_or_default();
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        let mesh = model.mesh;
        let vertex_count = mesh.positions.len() / 3;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            let read3 = |data: &[f32]| -> [f32; 3] {
                if data.len() >= (i + 1) * 3 {
                    [data[i * 3], data[i * 3 + 1], data[i * 3 + 2]]
                } else {
                    [0.0; 3]
                }
            };
            let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
            } else {
                [0.0; 2]
            };
            vertices.push(ImportedVertex {
                position: read3(&mesh.positions),
                normal: read3(&mesh.normals),
                uv,
                tangent: [0.0; 3],
                color: [1.0; 4],
            });
        }

        compute_tangents(&mut vertices, &mesh.indices);

        let diffuse_map_path = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|mat| mat.diffuse_texture.as_ref())
            .map(|tex| base_dir.join(tex));

        meshes.push(ImportedMesh {
            vertices,
            indices: mesh.indices,
            diffuse_map_path,
        });
    }

    log::info!(
        "imported {} mesh(es) from `{}`",
        meshes.len(),
        path.display()
    );
    Ok(meshes)
}

/// Derives per-vertex tangents from triangle UV gradients.
///
/// Tangents of shared vertices accumulate across adjacent triangles and are
/// normalised at the end.  Degenerate UV triangles contribute nothing.
pub fn compute_tangents(vertices: &mut [ImportedVertex], indices: &[u32]) {
    let mut accum = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p0 = Vec3::from(vertices[i0].position);
        let p1 = Vec3::from(vertices[i1].position);
        let p2 = Vec3::from(vertices[i2].position);
        let w0 = Vec2::from(vertices[i0].uv);
        let w1 = Vec2::from(vertices[i1].uv);
        let w2 = Vec2::from(vertices[i2].uv);

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let d1 = w1 - w0;
        let d2 = w2 - w0;

        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < 1e-8 {
            continue;
        }
        let tangent = (e1 * d2.y - e2 * d1.y) / det;

        accum[i0] += tangent;
        accum[i1] += tangent;
        accum[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accum) {
        vertex.tangent = tangent.normalize_or_zero().to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> (Vec<ImportedVertex>, Vec<u32>) {
        // unit quad in the XY plane, U along +X, V along +Y
        let v = |p: [f32; 3], uv: [f32; 2]| ImportedVertex {
            position: p,
            normal: [0.0, 0.0, 1.0],
            uv,
            tangent: [0.0; 3],
            color: [1.0; 4],
        };
        let vertices = vec![
            v([0.0, 0.0, 0.0], [0.0, 0.0]),
            v([1.0, 0.0, 0.0], [1.0, 0.0]),
            v([1.0, 1.0, 0.0], [1.0, 1.0]),
            v([0.0, 1.0, 0.0], [0.0, 1.0]),
        ];
        (vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn tangents_follow_u_axis() {
        let (mut vertices, indices) = quad();
        compute_tangents(&mut vertices, &indices);
        for vertex in &vertices {
            let t = Vec3::from(vertex.tangent);
            assert!((t - Vec3::X).length() < 1e-5, "tangent {t:?}");
        }
    }

    #[test]
    fn degenerate_uvs_yield_zero_tangent() {
        let (mut vertices, indices) = quad();
        for vertex in &mut vertices {
            vertex.uv = [0.5, 0.5];
        }
        compute_tangents(&mut vertices, &indices);
        for vertex in &vertices {
            assert_eq!(vertex.tangent, [0.0; 3]);
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj(Path::new("definitely/not/here.obj")).is_err());
    }
}
