/// The typed payloads carried by the per-frame constant buffers.
///
/// Field order and sizes are part of the shader binding contract — the WGSL
/// structs in `assets/shaders/` mirror them field-for-field.
use glam::{Mat4, Vec3, Vec4};

/// Per-draw transform block: exactly 256 bytes (4 × mat4), matching the
/// constant-buffer alignment, so it can also serve as the per-face slot
/// stride in the bake's dynamic-offset buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Inverse-transpose of `world`, needed for correct normal
    /// transformation under non-uniform scale.
    pub world_inv_transpose: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            world_inv_transpose: world.inverse().transpose().to_cols_array_2d(),
        }
    }

    pub fn identity() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// One point light: position plus scalar intensity.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Light {
    pub position: [f32; 3],
    pub intensity: f32,
}

/// Scene-wide shading data: up to four point lights, the active count, and
/// the camera's world position.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneData {
    pub lights: [Light; 4],
    pub light_count: u32,
    pub camera_position: [f32; 3],
}

impl Default for SceneData {
    fn default() -> Self {
        Self {
            lights: [Light::default(); 4],
            light_count: 0,
            camera_position: [0.0; 3],
        }
    }
}

/// Forces the translation row of a view matrix to (0, 0, 0, 1) while
/// leaving the rotation block untouched.
///
/// The skybox must follow camera rotation but never camera position — with
/// translation stripped it reads as infinitely distant.
pub fn strip_translation(view: Mat4) -> Mat4 {
    let mut out = view;
    out.w_axis = Vec4::W;
    out
}

/// Convenience: a [`Vec3`] as the array form the Pod structs use.
#[inline]
pub fn vec3_array(v: Vec3) -> [f32; 3] {
    v.to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_is_exactly_256_bytes() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 256);
    }

    #[test]
    fn light_is_exactly_16_bytes() {
        assert_eq!(std::mem::size_of::<Light>(), 16);
        assert_eq!(std::mem::size_of::<SceneData>(), 80);
    }

    #[test]
    fn strip_translation_preserves_rotation_bits() {
        let view = Mat4::look_at_rh(
            Vec3::new(12.5, -3.0, 77.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::Y,
        );
        let stripped = strip_translation(view);

        // rotation 3×3 block bitwise identical
        assert_eq!(view.x_axis.to_array(), stripped.x_axis.to_array());
        assert_eq!(view.y_axis.to_array(), stripped.y_axis.to_array());
        assert_eq!(view.z_axis.to_array(), stripped.z_axis.to_array());

        // translation forced to (0, 0, 0, 1)
        assert_eq!(stripped.w_axis.to_array(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn inverse_transpose_recovers_rotation() {
        // for a pure rotation, inverse-transpose equals the matrix itself
        let world = Mat4::from_rotation_y(0.73);
        let t = TransformUniform::new(world, Mat4::IDENTITY, Mat4::IDENTITY);
        let recovered = Mat4::from_cols_array_2d(&t.world_inv_transpose);
        assert!(recovered.abs_diff_eq(world, 1e-6));
    }
}
