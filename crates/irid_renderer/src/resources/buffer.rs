/// Thin wrappers over `wgpu::Buffer` creation plus the per-frame uniform
/// set used for every constant-buffer payload in the renderer.
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::FRAMES_IN_FLIGHT;

/// Hardware constant-buffer alignment.  Uniform buffer sizes and dynamic
/// offsets must be multiples of this.
pub const UNIFORM_ALIGN: u64 = 256;

/// Rounds `size` up to the next multiple of [`UNIFORM_ALIGN`].
#[inline]
pub const fn align256(size: u64) -> u64 {
    (size + UNIFORM_ALIGN - 1) & !(UNIFORM_ALIGN - 1)
}

/// Creates a GPU vertex buffer from a slice of `Pod` data.
pub fn create_vertex<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> Arc<wgpu::Buffer> {
    Arc::new(
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        }),
    )
}

/// Creates a GPU index buffer from a slice of `Pod` data (`u16` or `u32`).
pub fn create_index<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> Arc<wgpu::Buffer> {
    Arc::new(
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::INDEX,
        }),
    )
}

/// Creates a uniform buffer initialised with `data`, padded to the 256-byte
/// alignment the hardware requires of constant buffers.
pub fn create_uniform<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &T,
) -> Arc<wgpu::Buffer> {
    let mut contents = bytemuck::bytes_of(data).to_vec();
    contents.resize(align256(contents.len() as u64) as usize, 0);
    Arc::new(
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: &contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        }),
    )
}

/// One typed uniform payload, duplicated once per in-flight frame.
///
/// The duplication is the sole mechanism preventing a write-after-read
/// hazard between the CPU preparing frame N+1 and the GPU still consuming
/// frame N: callers write only the instance named by the current frame
/// index, and the GPU only ever reads.
///
/// Each instance keeps a CPU shadow copy of its latest payload, so the
/// value written for frame `k` can be read back without touching frames
/// `j ≠ k`.
pub struct FrameUniform<T: bytemuck::Pod> {
    buffers: Vec<Arc<wgpu::Buffer>>,
    bind_groups: Vec<Arc<wgpu::BindGroup>>,
    shadow: Vec<T>,
}

impl<T: bytemuck::Pod> FrameUniform<T> {
    /// Builds [`FRAMES_IN_FLIGHT`] buffers and bind groups, every instance
    /// initialised with `initial`.  `layout` must have a single uniform
    /// buffer entry at binding 0.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        initial: T,
    ) -> Self {
        let mut buffers = Vec::with_capacity(FRAMES_IN_FLIGHT);
        let mut bind_groups = Vec::with_capacity(FRAMES_IN_FLIGHT);

        for frame in 0..FRAMES_IN_FLIGHT {
            let buffer = create_uniform(device, &format!("{label} [frame {frame}]"), &initial);
            let bind_group = Arc::new(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} BG [frame {frame}]")),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            }));
            buffers.push(buffer);
            bind_groups.push(bind_group);
        }

        Self {
            buffers,
            bind_groups,
            shadow: vec![initial; FRAMES_IN_FLIGHT],
        }
    }

    /// Writes `value` into the instance for `frame`.  Instances for other
    /// frame indices are untouched.
    pub fn write(&mut self, queue: &wgpu::Queue, frame: usize, value: &T) {
        self.shadow[frame] = *value;
        queue.write_buffer(&self.buffers[frame], 0, bytemuck::bytes_of(value));
    }

    /// The latest payload written for `frame` (CPU shadow).
    pub fn get(&self, frame: usize) -> &T {
        &self.shadow[frame]
    }

    pub fn bind_group(&self, frame: usize) -> &Arc<wgpu::BindGroup> {
        &self.bind_groups[frame]
    }

    pub fn buffer(&self, frame: usize) -> &Arc<wgpu::Buffer> {
        &self.buffers[frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align256_rounds_up() {
        assert_eq!(align256(0), 0);
        assert_eq!(align256(1), 256);
        assert_eq!(align256(256), 256);
        assert_eq!(align256(257), 512);
        assert_eq!(align256(300), 512);
    }

    #[test]
    fn frame_instances_are_isolated() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Test Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let mut uniform: FrameUniform<[f32; 4]> =
            FrameUniform::new(&ctx.device, &layout, "Test Uniform", [0.0; 4]);

        uniform.write(&ctx.queue, 0, &[1.0, 2.0, 3.0, 4.0]);
        // frame 1 must not observe frame 0's payload
        assert_eq!(uniform.get(1), &[0.0; 4]);
        assert_eq!(uniform.get(0), &[1.0, 2.0, 3.0, 4.0]);

        uniform.write(&ctx.queue, 1, &[9.0; 4]);
        assert_eq!(uniform.get(0), &[1.0, 2.0, 3.0, 4.0]);

        // buffer sizes honour the constant-buffer alignment
        assert_eq!(uniform.buffer(0).size() % UNIFORM_ALIGN, 0);
    }
}
