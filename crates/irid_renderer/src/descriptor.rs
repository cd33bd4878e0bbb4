/// The shader-resource descriptor table.
///
/// Shader-visible slots are a scarce, fixed-size resource: the table
/// centralises their allocation so no two call sites ever collide on a
/// slot, and registration order gives deterministic slot indices.  Slots
/// are append-only and never recycled — a [`DescriptorHandle`] stays valid
/// for the table's whole lifetime.
///
/// Each slot holds one bind group over (texture view, shared sampler).  The
/// view kind — 2D or cube — is chosen automatically from the texture's
/// array-layer count at registration; since the view dimension is baked
/// into a bind-group layout, the table keeps one layout per kind, both
/// feeding the same slot space.
use std::sync::Arc;

use crate::resources::texture::Texture;

/// Maximum number of slots a table can hold.
pub const TABLE_CAPACITY: usize = 512;

/// A stable reference to one table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorHandle {
    slot: u32,
}

impl DescriptorHandle {
    /// Index of the slot within the table.  Handles issued by consecutive
    /// `register` calls carry consecutive indices.
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

pub struct DescriptorTable {
    layout_2d: Arc<wgpu::BindGroupLayout>,
    layout_cube: Arc<wgpu::BindGroupLayout>,
    sampler: wgpu::Sampler,
    slots: Vec<Arc<wgpu::BindGroup>>,
}

impl DescriptorTable {
    /// `layout_2d`/`layout_cube` must each have a texture entry at binding 0
    /// and a sampler entry at binding 1 (see `pipeline::PipelineLayouts`).
    pub fn new(
        device: &wgpu::Device,
        layout_2d: Arc<wgpu::BindGroupLayout>,
        layout_cube: Arc<wgpu::BindGroupLayout>,
    ) -> Self {
        // one linear-filtering sampler shared by every slot, mirroring a
        // static sampler in the shader binding contract
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Material Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            layout_2d,
            layout_cube,
            sampler,
            slots: Vec::new(),
        }
    }

    /// Appends a slot bound to a shader-resource view over `texture` and
    /// returns its handle.
    ///
    /// Returns `None` when the table is full; a failed registration never
    /// mutates table state.
    pub fn register(&mut self, device: &wgpu::Device, texture: &Texture) -> Option<DescriptorHandle> {
        if self.slots.len() >= TABLE_CAPACITY {
            return None;
        }

        let layout = if texture.is_cube() {
            &self.layout_cube
        } else {
            &self.layout_2d
        };
        let view = texture.create_view();
        let slot = self.slots.len() as u32;

        let bind_group = Arc::new(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Material Slot {slot}")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));

        self.slots.push(bind_group);
        Some(DescriptorHandle { slot })
    }

    /// The bind group for a previously-issued handle.
    pub fn bind_group(&self, handle: DescriptorHandle) -> &Arc<wgpu::BindGroup> {
        &self.slots[handle.slot as usize]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        TABLE_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineLayouts;

    #[test]
    fn slots_are_sequential_and_stable() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let layouts = PipelineLayouts::new(&ctx.device);
        let mut table =
            DescriptorTable::new(&ctx.device, layouts.material_2d.clone(), layouts.material_cube.clone());

        let white = Texture::white(&ctx.device, &ctx.queue);
        let first = table.register(&ctx.device, &white).unwrap();
        let second = table.register(&ctx.device, &white).unwrap();
        assert_eq!(first.slot(), 0);
        assert_eq!(second.slot(), 1);

        // the slot issued first keeps resolving to the same bind group
        let before = Arc::clone(table.bind_group(first));
        let _ = table.register(&ctx.device, &white).unwrap();
        assert!(Arc::ptr_eq(&before, table.bind_group(first)));
    }

    #[test]
    fn register_fails_at_capacity_without_mutation() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let layouts = PipelineLayouts::new(&ctx.device);
        let mut table =
            DescriptorTable::new(&ctx.device, layouts.material_2d.clone(), layouts.material_cube.clone());

        let white = Texture::white(&ctx.device, &ctx.queue);
        for i in 0..TABLE_CAPACITY {
            let handle = table.register(&ctx.device, &white).expect("capacity not reached");
            assert_eq!(handle.slot() as usize, i);
        }
        assert_eq!(table.len(), TABLE_CAPACITY);

        assert!(table.register(&ctx.device, &white).is_none());
        assert_eq!(table.len(), TABLE_CAPACITY, "failed register must not mutate");
    }

    #[test]
    fn cube_texture_lands_in_a_cube_slot() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let layouts = PipelineLayouts::new(&ctx.device);
        let mut table =
            DescriptorTable::new(&ctx.device, layouts.material_2d.clone(), layouts.material_cube.clone());

        // a 6-layer texture must produce a cube view; binding it against the
        // cube layout validates only if the view dimension matched
        let cube = Texture::white_cube(&ctx.device, &ctx.queue);
        assert!(cube.is_cube());
        let handle = table.register(&ctx.device, &cube).unwrap();
        assert_eq!(handle.slot(), 0);
    }
}
