/// GPU texture ownership and upload.
///
/// A [`Texture`] is always usable: decode failures are replaced by the 4×4
/// opaque-white fallback before any consumer can touch them, so no caller
/// ever observes an invalid texture.
use std::path::{Path, PathBuf};

use irid_assets::DecodedImage;

/// Pixel format used for every file-sourced texture (decoded data is
/// normalised to RGBA8, and albedo/sky content is sRGB).
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A device-resident image resource plus the metadata the descriptor table
/// needs to choose a view kind.
pub struct Texture {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
    layers: u32,
}

impl Texture {
    /// Cube-vs-2D inference rule: an array-layer count that is ≥ 6 and a
    /// multiple of 6 is treated as a cube.
    #[inline]
    pub fn infer_cube(layers: u32) -> bool {
        layers >= 6 && layers % 6 == 0
    }

    /// Uploads decoded pixel data into a new device texture.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: image.layers,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: image.mips,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        Self {
            texture,
            width: image.width,
            height: image.height,
            layers: image.layers,
        }
    }

    /// Decodes a 2D texture from `path`.  On failure the white fallback is
    /// returned instead — the failure is logged, never surfaced.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        match irid_assets::decode_image(path) {
            Ok(image) => Self::from_decoded(device, queue, &image, &path.display().to_string()),
            Err(e) => {
                log::warn!("texture `{}` unusable, using white fallback: {e:#}", path.display());
                Self::white(device, queue)
            }
        }
    }

    /// Decodes six cube faces from `paths`.  Any failure falls back to a
    /// white cube so the skybox pipeline still has a bindable resource.
    pub fn cube_from_paths(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[PathBuf; 6],
    ) -> Self {
        match irid_assets::decode_cube_faces(paths) {
            Ok(image) => Self::from_decoded(device, queue, &image, "Skybox Cube"),
            Err(e) => {
                log::warn!("cube texture unusable, using white fallback: {e:#}");
                Self::white_cube(device, queue)
            }
        }
    }

    /// Wraps an already-rendered device resource (e.g. the baked irradiance
    /// map) without uploading anything.
    pub fn from_wgpu(texture: wgpu::Texture) -> Self {
        let size = texture.size();
        Self {
            width: size.width,
            height: size.height,
            layers: size.depth_or_array_layers,
            texture,
        }
    }

    /// The designated decode-failure fallback: 4×4, fully opaque white.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_decoded(device, queue, &Self::white_pixels(1), "White Fallback")
    }

    /// Six-layer variant of the white fallback, for cube slots.
    pub fn white_cube(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_decoded(device, queue, &Self::white_pixels(6), "White Cube Fallback")
    }

    fn white_pixels(layers: u32) -> DecodedImage {
        DecodedImage {
            pixels: vec![0xff; (4 * 4 * 4 * layers) as usize],
            width: 4,
            height: 4,
            layers,
            mips: 1,
        }
    }

    /// Creates a shader-resource view whose dimensionality follows the
    /// inference rule above.
    pub fn create_view(&self) -> wgpu::TextureView {
        let dimension = if self.is_cube() {
            wgpu::TextureViewDimension::Cube
        } else {
            wgpu::TextureViewDimension::D2
        };
        self.texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(dimension),
            ..Default::default()
        })
    }

    pub fn is_cube(&self) -> bool {
        Self::infer_cube(self.layers)
    }

    pub fn layers(&self) -> u32 {
        self.layers
    }

    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn raw(&self) -> &wgpu::Texture {
        &self.texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_inference_rule() {
        assert!(!Texture::infer_cube(0));
        assert!(!Texture::infer_cube(1));
        assert!(!Texture::infer_cube(5));
        assert!(Texture::infer_cube(6));
        assert!(!Texture::infer_cube(7));
        assert!(Texture::infer_cube(12));
    }

    #[test]
    fn bad_path_yields_white_fallback() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let tex = Texture::from_path(&ctx.device, &ctx.queue, Path::new("missing/albedo.png"));
        assert_eq!(tex.extent(), (4, 4));
        assert_eq!(tex.layers(), 1);
        assert!(!tex.is_cube());
        // the view must be creatable — an invalid texture would panic here
        let _ = tex.create_view();
    }

    #[test]
    fn six_layer_texture_is_cube() {
        let Some(ctx) = crate::test_support::headless_context() else {
            return;
        };
        let cube = Texture::white_cube(&ctx.device, &ctx.queue);
        assert!(cube.is_cube());
        let plane = Texture::white(&ctx.device, &ctx.queue);
        assert!(!plane.is_cube());
    }
}
