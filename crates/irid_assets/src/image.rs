/// Image file decoding.
///
/// All pixel data is normalised to tightly-packed RGBA8; the renderer infers
/// cube-vs-2D purely from [`DecodedImage::layers`].
use std::path::Path;

use anyhow::{ensure, Context as _};

/// Decoded pixel data plus the metadata the renderer needs to create a
/// matching GPU resource.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Tightly packed RGBA8 pixels, `layers` slices of `width * height * 4`
    /// bytes each.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Array layer count.  A non-zero multiple of 6 (and ≥ 6) marks a cube.
    pub layers: u32,
    pub mips: u32,
}

/// Decodes a single 2D image file (PNG or JPEG).
pub fn decode_image(path: &Path) -> anyhow::Result<DecodedImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image `{}`", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        pixels: img.into_raw(),
        width,
        height,
        layers: 1,
        mips: 1,
    })
}

/// Decodes six cube face files into one 6-layer image.
///
/// Face order follows the cube-face convention: +X, -X, +Y, -Y, +Z, -Z.
/// All faces must decode to identical dimensions.
pub fn decode_cube_faces(paths: &[std::path::PathBuf; 6]) -> anyhow::Result<DecodedImage> {
    // the first face fixes the extent every other face must match
    let first = decode_image(&paths[0])?;
    let (width, height) = (first.width, first.height);

    let mut pixels = first.pixels;
    pixels.reserve(5 * (width * height * 4) as usize);
    for path in &paths[1..] {
        let face = decode_image(path)?;
        ensure!(
            (face.width, face.height) == (width, height),
            "cube face `{}` is {}x{}, expected {}x{}",
            path.display(),
            face.width,
            face.height,
            width,
            height
        );
        pixels.extend_from_slice(&face.pixels);
    }

    Ok(DecodedImage {
        pixels,
        width,
        height,
        layers: 6,
        mips: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        img.save(&path).expect("save test png");
        path
    }

    #[test]
    fn decode_roundtrip_metadata() {
        let dir = std::env::temp_dir();
        let path = write_png(&dir, "irid_test_decode.png", 8, 4);
        let img = decode_image(&path).unwrap();
        assert_eq!((img.width, img.height, img.layers, img.mips), (8, 4, 1, 1));
        assert_eq!(img.pixels.len(), 8 * 4 * 4);
        assert_eq!(&img.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(decode_image(Path::new("nope/missing.png")).is_err());
    }

    #[test]
    fn cube_faces_must_match_in_size() {
        let dir = std::env::temp_dir();
        let ok = write_png(&dir, "irid_test_face_ok.png", 4, 4);
        let bad = write_png(&dir, "irid_test_face_bad.png", 8, 8);
        let paths = [
            ok.clone(),
            ok.clone(),
            ok.clone(),
            ok.clone(),
            ok.clone(),
            bad,
        ];
        assert!(decode_cube_faces(&paths).is_err());

        let paths = [
            ok.clone(),
            ok.clone(),
            ok.clone(),
            ok.clone(),
            ok.clone(),
            ok,
        ];
        let cube = decode_cube_faces(&paths).unwrap();
        assert_eq!(cube.layers, 6);
        assert_eq!(cube.pixels.len(), 6 * 4 * 4 * 4);
    }
}
