use std::io;

use image::RgbaImage;

use crate::device::{AllocationError, Context};

use super::FixtureSource;

/// Format of every fixture texture, whatever the source image's format.
pub const FIXTURE_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Why a fixture could not be turned into a texture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("could not find fixture '{name}': {source}")]
    NotFound {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("could not decode fixture '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("fixture '{name}' decoded to an invalid {width}x{height} image")]
    InvalidImage { name: String, width: u32, height: u32 },

    #[error("no rendering context to allocate a texture for fixture '{name}'")]
    NoContext { name: String },

    #[error("could not allocate a texture for fixture '{name}': {source}")]
    Allocation {
        name: String,
        #[source]
        source: AllocationError,
    },

    #[error("could not upload fixture '{name}' into its texture: {source}")]
    Upload {
        name: String,
        #[source]
        source: AllocationError,
    },
}

/// Decodes a compressed image and converts it to 8-bit RGBA.
pub fn decode_fixture(name: &str, bytes: &[u8]) -> Result<RgbaImage, FixtureError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| FixtureError::Decode {
        name: name.to_string(),
        source,
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || rgba.as_raw().len() != expected {
        return Err(FixtureError::InvalidImage {
            name: name.to_string(),
            width,
            height,
        });
    }

    Ok(rgba)
}

/// Descriptor of a fixture texture labeled `label`.
///
/// Copyable both ways so tests can read the texels back.
pub fn fixture_texture_descriptor(label: &str, width: u32, height: u32) -> wgpu::TextureDescriptor<'_> {
    wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FIXTURE_TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    }
}

/// Loads fixture `name` from `source` into a new RGBA8 texture.
///
/// The fixture is decoded before any GPU work, so a missing or corrupt fixture
/// is reported even without a context.
pub fn load_fixture_texture(
    context: Option<&Context>,
    source: &dyn FixtureSource,
    name: &str,
) -> Result<wgpu::Texture, FixtureError> {
    let bytes = source.load(name).map_err(|source| FixtureError::NotFound {
        name: name.to_string(),
        source,
    })?;

    let image = decode_fixture(name, &bytes)?;

    let context = context.ok_or_else(|| FixtureError::NoContext {
        name: name.to_string(),
    })?;
    let allocator = context.permanents_allocator();

    let texture = allocator
        .create_texture(&fixture_texture_descriptor(name, image.width(), image.height()))
        .map_err(|source| FixtureError::Allocation {
            name: name.to_string(),
            source,
        })?;

    allocator
        .upload_texture(&texture, image.as_raw())
        .map_err(|source| FixtureError::Upload {
            name: name.to_string(),
            source,
        })?;

    log::debug!(
        "loaded fixture '{name}' as a {}x{} texture",
        image.width(),
        image.height()
    );
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;

    use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Rgb, RgbImage, Rgba};

    use super::*;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn grayscale_fixture_becomes_rgba8() {
        let gray = GrayImage::from_pixel(3, 2, Luma([200]));
        let rgba = decode_fixture("gray.png", &encode_png(DynamicImage::ImageLuma8(gray))).unwrap();

        assert_eq!(rgba.dimensions(), (3, 2));
        assert_eq!(rgba.as_raw().len(), 3 * 2 * 4);
        assert_eq!(rgba.get_pixel(2, 1), &Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn rgb_fixture_gains_opaque_alpha() {
        let rgb = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let rgba = decode_fixture("rgb.png", &encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();

        assert_eq!(rgba.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn sixteen_bit_fixture_is_narrowed_to_eight_bits() {
        let wide: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Rgba([u16::MAX, 0, u16::MAX, u16::MAX]));
        let rgba = decode_fixture("wide.png", &encode_png(DynamicImage::ImageRgba16(wide))).unwrap();

        assert_eq!(rgba.as_raw().len(), 2 * 2 * 4);
        assert_eq!(rgba.get_pixel(1, 1), &Rgba([255, 0, 255, 255]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_fixture("junk.png", b"definitely not an image").unwrap_err();
        assert!(matches!(err, FixtureError::Decode { ref name, .. } if name == "junk.png"));
    }

    #[test]
    fn fixture_textures_are_rgba8_and_labeled() {
        let desc = fixture_texture_descriptor("bay_bridge.jpg", 640, 480);
        assert_eq!(desc.format, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(desc.label, Some("bay_bridge.jpg"));
        assert_eq!(desc.size.width, 640);
        assert_eq!(desc.size.height, 480);
        assert!(desc.usage.contains(wgpu::TextureUsages::COPY_DST));
    }

    #[test]
    fn missing_fixture_reports_not_found() {
        let fixtures: HashMap<String, Vec<u8>> = HashMap::new();
        let err = load_fixture_texture(None, &fixtures, "nope.png").unwrap_err();
        assert!(matches!(err, FixtureError::NotFound { ref name, .. } if name == "nope.png"));
    }

    #[test]
    fn valid_fixture_without_context_reports_no_context() {
        let mut fixtures = HashMap::new();
        let png = encode_png(DynamicImage::ImageRgb8(RgbImage::new(1, 1)));
        fixtures.insert("pixel.png".to_string(), png);

        let err = load_fixture_texture(None, &fixtures, "pixel.png").unwrap_err();
        assert!(matches!(err, FixtureError::NoContext { .. }));
    }
}
