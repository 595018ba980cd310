//! Texture loading and upload
//!
//! Decodes an image file into an RGBA texture with a full mip chain and
//! repeat/linear sampling state. Decode failures are surfaced as errors so
//! the caller can substitute the fallback texture and keep rendering.

use std::fmt;
use std::path::{Path, PathBuf};

use image::GenericImageView;

use crate::mipmap::MipmapGenerator;

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or decoded
    Decode {
        /// Path that was attempted
        path: PathBuf,
        /// Decoder message
        reason: String,
    },
    /// The file decoded to a channel count the pipeline cannot take
    UnsupportedChannels {
        /// Path that was attempted
        path: PathBuf,
        /// Channel count found in the file
        channels: u8,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, reason } => {
                write!(f, "Failed to load texture {}: {}", path.display(), reason)
            }
            TextureError::UnsupportedChannels { path, channels } => {
                write!(
                    f,
                    "Texture {} has {} channels, expected 3 (RGB) or 4 (RGBA)",
                    path.display(),
                    channels
                )
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// A decoded image ready for upload
///
/// Pixel data is always RGBA8; `channels` records what the file actually
/// carried (3 for RGB expanded with opaque alpha, 4 for RGBA).
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file
    pub channels: u8,
    /// Row-major RGBA8 pixels
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA pixels
///
/// Three-channel files are expanded with an opaque alpha, four-channel
/// files pass through, any other channel count is rejected.
pub fn decode_image(path: impl AsRef<Path>) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| TextureError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(TextureError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }

    let (width, height) = img.dimensions();
    let pixels = img.into_rgba8().into_raw();

    Ok(DecodedImage {
        width,
        height,
        channels,
        pixels,
    })
}

/// Number of mip levels in a full chain down to 1x1
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// A 2D texture on the GPU with its view and sampler
pub struct Texture {
    /// Keeps the GPU texture alive for the lifetime of its view
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    mip_level_count: u32,
}

impl Texture {
    /// Load a texture from an image file
    ///
    /// The decoded pixel buffer only lives for the duration of the upload.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = decode_image(path)?;
        let texture = Self::from_decoded(device, queue, &decoded, "Color Texture");
        log::info!(
            "Loaded texture {} ({}x{}, {} source channels, {} mip levels)",
            path.display(),
            decoded.width,
            decoded.height,
            decoded.channels,
            texture.mip_level_count()
        );
        Ok(texture)
    }

    /// The 1x1 black texture used when loading fails
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let decoded = DecodedImage {
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![0, 0, 0, 255],
        };
        Self::from_decoded(device, queue, &decoded, "Fallback Texture")
    }

    /// Upload decoded pixels and generate the mip chain
    fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let mip_count = mip_level_count(image.width, image.height);
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        // The chain must be complete before the first frame samples it
        if mip_count > 1 {
            let generator = MipmapGenerator::new(device, wgpu::TextureFormat::Rgba8Unorm);
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Mipmap Encoder"),
            });
            generator.generate(device, &mut encoder, &texture, mip_count);
            queue.submit(std::iter::once(encoder.finish()));
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Color Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            mip_level_count: mip_count,
        }
    }

    /// Full-chain texture view
    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Repeat/linear sampler
    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Number of levels in the mip chain
    #[inline]
    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(800, 600), 10);
        assert_eq!(mip_level_count(1024, 1), 11);
    }

    #[test]
    fn test_decode_missing_file_reports_path() {
        let result = decode_image("does/not/exist.png");
        let err = result.expect_err("missing file should not decode");
        let msg = err.to_string();
        assert!(msg.contains("does/not/exist.png"));
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn test_decode_rgb_expands_to_rgba() {
        let path = temp_path("octa_texture_test_rgb.png");
        let mut img = image::RgbImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([10, 20, 30]);
        }
        img.save(&path).expect("failed to write test image");

        let decoded = decode_image(&path).expect("rgb image should decode");
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 4);
        // Expanded pixels carry an opaque alpha
        assert_eq!(decoded.pixels.len(), 4 * 4 * 4);
        assert_eq!(&decoded.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_rgba_passes_through() {
        let path = temp_path("octa_texture_test_rgba.png");
        let mut img = image::RgbaImage::new(2, 2);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([1, 2, 3, 128]);
        }
        img.save(&path).expect("failed to write test image");

        let decoded = decode_image(&path).expect("rgba image should decode");
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.channels, 4);
        assert_eq!(&decoded.pixels[0..4], &[1, 2, 3, 128]);
    }

    #[test]
    fn test_decode_grayscale_is_rejected() {
        let path = temp_path("octa_texture_test_gray.png");
        let img = image::GrayImage::new(2, 2);
        img.save(&path).expect("failed to write test image");

        let result = decode_image(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(TextureError::UnsupportedChannels { channels, .. }) => {
                assert_eq!(channels, 1);
            }
            other => panic!("Expected UnsupportedChannels, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_gray_alpha_is_rejected() {
        let path = temp_path("octa_texture_test_la.png");
        let img = image::GrayAlphaImage::new(2, 2);
        img.save(&path).expect("failed to write test image");

        let result = decode_image(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(TextureError::UnsupportedChannels { channels, .. }) => {
                assert_eq!(channels, 2);
            }
            other => panic!("Expected UnsupportedChannels, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unsupported_channels_display() {
        let err = TextureError::UnsupportedChannels {
            path: PathBuf::from("textures/odd.png"),
            channels: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("textures/odd.png"));
        assert!(msg.contains("2 channels"));
    }
}
