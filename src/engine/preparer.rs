//! Image preparation before upload
//!
//! Rejects undersized artwork, bounds oversized artwork to the target
//! dimension while keeping its aspect ratio, and re-encodes everything as a
//! high-quality JPEG.

use base64::Engine;
use image::{imageops::FilterType, ColorType, GenericImageView};
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ImageSettings;

/// Image preparation errors
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("Image must be at least {min}x{min} pixels, got {width}x{height}")]
    TooSmall { width: u32, height: u32, min: u32 },
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Re-encoded image ready for upload
#[derive(Clone)]
pub struct PreparedImage {
    /// Name of the file the user picked
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// JPEG bytes
    pub bytes: Vec<u8>,
}

impl PreparedImage {
    /// Base64 payload for the upload endpoint
    pub fn base64_contents(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:` URI for previews
    pub fn preview_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64_contents())
    }
}

impl std::fmt::Debug for PreparedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedImage")
            .field("file_name", &self.file_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Validates, bounds and re-encodes artwork
#[derive(Debug, Clone)]
pub struct ImagePreparer {
    min_dimension: u32,
    target_dimension: u32,
    quality: u8,
}

impl ImagePreparer {
    pub fn new(min_dimension: u32, target_dimension: u32, quality: u8) -> Self {
        ImagePreparer {
            min_dimension,
            target_dimension,
            quality: quality.clamp(1, 100),
        }
    }

    pub fn from_settings(settings: &ImageSettings) -> Self {
        Self::new(settings.min_dimension, settings.target_dimension, settings.jpeg_quality)
    }

    /// Output dimensions for an input of `width` x `height`
    ///
    /// Below the minimum on either side is an error. When both sides are
    /// under the target the size is kept; otherwise the longer side becomes
    /// the target and the shorter one scales as `short * target / long`.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32), PrepareError> {
        if width < self.min_dimension || height < self.min_dimension {
            return Err(PrepareError::TooSmall { width, height, min: self.min_dimension });
        }

        if width < self.target_dimension && height < self.target_dimension {
            return Ok((width, height));
        }

        let target = u64::from(self.target_dimension);
        let scaled = |short: u32, long: u32| (u64::from(short) * target / u64::from(long)) as u32;

        if width > height {
            Ok((self.target_dimension, scaled(height, width)))
        } else {
            Ok((scaled(width, height), self.target_dimension))
        }
    }

    /// Decode, bound and re-encode an image file
    pub fn prepare(&self, data: &[u8], file_name: &str) -> Result<PreparedImage, PrepareError> {
        // Pixel buffers live only inside this call and are freed on every return path.
        let decoded = image::load_from_memory(data).map_err(PrepareError::Decode)?;
        let (width, height) = decoded.dimensions();

        let (out_width, out_height) = self.target_dimensions(width, height)?;

        let resized = if (out_width, out_height) == (width, height) {
            decoded
        } else {
            debug!(width, height, out_width, out_height, "Downsampling image");
            decoded.resize_exact(out_width, out_height, FilterType::Lanczos3)
        };

        let rgb = resized.to_rgb8();
        drop(resized);

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode(rgb.as_raw(), out_width, out_height, ColorType::Rgb8)
            .map_err(PrepareError::Encode)?;

        info!(
            file_name = %file_name,
            width = out_width,
            height = out_height,
            bytes = bytes.len(),
            "Image prepared"
        );

        Ok(PreparedImage {
            file_name: file_name.to_string(),
            width: out_width,
            height: out_height,
            bytes,
        })
    }
}

impl Default for ImagePreparer {
    fn default() -> Self {
        Self::from_settings(&ImageSettings::default())
    }
}
