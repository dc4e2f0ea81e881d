//! Source image reader backed by the `image` crate.
//!
//! Any format the crate can guess from the content is accepted (PNG, JPEG, GIF,
//! BMP, TIFF, WebP, ...). The header is inspected first so that images above the
//! configured pixel ceiling are rejected without allocating their pixel buffers.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::decode::reader::SourceImageReader;
use crate::image_pipeline::decode::types::SourceImage;

pub struct StandardImageReader;

impl StandardImageReader {
    fn guessed_reader(data: &[u8]) -> Result<(ImageReader<Cursor<&[u8]>>, ImageFormat)> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| ConversionError::UnsupportedFormat("unrecognized image data".to_string()))?;
        Ok((reader, format))
    }

    fn check_pixel_limit(width: u32, height: u32, limit: u64) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        let pixels = u64::from(width) * u64::from(height);
        if pixels > limit {
            return Err(ConversionError::ImageTooLarge { pixels, limit });
        }
        Ok(())
    }
}

/// Upper-case display name of a container format, e.g. `Jpeg` -> "JPEG".
pub(crate) fn format_name(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}

impl SourceImageReader for StandardImageReader {
    fn read_image(&self, data: &[u8], config: &ConversionConfig) -> Result<SourceImage> {
        debug!("Decoding image, {} bytes", data.len());

        let (header, format) = Self::guessed_reader(data)?;
        let (width, height) = header
            .into_dimensions()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;
        Self::check_pixel_limit(width, height, config.max_image_pixels)?;

        let (reader, _) = Self::guessed_reader(data)?;
        let decoded = reader
            .decode()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let source = SourceImage::new(format_name(format), decoded);
        debug!("Decoded {:?} image: {}x{} ({})", format, width, height, source.color_mode());

        Ok(source)
    }
}
