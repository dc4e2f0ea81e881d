//! Decoded source image types

use image::{DynamicImage, RgbImage};

/// A decoded source image. Never modified once decoded; normalization and resizing
/// produce new images so the original facts stay available for reporting.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Container format name, e.g. "PNG" or "JPEG"
    pub format: String,
    image: DynamicImage,
}

impl SourceImage {
    pub fn new(format: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            format: format.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel layout the decoder produced, e.g. "Rgb8", "Rgba8" or "L8".
    pub fn color_mode(&self) -> String {
        format!("{:?}", self.image.color())
    }

    /// Literal 8-bit RGB copy of the image. Palettes were already expanded by the
    /// decoder, alpha is dropped and gray is replicated; nothing is dithered.
    pub fn to_rgb(&self) -> RgbImage {
        self.image.to_rgb8()
    }
}
