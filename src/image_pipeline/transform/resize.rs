//! Aspect-preserving resize-to-fit.

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Target size for a source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePlan {
    pub target_width: u32,
    pub target_height: u32,
    /// Applied to both axes; above 1.0 only when enlarging was allowed.
    pub scale_factor: f64,
}

impl ResizePlan {
    pub fn is_identity(&self, width: u32, height: u32) -> bool {
        self.target_width == width && self.target_height == height
    }
}

/// Computes the largest size fitting `desired_width` x `desired_height` that keeps the
/// aspect ratio of `width` x `height`. Without `allow_enlarge` the result never exceeds
/// the source size. Dimensions round half away from zero and are at least 1.
pub fn plan(width: u32, height: u32, desired_width: f64, desired_height: f64, allow_enlarge: bool) -> ResizePlan {
    let mut horizontal = desired_width / f64::from(width);
    let mut vertical = desired_height / f64::from(height);

    if !allow_enlarge {
        horizontal = horizontal.min(1.0);
        vertical = vertical.min(1.0);
    }

    let scale_factor = horizontal.min(vertical).max(0.0);

    ResizePlan {
        target_width: scaled(width, scale_factor),
        target_height: scaled(height, scale_factor),
        scale_factor,
    }
}

fn scaled(length: u32, factor: f64) -> u32 {
    let value = (f64::from(length) * factor).round();
    // `as` saturates, so huge enlargements clamp instead of wrapping.
    (value as u32).max(1)
}

/// Resamples `image` to the plan's target size. An identity plan returns the pixels
/// untouched so cell values equal the source exactly.
pub fn resize_to_plan(image: &RgbImage, plan: &ResizePlan) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if plan.is_identity(width, height) {
        return Ok(image.clone());
    }

    debug!(
        "Resizing image ({} x {}) to ({} x {})",
        width, height, plan.target_width, plan.target_height
    );

    match resize_with_fast_image_resize(image, plan.target_width, plan.target_height) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            warn!("fast_image_resize failed, falling back to image::resize_exact: {}", err);
            let resized = DynamicImage::ImageRgb8(image.clone()).resize_exact(
                plan.target_width,
                plan.target_height,
                FilterType::CatmullRom,
            );
            Ok(resized.to_rgb8())
        }
    }
}

fn resize_with_fast_image_resize(image: &RgbImage, target_width: u32, target_height: u32) -> Result<RgbImage> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ConversionError::DecodeError(format!("invalid source buffer: {}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ConversionError::DecodeError(format!("resize failed: {}", e)))?;

    RgbImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| ConversionError::DecodeError("resized buffer has unexpected length".to_string()))
}
