//! Conversion configuration types

use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::preset::{Preset, PresetSize};

/// Largest source image accepted before decoding (6000 x 4000).
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 24_000_000;

/// Fully resolved settings for one run. Every component reads its values from here;
/// nothing is looked up from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Desired output width in pixels (each pixel becomes three columns)
    pub output_width: f64,
    /// Desired output height in pixels (one row per pixel)
    pub output_height: f64,
    /// Initial zoom of the image sheet, in percent
    pub output_zoom: f64,
    /// Width applied to every image column, in character units
    pub output_col_width: f64,
    /// Height applied to every image row, in points
    pub output_row_height: f64,
    /// Whether images smaller than the desired size may be enlarged
    pub enlarge: bool,
    /// Sources with more pixels than this are rejected before decoding
    pub max_image_pixels: u64,
    /// Preset whose size was applied, if any. Only set through [`Self::apply_preset`].
    #[serde(skip)]
    pub preset: Option<Preset>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_width: 320.0,
            output_height: 240.0,
            output_zoom: 100.0,
            output_col_width: 0.33,
            output_row_height: 9.0,
            enlarge: false,
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
            preset: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    /// Replaces the desired output size with a preset's.
    pub fn apply_preset(&mut self, preset: Preset, size: PresetSize) {
        self.preset = Some(preset);
        self.output_width = size.output_width;
        self.output_height = size.output_height;
    }

    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("output_width", self.output_width),
            ("output_height", self.output_height),
            ("output_zoom", self.output_zoom),
            ("output_col_width", self.output_col_width),
            ("output_row_height", self.output_row_height),
        ];
        for (name, value) in numeric {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConversionError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.max_image_pixels == 0 {
            return Err(ConversionError::InvalidConfig(
                "max_image_pixels must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective settings as (key, value) pairs, in a stable order.
    pub fn entries(&self) -> Vec<(String, String)> {
        vec![
            ("output_width".to_string(), self.output_width.to_string()),
            ("output_height".to_string(), self.output_height.to_string()),
            ("output_zoom".to_string(), self.output_zoom.to_string()),
            ("output_col_width".to_string(), self.output_col_width.to_string()),
            ("output_row_height".to_string(), self.output_row_height.to_string()),
            ("enlarge".to_string(), self.enlarge.to_string()),
            ("max_image_pixels".to_string(), self.max_image_pixels.to_string()),
            ("preset".to_string(), self.preset.map_or("none", Preset::name).to_string()),
        ]
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    output_width: Option<f64>,
    output_height: Option<f64>,
    output_zoom: Option<f64>,
    output_col_width: Option<f64>,
    output_row_height: Option<f64>,
    enlarge: Option<bool>,
    max_image_pixels: Option<u64>,
}

impl ConversionConfigBuilder {
    pub fn output_size(mut self, width: f64, height: f64) -> Self {
        self.output_width = Some(width);
        self.output_height = Some(height);
        self
    }

    pub fn output_zoom(mut self, zoom: f64) -> Self {
        self.output_zoom = Some(zoom);
        self
    }

    pub fn output_col_width(mut self, width: f64) -> Self {
        self.output_col_width = Some(width);
        self
    }

    pub fn output_row_height(mut self, height: f64) -> Self {
        self.output_row_height = Some(height);
        self
    }

    pub fn enlarge(mut self, enable: bool) -> Self {
        self.enlarge = Some(enable);
        self
    }

    pub fn max_image_pixels(mut self, limit: u64) -> Self {
        self.max_image_pixels = Some(limit);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            output_width: self.output_width.unwrap_or(default.output_width),
            output_height: self.output_height.unwrap_or(default.output_height),
            output_zoom: self.output_zoom.unwrap_or(default.output_zoom),
            output_col_width: self.output_col_width.unwrap_or(default.output_col_width),
            output_row_height: self.output_row_height.unwrap_or(default.output_row_height),
            enlarge: self.enlarge.unwrap_or(default.enlarge),
            max_image_pixels: self.max_image_pixels.unwrap_or(default.max_image_pixels),
            preset: default.preset,
        }
    }
}
