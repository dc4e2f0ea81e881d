//! Conversion settings module
//!
//! This module resolves the settings a conversion runs with: built-in defaults,
//! an optional JSON configuration file, and named size presets.

mod types;
mod preset;
mod file;

pub use types::{ConversionConfig, ConversionConfigBuilder, DEFAULT_MAX_IMAGE_PIXELS};
pub use preset::{Preset, PresetSize};
pub use file::AppConfig;
