//! JSON configuration file support.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::preset::{Preset, PresetSize};
use crate::image_pipeline::config::types::ConversionConfig;

/// Contents of a configuration file: default settings plus the preset table.
///
/// ```json
/// { "output_width": 200, "output_zoom": 75, "presets": { "small": { "output_width": 100, "output_height": 75 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub defaults: ConversionConfig,
    pub presets: BTreeMap<String, PresetSize>,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::ConfigFileError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&content)
            .map_err(|e| ConversionError::ConfigFileError(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Size for `preset`, preferring the file's table over the built-in one.
    pub fn preset_size(&self, preset: Preset) -> PresetSize {
        self.presets
            .get(preset.name())
            .copied()
            .unwrap_or_else(|| preset.builtin_size())
    }
}
