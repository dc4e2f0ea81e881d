//! The Information sheet: facts about the source image and the settings used.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::image_pipeline::transform::resize::ResizePlan;

pub const FILE_SECTION: &str = "File & Image Properties:";
pub const SETTINGS_SECTION: &str = "Program Arguments & Configuration:";
const TIMESTAMP_FORMAT: &str = "%b %d %Y %I:%M:%S %p";

/// Ordered (label, value) rows. Headings are rows with an empty value and an empty
/// row separates sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    rows: Vec<(String, String)>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push((label.into(), value.into()));
    }

    pub fn heading(&mut self, title: &str) {
        self.push(title, "");
    }

    pub fn blank(&mut self) {
        self.push("", "");
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Value of the first row labelled `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What was known about the source before it was transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFacts {
    pub path: PathBuf,
    pub byte_size: u64,
    pub format: String,
    pub width: u32,
    pub height: u32,
}

/// Everything the Information sheet reports besides the settings themselves.
#[derive(Debug, Clone)]
pub struct DocumentFacts {
    pub source: SourceFacts,
    pub plan: ResizePlan,
    pub output_path: PathBuf,
    pub generated_at: DateTime<Local>,
}

/// 1234567 -> "1,234,567"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 0.5 -> "50.0%"
pub fn format_percent(factor: f64) -> String {
    format!("{:.1}%", factor * 100.0)
}

pub fn format_resolution(width: u32, height: u32) -> String {
    format!("{} x {}", width, height)
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
