use serde::{Deserialize, Serialize};

/// Named output sizes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Preset {
    Tiny,
    Small,
    Medium,
    Large,
}

/// Desired output size a preset stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresetSize {
    pub output_width: f64,
    pub output_height: f64,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Tiny => "tiny",
            Preset::Small => "small",
            Preset::Medium => "medium",
            Preset::Large => "large",
        }
    }

    pub fn builtin_size(self) -> PresetSize {
        let (output_width, output_height) = match self {
            Preset::Tiny => (80.0, 60.0),
            Preset::Small => (160.0, 120.0),
            Preset::Medium => (320.0, 240.0),
            Preset::Large => (640.0, 480.0),
        };
        PresetSize { output_width, output_height }
    }
}
