use std::path::{Path, PathBuf};

use clap::Parser;
use image2sheet::image_pipeline::{AppConfig, BatchConverter, ConversionConfig, ImageToSheetPipeline, Preset};
use image2sheet::logger;

use tracing::info;

/// Loaded when present and no --config is given.
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Converts an image file to a spreadsheet representation using conditional formatting rules.
///
/// If INPUT_FILE is a directory, every image directly inside it is converted (batch mode).
/// In batch mode OUTPUT_FILE, when given, must be an existing directory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input image file or directory
    input_file: PathBuf,

    /// Output file or directory, defaults to <input_file>.xlsx
    output_file: Option<PathBuf>,

    /// Initial zoom of the image sheet, in percent
    #[arg(long)]
    output_zoom: Option<f64>,

    /// Width of each spreadsheet column
    #[arg(long)]
    output_col_width: Option<f64>,

    /// Height of each spreadsheet row
    #[arg(long)]
    output_row_height: Option<f64>,

    /// Image output width (px)
    #[arg(long)]
    output_width: Option<f64>,

    /// Image output height (px)
    #[arg(long)]
    output_height: Option<f64>,

    /// Allow smaller images to be enlarged; otherwise images are only reduced
    #[arg(long, overrides_with = "no_enlarge")]
    enlarge: bool,

    /// Never enlarge images
    #[arg(long)]
    no_enlarge: bool,

    /// Use preset output dimensions (overrides --output-width and --output-height)
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Reject images with more pixels than this
    #[arg(long)]
    max_image_pixels: Option<u64>,

    /// JSON configuration file with default settings and presets
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_app_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Ok(AppConfig::load(DEFAULT_CONFIG_FILE)?),
        None => Ok(AppConfig::default()),
    }
}

fn resolve_config(args: &Args, app: &AppConfig) -> anyhow::Result<ConversionConfig> {
    let mut config = app.defaults.clone();

    if let Some(value) = args.output_zoom {
        config.output_zoom = value;
    }
    if let Some(value) = args.output_col_width {
        config.output_col_width = value;
    }
    if let Some(value) = args.output_row_height {
        config.output_row_height = value;
    }
    if let Some(value) = args.output_width {
        config.output_width = value;
    }
    if let Some(value) = args.output_height {
        config.output_height = value;
    }
    if let Some(value) = args.max_image_pixels {
        config.max_image_pixels = value;
    }
    if args.enlarge {
        config.enlarge = true;
    }
    if args.no_enlarge {
        config.enlarge = false;
    }
    if let Some(preset) = args.preset {
        info!("Using \"{}\" preset.", preset.name());
        config.apply_preset(preset, app.preset_size(preset));
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    info!("image2sheet: converts an image file into a spreadsheet of individual Red, Green, Blue cells.");

    let app = load_app_config(args.config.as_deref())?;
    let config = resolve_config(&args, &app)?;
    info!(
        "Output size {} x {}, zoom {}%, enlarge {}",
        config.output_width, config.output_height, config.output_zoom, config.enlarge
    );

    let pipeline = ImageToSheetPipeline::new(config);
    let summary = BatchConverter::new(&pipeline).run(&args.input_file, args.output_file.as_deref())?;

    info!("Files seen: {}", summary.files_seen);
    info!("Files processed: {}", summary.files_processed);
    info!("Elapsed time: {}", summary.elapsed_text());

    Ok(())
}
