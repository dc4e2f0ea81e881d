use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    config::ConversionConfig,
    conversions::timing::{PipelineTimings, Stage, Timer},
    decode::{SourceImageReader, StandardImageReader},
    sheet::{self, DocumentFacts, DocumentWriter, GridDocument, MAX_COLUMNS, MAX_ROWS, SourceFacts, XlsxDocumentWriter},
    transform::{self, ResizePlan, channel::CHANNELS_PER_PIXEL},
};

/// Outcome of one successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: (u32, u32),
    pub resized_size: (u32, u32),
    pub scale_factor: f64,
    /// Final orchestrator state; always [`Stage::Done`] for a returned report.
    pub stage: Stage,
    pub timings: PipelineTimings,
}

struct BuiltDocument {
    document: GridDocument,
    original_size: (u32, u32),
    plan: ResizePlan,
}

/// Converts one image at a time into a grid document. Holds no per-image state, so a
/// pipeline can be reused for any number of files.
pub struct ImageToSheetPipeline<R: SourceImageReader, W: DocumentWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl ImageToSheetPipeline<StandardImageReader, XlsxDocumentWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: StandardImageReader,
            writer: XlsxDocumentWriter,
            config,
        }
    }
}

/// Runs one stage inside its own span, recording its duration. A failing stage moves
/// the conversion to [`Stage::Failed`]; nothing is retried.
fn run_stage<T>(stage: Stage, timings: &mut PipelineTimings, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _span = tracing::info_span!("stage", name = stage.name()).entered();
    let timer = Timer::start(stage);
    let result = f();
    let (stage, duration) = timer.stop();
    timings.add_stage(stage, duration);
    if let Err(e) = &result {
        warn!("{} -> {}: {}", stage, Stage::Failed, e);
    }
    result
}

fn temp_path_for(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_path.with_file_name(format!(".{}.tmp", name))
}

fn output_error(output_path: &Path, err: ConversionError) -> ConversionError {
    match err {
        ConversionError::IoError(io) => ConversionError::from_output_io(output_path, io),
        other => other,
    }
}

impl<R: SourceImageReader, W: DocumentWriter> ImageToSheetPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.config.max_image_pixels {
            warn!(
                "Image dimensions {}x{} exceed the {} pixel limit",
                width, height, self.config.max_image_pixels
            );
            return Err(ConversionError::ImageTooLarge {
                pixels,
                limit: self.config.max_image_pixels,
            });
        }

        Ok(())
    }

    fn validate_grid(plan: &ResizePlan) -> Result<()> {
        let columns = u64::from(plan.target_width) * u64::from(CHANNELS_PER_PIXEL);
        let rows = u64::from(plan.target_height);
        if columns > u64::from(MAX_COLUMNS) || rows > u64::from(MAX_ROWS) {
            return Err(ConversionError::GridTooLarge { columns, rows });
        }
        Ok(())
    }

    /// Default destination: the input path with the writer's file extension.
    pub fn derive_output_path(&self, input_path: &Path) -> PathBuf {
        input_path.with_extension(self.writer.extension())
    }

    fn build_document(
        &self,
        input_path: &Path,
        input_data: &[u8],
        output_path: &Path,
        timings: &mut PipelineTimings,
    ) -> Result<BuiltDocument> {
        let source = run_stage(Stage::Loading, timings, || {
            let source = self.reader.read_image(input_data, &self.config)?;
            self.validate_dimensions(source.width(), source.height())?;
            Ok(source)
        })?;
        let original_size = (source.width(), source.height());

        let plan = run_stage(Stage::Planning, timings, || {
            let plan = transform::plan(
                original_size.0,
                original_size.1,
                self.config.output_width,
                self.config.output_height,
                self.config.enlarge,
            );
            Self::validate_grid(&plan)?;
            Ok(plan)
        })?;

        info!(
            "Resizing image ({} x {}) to ({} x {})...",
            original_size.0, original_size.1, plan.target_width, plan.target_height
        );

        let resized = run_stage(Stage::Normalizing, timings, || {
            transform::resize_to_plan(&source.to_rgb(), &plan)
        })?;

        let grid = run_stage(Stage::Populating, timings, || Ok(transform::populate(&resized)))?;
        drop(resized);

        let document = run_stage(Stage::StylingMetadata, timings, || {
            let facts = DocumentFacts {
                source: SourceFacts {
                    path: input_path.to_path_buf(),
                    byte_size: input_data.len() as u64,
                    format: source.format.clone(),
                    width: original_size.0,
                    height: original_size.1,
                },
                plan,
                output_path: output_path.to_path_buf(),
                generated_at: Local::now(),
            };
            let rules = sheet::generate(grid.columns(), grid.rows());
            let layout = sheet::compose(&grid, &self.config, &facts);
            Ok(GridDocument { grid, rules, layout })
        })?;

        Ok(BuiltDocument {
            document,
            original_size,
            plan,
        })
    }

    fn report(input_path: &Path, output_path: &Path, built: &BuiltDocument, timings: PipelineTimings) -> ConversionReport {
        ConversionReport {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            original_size: built.original_size,
            resized_size: (built.plan.target_width, built.plan.target_height),
            scale_factor: built.plan.scale_factor,
            stage: Stage::Done,
            timings,
        }
    }

    /// Converts already loaded image bytes and writes the document to `output`.
    /// `input_path` and `output_path` are only reported in the document's metadata.
    pub fn convert(
        &self,
        input_path: &Path,
        input_data: &[u8],
        output_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ConversionReport> {
        info!("Starting image to sheet conversion");
        let mut timings = PipelineTimings::new();

        let built = self.build_document(input_path, input_data, output_path, &mut timings)?;

        run_stage(Stage::Persisting, &mut timings, || {
            self.writer.write_document(&built.document, output)
        })?;
        info!("{} -> {}", Stage::Persisting, Stage::Done);

        let report = Self::report(input_path, output_path, &built, timings);
        info!(
            "Conversion complete: {}x{} in {:.3}ms",
            report.resized_size.0,
            report.resized_size.1,
            report.timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    /// Converts the image at `input_path`. Without an explicit `output_path` the document
    /// is written next to the input (see [`Self::derive_output_path`]).
    ///
    /// The document is written to a temporary sibling file and renamed into place, so a
    /// failed write never leaves a partial document at the destination.
    #[instrument(skip(self, input_path, output_path), fields(input = %input_path.display()))]
    pub fn convert_file(&self, input_path: &Path, output_path: Option<&Path>) -> Result<ConversionReport> {
        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.derive_output_path(input_path));
        let mut timings = PipelineTimings::new();

        info!("Loading image file \"{}\"...", input_path.display());
        let input_data = run_stage(Stage::Loading, &mut timings, || {
            std::fs::read(input_path).map_err(|e| ConversionError::from_input_io(input_path, e))
        })?;

        let built = self.build_document(input_path, &input_data, &output_path, &mut timings)?;
        drop(input_data);

        run_stage(Stage::Persisting, &mut timings, || {
            info!("Saving spreadsheet to \"{}\"...", output_path.display());
            self.persist(&built.document, &output_path)
        })?;
        info!("{} -> {}", Stage::Persisting, Stage::Done);

        let report = Self::report(input_path, &output_path, &built, timings);
        report.timings.log_summary();
        info!(
            "Conversion complete: {} -> {}",
            report.input_path.display(),
            report.output_path.display()
        );
        Ok(report)
    }

    fn persist(&self, document: &GridDocument, output_path: &Path) -> Result<()> {
        let temp_path = temp_path_for(output_path);
        let result = self.write_and_rename(document, &temp_path, output_path);
        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        result
    }

    fn write_and_rename(&self, document: &GridDocument, temp_path: &Path, output_path: &Path) -> Result<()> {
        let file = File::create(temp_path).map_err(|e| ConversionError::from_output_io(output_path, e))?;
        let mut output = BufWriter::new(file);

        self.writer
            .write_document(document, &mut output)
            .map_err(|e| output_error(output_path, e))?;

        let file = output
            .into_inner()
            .map_err(|e| ConversionError::from_output_io(output_path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| ConversionError::from_output_io(output_path, e))?;
        drop(file);

        std::fs::rename(temp_path, output_path).map_err(|e| ConversionError::from_output_io(output_path, e))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
