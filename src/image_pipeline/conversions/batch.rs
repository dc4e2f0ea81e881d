//! Runs the pipeline over a single file or every file in a directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::image_to_sheet::ImageToSheetPipeline;
use crate::image_pipeline::decode::SourceImageReader;
use crate::image_pipeline::sheet::DocumentWriter;

/// Aggregate counters for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub files_seen: usize,
    pub files_processed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// "2 minutes, 5 seconds"; minutes are omitted when zero.
    pub fn elapsed_text(&self) -> String {
        let total = self.elapsed.as_secs();
        let (minutes, seconds) = (total / 60, total % 60);
        if minutes > 0 {
            format!("{} minutes, {} seconds", minutes, seconds)
        } else {
            format!("{} seconds", seconds)
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files seen: {}, files processed: {}, elapsed time: {}",
            self.files_seen,
            self.files_processed,
            self.elapsed_text()
        )
    }
}

/// Regular files directly inside `dir`, sorted by name. Subdirectories are skipped.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ConversionError::from_input_io(dir, e))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub struct BatchConverter<'a, R: SourceImageReader, W: DocumentWriter> {
    pipeline: &'a ImageToSheetPipeline<R, W>,
}

impl<'a, R: SourceImageReader, W: DocumentWriter> BatchConverter<'a, R, W> {
    pub fn new(pipeline: &'a ImageToSheetPipeline<R, W>) -> Self {
        Self { pipeline }
    }

    /// Pairs each input file with its destination.
    ///
    /// A file input keeps `output` as given. A directory input converts its files;
    /// `output`, if given, must be an existing directory receiving `<stem>.<ext>` files.
    pub fn plan_jobs(&self, input: &Path, output: Option<&Path>) -> Result<Vec<(PathBuf, Option<PathBuf>)>> {
        if input.is_file() {
            return Ok(vec![(input.to_path_buf(), output.map(Path::to_path_buf))]);
        }
        if !input.is_dir() {
            return Err(ConversionError::InputNotFound(format!(
                "{} (verify the path is valid)",
                input.display()
            )));
        }

        if let Some(dir) = output {
            if !dir.is_dir() {
                return Err(ConversionError::OutputPathNotFound(format!(
                    "batch output target {} does not exist or is not a directory",
                    dir.display()
                )));
            }
        }

        info!("Batch processing image files in \"{}\"", input.display());
        let jobs = list_files(input)?
            .into_iter()
            .map(|file| {
                let destination = output.map(|dir| {
                    let derived = self.pipeline.derive_output_path(&file);
                    match derived.file_name() {
                        Some(name) => dir.join(name),
                        None => dir.to_path_buf(),
                    }
                });
                (file, destination)
            })
            .collect();
        Ok(jobs)
    }

    /// Converts every planned file. A failing file is reported and counted as seen but
    /// not processed; the remaining files still run.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<BatchSummary> {
        let start = Instant::now();
        let jobs = self.plan_jobs(input, output)?;

        let mut summary = BatchSummary::default();
        for (file, destination) in jobs {
            summary.files_seen += 1;
            match self.pipeline.convert_file(&file, destination.as_deref()) {
                Ok(_) => summary.files_processed += 1,
                Err(e) if e.is_output() => {
                    error!("Could not save output for \"{}\": {}", file.display(), e)
                }
                Err(e) => error!("Skipping \"{}\": {}", file.display(), e),
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }
}
