//! Pipeline conversions module
//!
//! This module contains the orchestration of an image to sheet conversion, its stage
//! timings and the batch runner.

mod batch;
mod image_to_sheet;
mod timing;

#[cfg(test)]
mod tests;

pub use batch::{BatchConverter, BatchSummary};
pub use image_to_sheet::{ConversionReport, ImageToSheetPipeline};
pub use timing::{PipelineTimings, Stage, StageTiming, Timer};
