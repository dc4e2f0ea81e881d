//! Image to spreadsheet pipeline module
//!
//! This module provides a structured approach to the conversion, with separate
//! modules for decoding, grid transformation, document composition and writing,
//! settings, and orchestration.

pub mod common;
pub mod config;
pub mod conversions;
pub mod decode;
pub mod sheet;
pub mod transform;

pub use common::{
    ConversionError,
    Result,
};

pub use config::{
    AppConfig,
    ConversionConfig,
    ConversionConfigBuilder,
    Preset,
};

pub use decode::{
    SourceImage,
    SourceImageReader,
    StandardImageReader,
};

pub use transform::{
    Channel,
    Grid,
    ResizePlan,
};

pub use sheet::{
    DocumentLayout,
    DocumentWriter,
    GradientRule,
    GridDocument,
    MetadataTable,
    XlsxDocumentWriter,
};

pub use conversions::{
    BatchConverter,
    BatchSummary,
    ConversionReport,
    ImageToSheetPipeline,
    Stage,
};
