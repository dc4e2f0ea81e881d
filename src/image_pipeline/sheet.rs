//! Spreadsheet document module
//!
//! Gradient rules, layout and metadata for the grid, and the writer that persists
//! the finished document as an xlsx workbook.

pub mod address;
pub mod document;
pub mod gradient;
pub mod layout;
pub mod metadata;
mod writer;
mod xlsx_writer;

pub use address::{CellRange, MAX_COLUMNS, MAX_ROWS, column_name};
pub use document::{GridDocument, IMAGE_SHEET, INFO_SHEET};
pub use gradient::{GradientRule, generate};
pub use layout::{DocumentLayout, compose};
pub use metadata::{DocumentFacts, MetadataTable, SourceFacts};
pub use writer::DocumentWriter;
pub use xlsx_writer::XlsxDocumentWriter;
