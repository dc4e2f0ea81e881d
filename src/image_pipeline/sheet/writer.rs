use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::sheet::document::GridDocument;

pub trait DocumentWriter {
    /// File extension of the produced documents, without the dot.
    fn extension(&self) -> &'static str;

    fn write_document(&self, document: &GridDocument, output: &mut dyn Write) -> Result<()>;
}
