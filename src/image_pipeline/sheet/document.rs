use crate::image_pipeline::sheet::gradient::GradientRule;
use crate::image_pipeline::sheet::layout::DocumentLayout;
use crate::image_pipeline::transform::grid::Grid;

pub const IMAGE_SHEET: &str = "Image";
pub const INFO_SHEET: &str = "Information";

/// A finished in-memory document, ready to be persisted once.
#[derive(Debug, Clone)]
pub struct GridDocument {
    pub grid: Grid,
    pub rules: Vec<GradientRule>,
    pub layout: DocumentLayout,
}
