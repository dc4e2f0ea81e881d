//! Sizing, view and metadata for the finished document.

use tracing::debug;

use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::sheet::address::{CellRange, MAX_COLUMNS};
use crate::image_pipeline::sheet::metadata::{
    DocumentFacts, FILE_SECTION, MetadataTable, SETTINGS_SECTION, format_percent,
    format_resolution, format_thousands, format_timestamp,
};
use crate::image_pipeline::transform::grid::Grid;

/// Zoom range a worksheet view accepts.
pub const MIN_ZOOM: u16 = 10;
pub const MAX_ZOOM: u16 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    /// Default height of every row, in points
    pub row_height: f64,
    /// Width shared by every image column, in character units
    pub column_width: f64,
    pub zoom_percent: u16,
    /// Number of image columns; columns past this one are hidden
    pub visible_columns: u32,
    /// Number of image rows; rows past this one are hidden
    pub visible_rows: u32,
    /// 1-based inclusive span of hidden trailing columns, if any remain
    pub hidden_columns: Option<(u32, u32)>,
    pub show_gridlines: bool,
    pub metadata: MetadataTable,
}

impl DocumentLayout {
    /// Cells holding the image, e.g. A1:I3.
    pub fn image_range(&self) -> Option<CellRange> {
        if self.visible_columns == 0 || self.visible_rows == 0 {
            return None;
        }
        Some(CellRange {
            first_column: 1,
            last_column: self.visible_columns,
            first_row: 1,
            last_row: self.visible_rows,
        })
    }
}

/// Assembles layout and metadata for `grid`.
pub fn compose(grid: &Grid, config: &ConversionConfig, facts: &DocumentFacts) -> DocumentLayout {
    let visible_columns = grid.columns();
    let hidden_columns = (visible_columns < MAX_COLUMNS).then(|| (visible_columns + 1, MAX_COLUMNS));

    let mut layout = DocumentLayout {
        row_height: config.output_row_height,
        column_width: config.output_col_width,
        zoom_percent: zoom_percent(config.output_zoom),
        visible_columns,
        visible_rows: grid.rows(),
        hidden_columns,
        show_gridlines: false,
        metadata: MetadataTable::new(),
    };
    layout.metadata = metadata_table(&layout, config, facts);

    debug!(
        "Layout: {} columns x {} rows, zoom {}%, hidden columns {:?}",
        layout.visible_columns, layout.visible_rows, layout.zoom_percent, layout.hidden_columns
    );
    layout
}

fn zoom_percent(zoom: f64) -> u16 {
    if !zoom.is_finite() {
        return 100;
    }
    zoom.round().clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM)) as u16
}

fn metadata_table(layout: &DocumentLayout, config: &ConversionConfig, facts: &DocumentFacts) -> MetadataTable {
    let source = &facts.source;
    let output = facts.output_path.display().to_string();

    let mut table = MetadataTable::new();
    table.heading(FILE_SECTION);
    table.push("Image File", source.path.display().to_string());
    table.push("File Size", format_thousands(source.byte_size));
    table.push("Format", source.format.clone());
    table.push("Original Resolution (W x H)", format_resolution(source.width, source.height));
    table.push("Resizing Factor", format_percent(facts.plan.scale_factor));
    table.push(
        "Resized Resolution (W x H)",
        format_resolution(facts.plan.target_width, facts.plan.target_height),
    );
    if let Some(range) = layout.image_range() {
        table.push("Spreadsheet Range", range.to_string());
    }
    table.push("Spreadsheet File", output.clone());
    table.push("Generated at", format_timestamp(&facts.generated_at));

    table.blank();
    table.heading(SETTINGS_SECTION);
    table.push("input_file", source.path.display().to_string());
    table.push("output_file", output);
    for (key, value) in config.entries() {
        table.push(key, value);
    }
    table
}
