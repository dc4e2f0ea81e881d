use std::io::Write;

use rust_xlsxwriter::{Color, ConditionalFormat2ColorScale, ConditionalFormatType, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::sheet::document::{GridDocument, IMAGE_SHEET, INFO_SHEET};
use crate::image_pipeline::sheet::gradient::GradientRule;
use crate::image_pipeline::sheet::writer::DocumentWriter;

/// Width of the label and value columns on the Information sheet.
const INFO_COLUMN_WIDTH: f64 = 35.0;
/// Information rows start on the third row.
const INFO_FIRST_ROW: u32 = 2;

pub struct XlsxDocumentWriter;

impl XlsxDocumentWriter {
    fn write_image_sheet(worksheet: &mut Worksheet, document: &GridDocument) -> std::result::Result<(), XlsxError> {
        let layout = &document.layout;
        worksheet.set_name(IMAGE_SHEET)?;

        // Sheet-wide defaults instead of per-row and per-column settings.
        worksheet.set_default_row_height(layout.row_height);
        worksheet.hide_unused_rows(true);
        worksheet.set_screen_gridlines(layout.show_gridlines);
        worksheet.set_zoom(layout.zoom_percent);

        if layout.visible_columns > 0 {
            worksheet.set_column_range_width(0, (layout.visible_columns - 1) as u16, layout.column_width)?;
        }
        if let Some((first, last)) = layout.hidden_columns {
            worksheet.set_column_range_hidden((first - 1) as u16, (last - 1) as u16)?;
        }

        for (row, values) in document.grid.rows_iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                worksheet.write_number(row as u32, column as u16, value)?;
            }
        }

        for rule in &document.rules {
            Self::add_gradient_rule(worksheet, rule)?;
        }
        Ok(())
    }

    fn add_gradient_rule(worksheet: &mut Worksheet, rule: &GradientRule) -> std::result::Result<(), XlsxError> {
        let Some(bounds) = rule.bounds() else {
            return Ok(());
        };

        let format = ConditionalFormat2ColorScale::new()
            .set_minimum(ConditionalFormatType::Number, i32::from(rule.low_value))
            .set_maximum(ConditionalFormatType::Number, i32::from(rule.high_value))
            .set_minimum_color(Color::RGB(rule.low_color))
            .set_maximum_color(Color::RGB(rule.high_color))
            .set_multi_range(rule.selector());

        debug!("{} gradient over {} ranges", rule.channel.name(), rule.ranges.len());

        worksheet.add_conditional_format(
            bounds.first_row - 1,
            (bounds.first_column - 1) as u16,
            bounds.last_row - 1,
            (bounds.last_column - 1) as u16,
            &format,
        )?;
        Ok(())
    }

    fn write_info_sheet(worksheet: &mut Worksheet, document: &GridDocument) -> std::result::Result<(), XlsxError> {
        worksheet.set_name(INFO_SHEET)?;
        worksheet.set_column_width(0, INFO_COLUMN_WIDTH)?;
        worksheet.set_column_width(1, INFO_COLUMN_WIDTH)?;

        for (offset, (label, value)) in document.layout.metadata.rows().iter().enumerate() {
            let row = INFO_FIRST_ROW + offset as u32;
            if !label.is_empty() {
                worksheet.write_string(row, 0, label)?;
            }
            if !value.is_empty() {
                worksheet.write_string(row, 1, value)?;
            }
        }
        Ok(())
    }

    fn build_workbook(document: &GridDocument) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let image_sheet = workbook.add_worksheet();
        Self::write_image_sheet(image_sheet, document)?;

        let info_sheet = workbook.add_worksheet();
        Self::write_info_sheet(info_sheet, document)?;

        workbook.save_to_buffer()
    }
}

impl DocumentWriter for XlsxDocumentWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write_document(&self, document: &GridDocument, output: &mut dyn Write) -> Result<()> {
        debug!(
            "Encoding workbook: {} x {} cells, {} gradient rules",
            document.grid.columns(),
            document.grid.rows(),
            document.rules.len()
        );

        let buffer = Self::build_workbook(document)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Workbook encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
