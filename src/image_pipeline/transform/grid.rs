//! Cell value grid populated from an RGB image.

use image::RgbImage;

use crate::image_pipeline::transform::channel::{CHANNELS_PER_PIXEL, Channel, column_of};

/// Channel intensities laid out as `3 * width` columns by `height` rows, row-major.
/// Filled once by [`populate`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<u8>,
}

impl Grid {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Value at 0-based (`column`, `row`), if inside the grid.
    pub fn get(&self, column: u32, row: u32) -> Option<u8> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(self.offset(column, row)).copied()
    }

    /// Iterates rows top to bottom as slices of `columns()` values.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; an empty grid has no cells to chunk anyway.
        self.cells.chunks_exact(self.columns.max(1) as usize)
    }

    fn offset(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }
}

/// Builds the grid for an RGB image. Each pixel is read once and written to its
/// three channel columns.
pub fn populate(image: &RgbImage) -> Grid {
    let (width, height) = image.dimensions();
    let columns = width * CHANNELS_PER_PIXEL;
    let mut grid = Grid {
        columns,
        rows: height,
        cells: vec![0; columns as usize * height as usize],
    };

    for (x, y, pixel) in image.enumerate_pixels() {
        let [red, green, blue] = pixel.0;
        for (channel, value) in Channel::ALL.into_iter().zip([red, green, blue]) {
            let offset = grid.offset(column_of(x, channel), y);
            grid.cells[offset] = value;
        }
    }

    grid
}
