//! Per-channel two-stop gradient rules.

use crate::image_pipeline::sheet::address::CellRange;
use crate::image_pipeline::transform::channel::{Channel, pixel_of_column};

pub const LOW_VALUE: u8 = 0;
pub const HIGH_VALUE: u8 = 255;
pub const LOW_COLOR: u32 = 0x000000;

/// Colors cells from black at 0 to the channel's pure color at 255. One rule covers
/// every column of its channel through a multi-range selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientRule {
    pub channel: Channel,
    pub low_value: u8,
    pub low_color: u32,
    pub high_value: u8,
    pub high_color: u32,
    /// One full-height range per channel column, left to right.
    pub ranges: Vec<CellRange>,
}

impl GradientRule {
    fn new(channel: Channel) -> Self {
        Self {
            channel,
            low_value: LOW_VALUE,
            low_color: LOW_COLOR,
            high_value: HIGH_VALUE,
            high_color: channel.color(),
            ranges: Vec::new(),
        }
    }

    /// Space separated ranges, e.g. "A1:A2 D1:D2".
    pub fn selector(&self) -> String {
        self.ranges
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Smallest block enclosing every range of the rule.
    pub fn bounds(&self) -> Option<CellRange> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        Some(CellRange {
            first_column: first.first_column,
            last_column: last.last_column,
            first_row: first.first_row,
            last_row: first.last_row,
        })
    }
}

/// Builds the gradient rules for a `grid_columns` x `grid_rows` grid, in channel order.
/// Columns of one channel are never adjacent, so each gets its own single-column range.
/// Channels without any column (narrow or empty grids) produce no rule.
pub fn generate(grid_columns: u32, grid_rows: u32) -> Vec<GradientRule> {
    let mut rules = Channel::ALL.map(GradientRule::new);

    if grid_rows > 0 {
        for column in 0..grid_columns {
            let (_, channel) = pixel_of_column(column);
            rules[channel.index() as usize]
                .ranges
                .push(CellRange::column(column + 1, grid_rows));
        }
    }

    rules.into_iter().filter(|rule| !rule.ranges.is_empty()).collect()
}
