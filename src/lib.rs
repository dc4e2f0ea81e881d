//! Converts raster images into spreadsheet grids where every pixel spans
//! three cells, one per color channel, colored by gradient rules.

pub mod image_pipeline;
pub mod logger;
