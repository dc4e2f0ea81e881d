//! Image-to-grid transformation module
//!
//! Resize planning and application, the pixel/channel to column mapping, and
//! population of the cell value grid.

pub mod channel;
pub mod grid;
pub mod resize;

pub use channel::{Channel, column_of, pixel_of_column};
pub use grid::{Grid, populate};
pub use resize::{ResizePlan, plan, resize_to_plan};
