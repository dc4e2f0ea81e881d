//! Source image decoding module
//!
//! This module turns encoded image bytes into a decoded source image, rejecting
//! oversized inputs before any pixel data is decoded.

mod reader;
mod standard_reader;
pub mod types;

pub use reader::SourceImageReader;
pub use standard_reader::StandardImageReader;
pub use types::SourceImage;
