use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::decode::types::SourceImage;

pub trait SourceImageReader {
    fn read_image(&self, data: &[u8], config: &ConversionConfig) -> Result<SourceImage>;
}
