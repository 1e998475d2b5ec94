use crate::index_pipeline::common::error::DecodeError;
use crate::index_pipeline::decode::types::RasterBuffer;

pub trait RasterDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<RasterBuffer, DecodeError>;
}
