use tracing::debug;

use crate::index_pipeline::common::error::DecodeError;
use crate::index_pipeline::decode::image_reader::ImageCrateDecoder;
use crate::index_pipeline::decode::rawloader_reader::CameraRawDecoder;
use crate::index_pipeline::decode::reader::RasterDecoder;
use crate::index_pipeline::decode::tiff_reader::TiffRasterDecoder;
use crate::index_pipeline::decode::types::RasterBuffer;

/// Decoder that picks a backend from the byte signature.
///
/// Most camera RAW containers are TIFF files underneath, so TIFF-signed input goes to
/// the RAW decoder first and falls back to the plain TIFF decoder when rawloader does
/// not recognize the camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoDecoder {
    image: ImageCrateDecoder,
    tiff: TiffRasterDecoder,
    raw: CameraRawDecoder,
}

impl AutoDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_tiff_signature(data: &[u8]) -> bool {
    const SIGNATURES: [&[u8]; 4] = [b"II*\0", b"MM\0*", b"II+\0", b"MM\0+"];
    SIGNATURES.iter().any(|sig| data.starts_with(sig))
}

impl RasterDecoder for AutoDecoder {
    fn decode(&self, data: &[u8]) -> Result<RasterBuffer, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::UnsupportedFormat("empty input".to_string()));
        }

        if has_tiff_signature(data) {
            match self.raw.decode(data) {
                Ok(raster) => return Ok(raster),
                Err(e) => debug!("Not a camera RAW container ({}), decoding as TIFF", e),
            }
            return self.tiff.decode(data);
        }

        if image::guess_format(data).is_ok() {
            return self.image.decode(data);
        }

        self.raw.decode(data).map_err(|e| {
            debug!("RAW fallback failed: {}", e);
            DecodeError::UnsupportedFormat("unrecognized image signature".to_string())
        })
    }
}
