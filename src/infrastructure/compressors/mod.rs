pub mod jpeg;

use crate::domain::models::CompressorBox;

pub struct CompressorManager {}

impl CompressorManager {
    pub fn get() -> CompressorBox {
        return Box::<jpeg::JpegCompressor>::default();
    }
}
