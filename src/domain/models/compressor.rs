use async_trait::async_trait;

use super::CompressionError;
use super::CompressionOptions;
use super::ImageBlob;

#[async_trait]
pub trait Compressor: Send + Sync {
    /// Produces a compressed copy of `image` within the bounds of `options`.
    /// The input is left untouched.
    async fn compress(
        &self,
        image: &ImageBlob,
        options: &CompressionOptions,
    ) -> Result<ImageBlob, CompressionError>;
}

pub type CompressorBox = Box<dyn Compressor>;
