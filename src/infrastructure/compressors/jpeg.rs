#[cfg(test)]
#[path = "jpeg_test.rs"]
mod tests;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ColorType;
use image::DynamicImage;
use image::GenericImageView;

use crate::domain::models::CompressionError;
use crate::domain::models::CompressionOptions;
use crate::domain::models::Compressor;
use crate::domain::models::ImageBlob;

const QUALITY_STEP: u8 = 10;
const MIN_QUALITY: u8 = 10;

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CompressionError> {
    let rgb = image.to_rgb8();
    let mut buf: Vec<u8> = vec![];
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|err| return CompressionError::Service(err.to_string()))?;

    return Ok(buf);
}

/// Downscales to fit the size bound, then re-encodes as JPEG, lowering the
/// quality until the output fits the byte budget.
fn compress_blocking(
    blob: &ImageBlob,
    options: &CompressionOptions,
) -> Result<ImageBlob, CompressionError> {
    let mut decoded = image::load_from_memory(&blob.bytes)
        .map_err(|err| return CompressionError::Service(err.to_string()))?;

    let (width, height) = decoded.dimensions();
    let bound = options.max_width_or_height.max(1);
    if width > bound || height > bound {
        decoded = decoded.resize(bound, bound, FilterType::Triangle);
    }

    let limit = options.max_bytes();
    let mut quality = options.quality.clamp(MIN_QUALITY, 100);
    let mut encoded = encode_jpeg(&decoded, quality)?;
    while encoded.len() > limit && quality > MIN_QUALITY {
        quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
        encoded = encode_jpeg(&decoded, quality)?;
    }

    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        quality,
        bytes = encoded.len(),
        "Encoded attachment"
    );

    return Ok(ImageBlob::new(&format!("{}.jpg", blob.stem()), encoded));
}

#[derive(Default)]
pub struct JpegCompressor {}

#[async_trait]
impl Compressor for JpegCompressor {
    #[allow(clippy::implicit_return)]
    async fn compress(
        &self,
        blob: &ImageBlob,
        options: &CompressionOptions,
    ) -> Result<ImageBlob, CompressionError> {
        let blob = blob.clone();
        let options = options.clone();

        return tokio::task::spawn_blocking(move || return compress_blocking(&blob, &options))
            .await
            .map_err(|err| return CompressionError::Service(err.to_string()))?;
    }
}
