#[cfg(test)]
#[path = "attachments_test.rs"]
mod tests;

use crate::domain::models::CompressionError;
use crate::domain::models::CompressionOptions;
use crate::domain::models::CompressorBox;
use crate::domain::models::ImageBlob;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Gatekeeper in front of the compression service. Only a complete,
/// in-bounds result ever leaves `prepare`.
pub struct AttachmentPreparer {
    compressor: CompressorBox,
    options: CompressionOptions,
}

impl AttachmentPreparer {
    pub fn new(compressor: CompressorBox, options: CompressionOptions) -> AttachmentPreparer {
        return AttachmentPreparer {
            compressor,
            options,
        };
    }

    pub fn validate(image: &ImageBlob) -> Result<(), CompressionError> {
        let ext = image.extension().unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(CompressionError::UnsupportedType(image.file_name.to_string()));
        }
        if image.is_empty() {
            return Err(CompressionError::Empty);
        }

        return Ok(());
    }

    pub async fn prepare(&self, image: &ImageBlob) -> Result<ImageBlob, CompressionError> {
        AttachmentPreparer::validate(image)?;

        let compressed = self.compressor.compress(image, &self.options).await?;
        if compressed.is_empty() {
            return Err(CompressionError::Empty);
        }

        let limit = self.options.max_bytes();
        if compressed.len() > limit {
            return Err(CompressionError::TooLarge {
                size: compressed.len(),
                limit,
            });
        }

        tracing::debug!(
            file_name = %compressed.file_name,
            original = image.len(),
            compressed = compressed.len(),
            "Compressed attachment"
        );

        return Ok(compressed);
    }
}
