use std::fmt;
use std::path;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// An image as raw bytes plus the file name it travels under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> ImageBlob {
        return ImageBlob {
            file_name: file_name.to_string(),
            bytes,
        };
    }

    pub fn extension(&self) -> Option<String> {
        return path::Path::new(&self.file_name)
            .extension()
            .map(|ext| return ext.to_string_lossy().to_lowercase());
    }

    pub fn stem(&self) -> String {
        return path::Path::new(&self.file_name)
            .file_stem()
            .map(|stem| return stem.to_string_lossy().to_string())
            .unwrap_or_else(|| return "image".to_string());
    }

    pub fn len(&self) -> usize {
        return self.bytes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.bytes.is_empty();
    }

    pub fn reference(&self) -> AttachmentRef {
        return AttachmentRef {
            file_name: self.file_name.to_string(),
            size_bytes: self.bytes.len() as u64,
        };
    }
}

/// What a user message remembers about its attachment. Enough to show a
/// preview line, never the image itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub file_name: String,
    pub size_bytes: u64,
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.size_bytes as f64;
        if size >= 1024.0 * 1024.0 {
            return write!(f, "{} ({:.1} MB)", self.file_name, size / 1024.0 / 1024.0);
        }
        if size >= 1024.0 {
            return write!(f, "{} ({:.1} KB)", self.file_name, size / 1024.0);
        }
        return write!(f, "{} ({} B)", self.file_name, self.size_bytes);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompressionOptions {
    pub max_size_mb: f64,
    pub max_width_or_height: u32,
    pub quality: u8,
}

impl Default for CompressionOptions {
    fn default() -> CompressionOptions {
        return CompressionOptions {
            max_size_mb: 2.0,
            max_width_or_height: 1920,
            quality: 80,
        };
    }
}

impl CompressionOptions {
    pub fn max_bytes(&self) -> usize {
        return (self.max_size_mb * 1024.0 * 1024.0) as usize;
    }
}
