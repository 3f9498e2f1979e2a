pub mod compressors;
pub mod markdown;
pub mod transports;
