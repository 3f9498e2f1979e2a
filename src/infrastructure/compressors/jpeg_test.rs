use anyhow::Result;
use image::GenericImageView;
use test_utils::png_fixture;

use super::JpegCompressor;
use crate::domain::models::CompressionError;
use crate::domain::models::CompressionOptions;
use crate::domain::models::Compressor;
use crate::domain::models::ImageBlob;

#[tokio::test]
async fn it_downscales_and_reencodes() -> Result<()> {
    let original = ImageBlob::new("wide.png", png_fixture(400, 100));
    let options = CompressionOptions {
        max_size_mb: 2.0,
        max_width_or_height: 200,
        quality: 80,
    };

    let res = JpegCompressor::default().compress(&original, &options).await?;

    assert_eq!(res.file_name, "wide.jpg");
    assert!(!res.is_empty());
    assert!(res.len() <= options.max_bytes());

    let decoded = image::load_from_memory(&res.bytes)?;
    assert_eq!(decoded.width(), 200);
    assert_eq!(decoded.height(), 50);
    assert_eq!(
        image::guess_format(&res.bytes)?,
        image::ImageFormat::Jpeg
    );

    assert_eq!(original.bytes, png_fixture(400, 100));
    return Ok(());
}

#[tokio::test]
async fn it_keeps_small_images_at_their_size() -> Result<()> {
    let original = ImageBlob::new("small.png", png_fixture(32, 16));

    let res = JpegCompressor::default()
        .compress(&original, &CompressionOptions::default())
        .await?;

    let decoded = image::load_from_memory(&res.bytes)?;
    assert_eq!(decoded.width(), 32);
    assert_eq!(decoded.height(), 16);
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_corrupt_images() {
    let original = ImageBlob::new("broken.png", b"definitely not a png".to_vec());

    let res = JpegCompressor::default()
        .compress(&original, &CompressionOptions::default())
        .await;

    assert!(matches!(res, Err(CompressionError::Service(_))));
}
