use std::io::Cursor;

use image::DynamicImage;
use image::ImageOutputFormat;
use image::Rgb;
use image::RgbImage;

/// A PNG with a colour gradient, so encoders have something to compress.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        return Rgb([r, g, 128]);
    });

    let mut bytes = Cursor::new(vec![]);
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .unwrap();

    return bytes.into_inner();
}
