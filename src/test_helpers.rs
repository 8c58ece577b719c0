//! Shared test utilities: synthetic images written with the `image` crate.
//!
//! Every helper draws the same gradient so decoded output is never a flat
//! color, and panics on failure (tests only).

use image::{DynamicImage, ImageFormat, RgbImage};
use std::path::Path;

/// Gradient test pattern of the given size.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

fn write_test_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
    let img = match format {
        // The GIF encoder wants RGBA
        ImageFormat::Gif => DynamicImage::ImageRgba8(gradient(width, height).to_rgba8()),
        _ => gradient(width, height),
    };
    img.save_with_format(path, format).unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    write_test_image(path, width, height, ImageFormat::Png);
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    write_test_image(path, width, height, ImageFormat::Jpeg);
}

/// Create a small valid GIF file with the given dimensions.
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    write_test_image(path, width, height, ImageFormat::Gif);
}
