//! Solid color swatch rendering.
//!
//! A swatch is a `SWATCH_SIZE` x `SWATCH_SIZE` RGBA image where every pixel
//! carries the record's RGB at full opacity. Encoding is done in memory; the
//! HTTP layer streams the returned bytes directly.

use crate::catalog::{ColorRecord, Rgb};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Edge length in pixels of every rendered swatch.
pub const SWATCH_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("encode png: {0}")]
    Encode(#[from] image::ImageError),
}

pub fn render_swatch(rgb: &Rgb) -> RgbaImage {
    RgbaImage::from_pixel(SWATCH_SIZE, SWATCH_SIZE, Rgba([rgb.r, rgb.g, rgb.b, 255]))
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Renders and encodes the swatch for `color`.
pub fn render_png(color: &ColorRecord) -> Result<Vec<u8>, RenderError> {
    encode_png(&render_swatch(&color.rgb))
}

/// `<name>.png`, the artifact name used when a swatch is written to disk.
pub fn swatch_file_name(color: &ColorRecord) -> String {
    format!("{}.png", color.name)
}
