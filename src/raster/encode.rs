use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::buffer::RasterBuffer;

/// Quality used for exported layouts (0.9 on a 0..1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// An encoded output blob ready for an upload sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode as baseline JPEG. Alpha is dropped; `quality` is clamped to `1..=100`.
pub fn encode_jpeg(buf: &RasterBuffer, quality: u8) -> BoothResult<EncodedImage> {
    if buf.is_empty() {
        return Err(BoothError::encode("cannot encode an empty raster"));
    }
    let rgb = image::DynamicImage::ImageRgba8(buf.as_image().clone()).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| BoothError::encode(format!("jpeg encode: {e}")))?;

    Ok(EncodedImage {
        format: OutputFormat::Jpeg,
        width: buf.width(),
        height: buf.height(),
        bytes,
    })
}

pub fn encode_png(buf: &RasterBuffer) -> BoothResult<EncodedImage> {
    if buf.is_empty() {
        return Err(BoothError::encode("cannot encode an empty raster"));
    }
    let mut bytes = Vec::new();
    buf.as_image()
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| BoothError::encode(format!("png encode: {e}")))?;

    Ok(EncodedImage {
        format: OutputFormat::Png,
        width: buf.width(),
        height: buf.height(),
        bytes,
    })
}

pub fn encode(
    buf: &RasterBuffer,
    format: OutputFormat,
    jpeg_quality: u8,
) -> BoothResult<EncodedImage> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(buf, jpeg_quality),
        OutputFormat::Png => encode_png(buf),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/encode.rs"]
mod tests;
