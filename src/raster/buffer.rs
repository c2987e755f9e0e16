use std::path::Path;

use anyhow::Context;
use image::{RgbaImage, imageops};

use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{BoothError, BoothResult};

/// Width x height grid of straight-alpha RGBA8 pixels, row-major.
///
/// Every pipeline stage consumes and produces one of these. Stages that mutate in place
/// (filters, stickers) are always handed a buffer they own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(color.to_array())),
        }
    }

    /// Wrap raw RGBA8 bytes; the length must equal `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BoothResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BoothError::validation("raster buffer size overflow"))?;
        if data.len() != expected {
            return Err(BoothError::decode(format!(
                "expected {expected} rgba8 bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        let image = RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| BoothError::decode("rgba8 bytes do not match dimensions"))?;
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode any format the `image` crate understands.
    pub fn decode(bytes: &[u8]) -> BoothResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| BoothError::decode(format!("decode image from memory: {e}")))?;
        Ok(Self {
            image: dyn_img.to_rgba8(),
        })
    }

    pub fn open(path: &Path) -> BoothResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        Rgba8::from_array(self.image.get_pixel(x, y).0)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        self.image.put_pixel(x, y, image::Rgba(color.to_array()));
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_array();
        for chunk in self.image.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Copy of the `w x h` region at `(x, y)`. The region must lie inside the buffer.
    pub fn sub_image(&self, x: u32, y: u32, w: u32, h: u32) -> BoothResult<Self> {
        let fits = x.checked_add(w).is_some_and(|r| r <= self.width())
            && y.checked_add(h).is_some_and(|b| b <= self.height());
        if !fits {
            return Err(BoothError::validation(format!(
                "region {w}x{h}@({x},{y}) exceeds {}x{} buffer",
                self.width(),
                self.height()
            )));
        }
        Ok(Self {
            image: imageops::crop_imm(&self.image, x, y, w, h).to_image(),
        })
    }

    pub fn flip_horizontal(&mut self) {
        imageops::flip_horizontal_in_place(&mut self.image);
    }

    /// Resample to exactly `width x height` (no aspect preservation).
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self {
            image: imageops::resize(&self.image, width, height, imageops::FilterType::Triangle),
        }
    }

    /// Copy `src` with its top-left at `(x, y)`, replacing destination pixels and clipping
    /// anything outside this buffer.
    pub fn blit(&mut self, src: &RasterBuffer, x: i64, y: i64) {
        imageops::replace(&mut self.image, &src.image, x, y);
    }

    /// Alpha-blend `src` over this buffer with its top-left at `(x, y)`.
    pub fn blend(&mut self, src: &RasterBuffer, x: i64, y: i64) {
        imageops::overlay(&mut self.image, &src.image, x, y);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
