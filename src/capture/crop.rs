use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::buffer::RasterBuffer;

/// Aspect ratio every capture is cropped to.
pub const CAPTURE_ASPECT: f64 = 4.0 / 3.0;

/// Pixel rectangle kept by a center crop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest centered window of ratio `target` (w/h) inside a `width x height` image.
pub fn crop_window(width: u32, height: u32, target: f64) -> BoothResult<CropWindow> {
    if !target.is_finite() || target <= 0.0 {
        return Err(BoothError::validation(format!(
            "crop aspect ratio must be a positive number, got {target}"
        )));
    }
    let full = CropWindow {
        x: 0,
        y: 0,
        width,
        height,
    };
    if width == 0 || height == 0 {
        return Ok(full);
    }

    let img_ratio = f64::from(width) / f64::from(height);
    if img_ratio > target {
        let crop_w = ((f64::from(height) * target).round() as u32).clamp(1, width);
        Ok(CropWindow {
            x: (width - crop_w) / 2,
            width: crop_w,
            ..full
        })
    } else if img_ratio < target {
        let crop_h = ((f64::from(width) / target).round() as u32).clamp(1, height);
        Ok(CropWindow {
            y: (height - crop_h) / 2,
            height: crop_h,
            ..full
        })
    } else {
        Ok(full)
    }
}

/// Center-crop `buf` to `target` without padding.
pub fn crop_to_aspect(buf: &RasterBuffer, target: f64) -> BoothResult<RasterBuffer> {
    let win = crop_window(buf.width(), buf.height(), target)?;
    if win.width == buf.width() && win.height == buf.height() {
        return Ok(buf.clone());
    }
    tracing::debug!(?win, from_w = buf.width(), from_h = buf.height(), "center crop");
    buf.sub_image(win.x, win.y, win.width, win.height)
}

/// Decode `bytes` and center-crop the result.
pub fn crop_encoded(bytes: &[u8], target: f64) -> BoothResult<RasterBuffer> {
    let decoded = RasterBuffer::decode(bytes)?;
    crop_to_aspect(&decoded, target)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/crop.rs"]
mod tests;
