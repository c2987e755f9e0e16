use rayon::prelude::*;

use crate::foundation::error::{BoothError, BoothResult};

/// Box blur over straight RGBA8 pixels.
///
/// Each output pixel is the mean of the in-bounds `(2r+1)^2` window around it, computed from
/// `src` only, so results never compound. Alpha is copied through unchanged.
pub fn box_blur_rgba8(src: &[u8], width: u32, height: u32, radius: u32) -> BoothResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BoothError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BoothError::validation(
            "box_blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let sums = horizontal_pass(src, width, radius);
    Ok(vertical_pass(src, &sums, width, height, radius))
}

/// Row-wise window sums per RGB channel; the window is clipped to the row.
fn horizontal_pass(src: &[u8], width: u32, radius: u32) -> Vec<u32> {
    let w = width as usize;
    let r = radius as usize;
    let mut sums = vec![0u32; src.len() / 4 * 3];
    sums.par_chunks_mut(w * 3)
        .zip(src.par_chunks(w * 4))
        .for_each(|(dst, row)| {
            for x in 0..w {
                let lo = x.saturating_sub(r);
                let hi = (x + r).min(w - 1);
                let mut acc = [0u32; 3];
                for sx in lo..=hi {
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += u32::from(row[sx * 4 + c]);
                    }
                }
                dst[x * 3..x * 3 + 3].copy_from_slice(&acc);
            }
        });
    sums
}

fn vertical_pass(src: &[u8], sums: &[u32], width: u32, height: u32, radius: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let r = radius as usize;
    let mut out = vec![0u8; src.len()];
    out.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, dst)| {
            let lo = y.saturating_sub(r);
            let hi = (y + r).min(h - 1);
            let rows = (hi - lo + 1) as u32;
            for x in 0..w {
                let cols = ((x + r).min(w - 1) - x.saturating_sub(r) + 1) as u32;
                let n = rows * cols;
                let mut acc = [0u32; 3];
                for sy in lo..=hi {
                    let base = (sy * w + x) * 3;
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += sums[base + c];
                    }
                }
                for (c, a) in acc.iter().enumerate() {
                    dst[x * 4 + c] = ((a + n / 2) / n) as u8;
                }
                dst[x * 4 + 3] = src[(y * w + x) * 4 + 3];
            }
        });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
