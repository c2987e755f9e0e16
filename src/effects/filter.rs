use std::str::FromStr;

use rayon::prelude::*;

use crate::effects::blur::box_blur_rgba8;
use crate::effects::skin::skin_mask;
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::{clamp_u8, luma};
use crate::raster::buffer::RasterBuffer;

/// Closed set of pixel filters.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    #[default]
    None,
    Grayscale,
    Sepia,
    Brightness,
    Contrast,
    Vintage,
    Blur,
    Beauty,
    SkinWhiten,
    SkinSmooth,
    Portrait,
    Vibrant,
    Warm,
    Cool,
    Cinematic,
    Noir,
    Fade,
    SoftGlow,
}

impl FilterType {
    pub const ALL: [FilterType; 18] = [
        Self::None,
        Self::Grayscale,
        Self::Sepia,
        Self::Brightness,
        Self::Contrast,
        Self::Vintage,
        Self::Blur,
        Self::Beauty,
        Self::SkinWhiten,
        Self::SkinSmooth,
        Self::Portrait,
        Self::Vibrant,
        Self::Warm,
        Self::Cool,
        Self::Cinematic,
        Self::Noir,
        Self::Fade,
        Self::SoftGlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Vintage => "vintage",
            Self::Blur => "blur",
            Self::Beauty => "beauty",
            Self::SkinWhiten => "skin-whiten",
            Self::SkinSmooth => "skin-smooth",
            Self::Portrait => "portrait",
            Self::Vibrant => "vibrant",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Cinematic => "cinematic",
            Self::Noir => "noir",
            Self::Fade => "fade",
            Self::SoftGlow => "soft-glow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Original",
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Brightness => "Bright",
            Self::Contrast => "High Contrast",
            Self::Vintage => "Vintage",
            Self::Blur => "Soft Blur",
            Self::Beauty => "Beauty",
            Self::SkinWhiten => "Skin Whitening",
            Self::SkinSmooth => "Skin Smoothing",
            Self::Portrait => "Portrait",
            Self::Vibrant => "Vibrant",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
            Self::Cinematic => "Cinematic",
            Self::Noir => "Noir",
            Self::Fade => "Fade",
            Self::SoftGlow => "Soft Glow",
        }
    }

    /// Filters that read the skin-tone classifier.
    pub fn uses_skin_detection(self) -> bool {
        matches!(
            self,
            Self::Beauty | Self::SkinWhiten | Self::SkinSmooth | Self::Portrait
        )
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| BoothError::validation(format!("unknown filter '{s}'")))
    }
}

type Rgb = [f32; 3];

/// Apply `filter` to every pixel of `buf` in place. Alpha is never touched.
///
/// Zero-sized buffers are skipped.
#[tracing::instrument(skip(buf), fields(width = buf.width(), height = buf.height()))]
pub fn apply_filter(buf: &mut RasterBuffer, filter: FilterType) -> BoothResult<()> {
    if filter == FilterType::None {
        return Ok(());
    }
    if buf.is_empty() {
        tracing::debug!("skipping filter on empty raster");
        return Ok(());
    }

    match filter {
        FilterType::None => {}
        FilterType::Grayscale => map_pixels(buf, grayscale),
        FilterType::Sepia => map_pixels(buf, sepia),
        FilterType::Brightness => map_pixels(buf, |px| scale(px, 1.2)),
        FilterType::Contrast => {
            let k = contrast_factor(0.3);
            map_pixels(buf, |px| stretch(px, k));
        }
        FilterType::Vintage => map_pixels(buf, vintage),
        FilterType::Blur => {
            let out = blurred(buf, 2)?;
            buf.as_bytes_mut().copy_from_slice(&out);
        }
        FilterType::SkinWhiten => {
            let mask = skin_mask(buf.as_bytes());
            map_masked(buf, &mask, |px| whiten(px, 1.15, 0.85), |px| px);
        }
        FilterType::SkinSmooth => {
            let mask = skin_mask(buf.as_bytes());
            let smooth = blurred(buf, 3)?;
            take_masked(buf, &mask, &smooth);
        }
        FilterType::Beauty => {
            let mask = skin_mask(buf.as_bytes());
            map_masked(buf, &mask, |px| whiten(px, 1.12, 0.9), |px| scale(px, 1.05));
            let smooth = blurred(buf, 2)?;
            take_masked(buf, &mask, &smooth);
        }
        FilterType::Portrait => {
            let mask = skin_mask(buf.as_bytes());
            map_masked(buf, &mask, |px| whiten(px, 1.1, 0.88), |px| px);
            let k = contrast_factor(0.2);
            map_pixels(buf, |px| stretch(px, k));
        }
        FilterType::Vibrant => map_pixels(buf, |px| stretch(saturate(px, 1.4), 1.1)),
        FilterType::Warm => map_pixels(buf, |px| scale_rgb(px, [1.1, 1.05, 0.9])),
        FilterType::Cool => map_pixels(buf, |px| scale_rgb(px, [0.9, 1.02, 1.15])),
        FilterType::Cinematic => map_pixels(buf, cinematic),
        FilterType::Noir => map_pixels(buf, |px| stretch(grayscale(px), 1.5)),
        FilterType::Fade => map_pixels(buf, fade),
        FilterType::SoftGlow => {
            let glow = blurred(buf, 3)?;
            soft_glow(buf, &glow);
        }
    }
    Ok(())
}

/// Multiplier for a contrast *strength* `c`: `259(c*255 + 255) / (255(259 - c*255))`.
///
/// Filters name contrast in one of two units. `contrast` and `portrait` give a strength
/// (0.3, 0.2), which goes through this curve (0.2 becomes about 1.49). `vibrant`, `cinematic`
/// and `noir` give the multiplier itself (1.1, 1.4, 1.5). Both end up in the same
/// `(v - 128) * k + 128` stretch.
pub fn contrast_factor(c: f32) -> f32 {
    let c = c * 255.0;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

fn map_pixels<F>(buf: &mut RasterBuffer, f: F)
where
    F: Fn(Rgb) -> Rgb + Sync,
{
    buf.as_bytes_mut().par_chunks_exact_mut(4).for_each(|px| {
        let out = f([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);
        px[0] = clamp_u8(out[0]);
        px[1] = clamp_u8(out[1]);
        px[2] = clamp_u8(out[2]);
    });
}

fn map_masked<S, O>(buf: &mut RasterBuffer, mask: &[bool], skin: S, other: O)
where
    S: Fn(Rgb) -> Rgb + Sync,
    O: Fn(Rgb) -> Rgb + Sync,
{
    buf.as_bytes_mut()
        .par_chunks_exact_mut(4)
        .zip(mask.par_iter())
        .for_each(|(px, &is_skin)| {
            let rgb = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];
            let out = if is_skin { skin(rgb) } else { other(rgb) };
            px[0] = clamp_u8(out[0]);
            px[1] = clamp_u8(out[1]);
            px[2] = clamp_u8(out[2]);
        });
}

/// Replace the RGB of masked pixels with the same pixel from `src`.
fn take_masked(buf: &mut RasterBuffer, mask: &[bool], src: &[u8]) {
    buf.as_bytes_mut()
        .par_chunks_exact_mut(4)
        .zip(src.par_chunks_exact(4))
        .zip(mask.par_iter())
        .for_each(|((px, s), &is_skin)| {
            if is_skin {
                px[..3].copy_from_slice(&s[..3]);
            }
        });
}

fn blurred(buf: &RasterBuffer, radius: u32) -> BoothResult<Vec<u8>> {
    box_blur_rgba8(buf.as_bytes(), buf.width(), buf.height(), radius)
}

fn clamp_f(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

fn px_luma(px: Rgb) -> f32 {
    luma(px[0], px[1], px[2])
}

fn grayscale(px: Rgb) -> Rgb {
    let l = px_luma(px);
    [l, l, l]
}

fn sepia([r, g, b]: Rgb) -> Rgb {
    [
        clamp_f(0.393 * r + 0.769 * g + 0.189 * b),
        clamp_f(0.349 * r + 0.686 * g + 0.168 * b),
        clamp_f(0.272 * r + 0.534 * g + 0.131 * b),
    ]
}

fn scale(px: Rgb, k: f32) -> Rgb {
    scale_rgb(px, [k, k, k])
}

fn scale_rgb(px: Rgb, k: [f32; 3]) -> Rgb {
    [
        clamp_f(px[0] * k[0]),
        clamp_f(px[1] * k[1]),
        clamp_f(px[2] * k[2]),
    ]
}

/// Scale each channel's distance from the pixel's own luma.
fn saturate(px: Rgb, s: f32) -> Rgb {
    let l = px_luma(px);
    px.map(|c| clamp_f(l + (c - l) * s))
}

/// `(v - 128) * k + 128` per channel; `k` is a multiplier, never a strength.
fn stretch(px: Rgb, k: f32) -> Rgb {
    px.map(|c| clamp_f((c - 128.0) * k + 128.0))
}

fn whiten(px: Rgb, brighten: f32, desaturate: f32) -> Rgb {
    saturate(scale(px, brighten), desaturate)
}

fn vintage(px: Rgb) -> Rgb {
    let s = sepia(px);
    let mut out = [0.0f32; 3];
    for i in 0..3 {
        let mixed = px[i] + (s[i] - px[i]) * 0.6;
        out[i] = clamp_f(mixed * 0.95 + 10.0);
    }
    out
}

fn cinematic(px: Rgb) -> Rgb {
    let graded = stretch(saturate(px, 0.85), 1.4);
    if px_luma(graded) < 128.0 {
        scale(graded, 0.92)
    } else {
        graded
    }
}

fn fade(px: Rgb) -> Rgb {
    saturate(px, 0.8).map(|c| clamp_f(30.0 + c * (215.0 / 255.0)))
}

fn soft_glow(buf: &mut RasterBuffer, glow: &[u8]) {
    const STRENGTH: f32 = 0.4;
    buf.as_bytes_mut()
        .par_chunks_exact_mut(4)
        .zip(glow.par_chunks_exact(4))
        .for_each(|(px, g)| {
            for i in 0..3 {
                let a = f32::from(px[i]);
                let b = f32::from(g[i]);
                let screen = 255.0 - (255.0 - a) * (255.0 - b) / 255.0;
                px[i] = clamp_u8(a + (screen - a) * STRENGTH);
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
