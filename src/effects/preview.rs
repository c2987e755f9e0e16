//! CSS filter strings for live preview before a capture is baked.
//!
//! These only approximate the per-pixel filters; exported images always go through
//! [`apply_filter`](crate::apply_filter), and the two are allowed to differ.

use crate::effects::filter::FilterType;

impl FilterType {
    pub fn css_preview(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale(100%)",
            Self::Sepia => "sepia(100%)",
            Self::Brightness => "brightness(1.2)",
            Self::Contrast => "contrast(1.3)",
            Self::Vintage => "sepia(60%) contrast(1.1) brightness(0.95)",
            Self::Blur => "blur(2px)",
            Self::Beauty => "brightness(1.1) saturate(0.9) blur(0.5px)",
            Self::SkinWhiten => "brightness(1.15) saturate(0.85)",
            Self::SkinSmooth => "blur(1px) brightness(1.03)",
            Self::Portrait => "brightness(1.05) contrast(1.2) saturate(0.9)",
            Self::Vibrant => "saturate(1.4) contrast(1.1)",
            Self::Warm => "sepia(20%) saturate(1.2) hue-rotate(-10deg)",
            Self::Cool => "saturate(1.1) hue-rotate(10deg) brightness(1.02)",
            Self::Cinematic => "contrast(1.4) saturate(0.85) brightness(0.95)",
            Self::Noir => "grayscale(100%) contrast(1.5)",
            Self::Fade => "contrast(0.85) brightness(1.1) saturate(0.8)",
            Self::SoftGlow => "brightness(1.08) blur(0.6px)",
        }
    }
}
