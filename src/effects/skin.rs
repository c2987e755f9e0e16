//! Coarse RGB skin-tone classifier shared by the beauty filters.
//!
//! The thresholds are fixed and known to misclassify some orange/brown non-skin tones.
//! Keep them exact.

/// True when `(r, g, b)` falls inside the fixed skin-tone box.
pub fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && r > g && g > b && (max - min) > 15
}

/// Per-pixel skin mask for a straight RGBA8 buffer.
pub fn skin_mask(rgba: &[u8]) -> Vec<bool> {
    rgba.chunks_exact(4)
        .map(|px| is_skin_tone(px[0], px[1], px[2]))
        .collect()
}
