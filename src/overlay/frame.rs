use std::str::FromStr;

use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};
use crate::overlay::custom::{CustomFrameImage, FrameLookup, ImageProxy};
use crate::render::canvas::{Canvas, StrokeStyle};

/// Padding added around the grid whenever any frame is active.
pub const FRAME_PADDING: u32 = 40;

/// Built-in procedural frames.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    #[default]
    None,
    Classic,
    Modern,
    Vintage,
    Elegant,
    Playful,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    /// On/off dash lengths; empty for solid.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[20.0, 10.0],
            Self::Dotted => &[5.0, 5.0],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameStyle {
    pub border_width: f64,
    pub border_color: Rgba8,
    pub border_style: BorderStyle,
    pub padding: u32,
    pub background_color: Rgba8,
}

const fn style(
    border_width: f64,
    border_color: Rgba8,
    border_style: BorderStyle,
    padding: u32,
    background_color: Rgba8,
) -> FrameStyle {
    FrameStyle {
        border_width,
        border_color,
        border_style,
        padding,
        background_color,
    }
}

impl FrameType {
    pub const ALL: [FrameType; 6] = [
        Self::None,
        Self::Classic,
        Self::Modern,
        Self::Vintage,
        Self::Elegant,
        Self::Playful,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Vintage => "vintage",
            Self::Elegant => "elegant",
            Self::Playful => "playful",
        }
    }

    pub fn style(self) -> FrameStyle {
        use BorderStyle::*;
        match self {
            Self::None => style(0.0, Rgba8::TRANSPARENT, Solid, 0, Rgba8::TRANSPARENT),
            Self::Classic => style(
                20.0,
                Rgba8::opaque(0x2c, 0x2c, 0x2c),
                Solid,
                FRAME_PADDING,
                Rgba8::opaque(0xff, 0xff, 0xff),
            ),
            Self::Modern => style(
                12.0,
                Rgba8::opaque(0x1a, 0x1a, 0x2e),
                Solid,
                FRAME_PADDING,
                Rgba8::opaque(0xf5, 0xf5, 0xf5),
            ),
            Self::Vintage => style(
                16.0,
                Rgba8::opaque(0x8b, 0x5a, 0x2b),
                Dashed,
                FRAME_PADDING,
                Rgba8::opaque(0xf4, 0xe4, 0xc1),
            ),
            Self::Elegant => style(
                10.0,
                Rgba8::opaque(0xd4, 0xaf, 0x37),
                Solid,
                FRAME_PADDING,
                Rgba8::opaque(0xff, 0xfa, 0xf0),
            ),
            Self::Playful => style(
                14.0,
                Rgba8::opaque(0xff, 0x6b, 0x9d),
                Dotted,
                FRAME_PADDING,
                Rgba8::opaque(0xff, 0xf0, 0xf5),
            ),
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameType {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| BoothError::validation(format!("unknown frame '{s}'")))
    }
}

/// A frame key resolved against the built-in styles and the custom frame lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameSelection {
    None,
    Procedural(FrameType),
    Custom(CustomFrameImage),
}

impl FrameSelection {
    /// Custom registrations win over built-in names; `none` always means no frame.
    pub fn resolve(frame_key: &str, lookup: &dyn FrameLookup) -> BoothResult<Self> {
        let key = frame_key.trim();
        if key.is_empty() || key.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        if let Some(custom) = lookup.lookup(key) {
            return Ok(Self::Custom(custom));
        }
        match key.parse::<FrameType>() {
            Ok(frame) => Ok(Self::Procedural(frame)),
            Err(_) => Err(BoothError::validation(format!(
                "frame '{key}' is neither a built-in frame nor a registered custom frame"
            ))),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Padding on each side of the grid.
    pub fn padding(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Procedural(frame) => frame.style().padding,
            Self::Custom(_) => FRAME_PADDING,
        }
    }
}

/// Draw the frame named by `frame_key` over the whole canvas.
pub fn apply_frame(
    canvas: &mut Canvas,
    frame_key: &str,
    lookup: &dyn FrameLookup,
    proxy: Option<&dyn ImageProxy>,
) -> BoothResult<()> {
    match FrameSelection::resolve(frame_key, lookup)? {
        FrameSelection::None => Ok(()),
        FrameSelection::Procedural(frame) => draw_procedural_frame(canvas, &frame.style()),
        FrameSelection::Custom(custom) => draw_custom_frame(canvas, &custom, proxy),
    }
}

/// Background fill, then the border along the canvas edge.
pub fn draw_procedural_frame(canvas: &mut Canvas, style: &FrameStyle) -> BoothResult<()> {
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    canvas.fill_rect(Rect::new(0.0, 0.0, w, h), style.background_color);

    let bw = style.border_width;
    if bw <= 0.0 || style.border_color.a == 0 {
        return Ok(());
    }
    match style.border_style {
        BorderStyle::Solid => {
            let color = style.border_color;
            canvas.fill_rect(Rect::new(0.0, 0.0, w, bw), color);
            canvas.fill_rect(Rect::new(w - bw, 0.0, w, h), color);
            canvas.fill_rect(Rect::new(0.0, h - bw, w, h), color);
            canvas.fill_rect(Rect::new(0.0, 0.0, bw, h), color);
            Ok(())
        }
        dashed => {
            let stroke = StrokeStyle::dashed(bw, dashed.dash_pattern());
            let half = bw / 2.0;
            let rect = Rect::new(half, half, w - half, h - half);
            canvas.paint(|p| p.stroke_rect(rect, &stroke, style.border_color))
        }
    }
}

/// Load `custom` and draw it over the canvas with its fit mode.
pub fn draw_custom_frame(
    canvas: &mut Canvas,
    custom: &CustomFrameImage,
    proxy: Option<&dyn ImageProxy>,
) -> BoothResult<()> {
    let img = custom.load(proxy)?;
    let aspect = custom
        .aspect_ratio
        .or_else(|| img.size().aspect_ratio())
        .ok_or_else(|| BoothError::decode(format!("custom frame '{}' is empty", custom.id)))?;
    let dest = custom.fit_mode.dest_rect(aspect, canvas.size());
    tracing::debug!(frame = %custom.id, fit = ?custom.fit_mode, ?dest, "drawing custom frame");
    canvas.draw_image(&img, dest);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/frame.rs"]
mod tests;
