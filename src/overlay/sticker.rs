//! Procedural stickers anchored on a fixed face-position heuristic.
//!
//! No face detection runs here: the face is assumed at `(w/2, 0.4h)` inside a `0.4w x 0.5h`
//! box, and every sticker is placed relative to that.

use std::f64::consts::PI;
use std::str::FromStr;

use kurbo::{Circle, Ellipse, RoundedRect, Shape};

use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::buffer::RasterBuffer;
use crate::render::canvas::{Painter, StrokeStyle, paint_buffer};

const TOLERANCE: f64 = 0.1;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StickerType {
    #[default]
    None,
    CatEars,
    DogEars,
    BunnyEars,
    Crown,
    FlowerCrown,
    Sunglasses,
    Hearts,
    Stars,
    Mustache,
    Blush,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerPosition {
    Top,
    Center,
    Bottom,
}

/// Static catalog entry for a sticker.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StickerOption {
    #[serde(rename = "type")]
    pub sticker_type: StickerType,
    pub label: &'static str,
    pub icon: &'static str,
    pub position: StickerPosition,
    pub scale: f64,
}

const fn option(
    sticker_type: StickerType,
    label: &'static str,
    icon: &'static str,
    position: StickerPosition,
    scale: f64,
) -> StickerOption {
    StickerOption {
        sticker_type,
        label,
        icon,
        position,
        scale,
    }
}

pub static STICKER_OPTIONS: [StickerOption; 11] = [
    option(StickerType::None, "None", "🚫", StickerPosition::Center, 1.0),
    option(StickerType::CatEars, "Cat Ears", "🐱", StickerPosition::Top, 1.2),
    option(StickerType::DogEars, "Dog Ears", "🐶", StickerPosition::Top, 1.3),
    option(StickerType::BunnyEars, "Bunny Ears", "🐰", StickerPosition::Top, 1.2),
    option(StickerType::Crown, "Crown", "👑", StickerPosition::Top, 0.8),
    option(StickerType::FlowerCrown, "Flower Crown", "🌸", StickerPosition::Top, 1.1),
    option(StickerType::Sunglasses, "Sunglasses", "🕶️", StickerPosition::Center, 0.9),
    option(StickerType::Hearts, "Hearts", "💕", StickerPosition::Top, 1.0),
    option(StickerType::Stars, "Stars", "✨", StickerPosition::Top, 1.0),
    option(StickerType::Mustache, "Mustache", "🥸", StickerPosition::Bottom, 0.6),
    option(StickerType::Blush, "Blush", "😊", StickerPosition::Center, 0.8),
];

impl StickerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CatEars => "cat-ears",
            Self::DogEars => "dog-ears",
            Self::BunnyEars => "bunny-ears",
            Self::Crown => "crown",
            Self::FlowerCrown => "flower-crown",
            Self::Sunglasses => "sunglasses",
            Self::Hearts => "hearts",
            Self::Stars => "stars",
            Self::Mustache => "mustache",
            Self::Blush => "blush",
        }
    }

    pub fn option(self) -> &'static StickerOption {
        STICKER_OPTIONS
            .iter()
            .find(|o| o.sticker_type == self)
            .unwrap_or(&STICKER_OPTIONS[0])
    }
}

impl std::fmt::Display for StickerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StickerType {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        STICKER_OPTIONS
            .iter()
            .map(|o| o.sticker_type)
            .find(|t| t.as_str() == key)
            .ok_or_else(|| BoothError::validation(format!("unknown sticker '{s}'")))
    }
}

/// Where and how large a sticker is drawn on a `width x height` image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickerPlacement {
    pub center: Point,
    pub size: f64,
}

pub fn sticker_placement(width: u32, height: u32, option: &StickerOption) -> StickerPlacement {
    let (w, h) = (f64::from(width), f64::from(height));
    let face_center_y = h * 0.4;
    let face_w = w * 0.4;
    let face_h = h * 0.5;

    let y = match option.position {
        StickerPosition::Top => h * 0.2,
        StickerPosition::Center => face_center_y,
        StickerPosition::Bottom => h * 0.6,
    };

    StickerPlacement {
        center: Point::new(w / 2.0, y),
        size: face_w.min(face_h) * option.scale,
    }
}

/// Draw `sticker` onto `buf`. Must run after any filter so the artwork stays unfiltered.
pub fn apply_sticker(buf: &mut RasterBuffer, sticker: StickerType) -> BoothResult<()> {
    if sticker == StickerType::None || buf.is_empty() {
        return Ok(());
    }
    let placement = sticker_placement(buf.width(), buf.height(), sticker.option());
    tracing::debug!(
        %sticker,
        x = placement.center.x,
        y = placement.center.y,
        size = placement.size,
        "drawing sticker"
    );

    paint_buffer(buf, |p| draw_sticker(p, sticker, placement))
}

fn draw_sticker(p: &mut Painter<'_>, sticker: StickerType, at: StickerPlacement) {
    let StickerPlacement { center: c, size: s } = at;
    match sticker {
        StickerType::None => {}
        StickerType::CatEars => cat_ears(p, c, s),
        StickerType::DogEars => dog_ears(p, c, s),
        StickerType::BunnyEars => bunny_ears(p, c, s),
        StickerType::Crown => crown(p, c, s),
        StickerType::FlowerCrown => flower_crown(p, c, s),
        StickerType::Sunglasses => sunglasses(p, c, s),
        StickerType::Hearts => hearts(p, c, s),
        StickerType::Stars => stars(p, c, s),
        StickerType::Mustache => mustache(p, c, s),
        StickerType::Blush => blush(p, c, s),
    }
}

const BLACK: Rgba8 = Rgba8::opaque(20, 20, 20);
const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);
const PINK: Rgba8 = Rgba8::opaque(255, 182, 193);
const HOT_PINK: Rgba8 = Rgba8::opaque(255, 105, 180);
const GOLD: Rgba8 = Rgba8::opaque(255, 215, 0);
const BROWN: Rgba8 = Rgba8::opaque(139, 90, 43);

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for pt in rest {
            path.line_to(*pt);
        }
        path.close_path();
    }
    path
}

fn ellipse(center: Point, rx: f64, ry: f64, rotation: f64) -> BezPath {
    Ellipse::new(center, (rx, ry), rotation).to_path(TOLERANCE)
}

fn circle(center: Point, r: f64) -> BezPath {
    Circle::new(center, r).to_path(TOLERANCE)
}

fn heart(center: Point, size: f64) -> BezPath {
    let (x, y) = (center.x, center.y);
    let top = y - size * 0.25;
    let mut path = BezPath::new();
    path.move_to((x, top + size * 0.1));
    path.curve_to(
        (x, top - size * 0.1),
        (x - size * 0.5, top - size * 0.1),
        (x - size * 0.5, top + size * 0.2),
    );
    path.curve_to(
        (x - size * 0.5, top + size * 0.45),
        (x - size * 0.1, top + size * 0.6),
        (x, y + size * 0.45),
    );
    path.curve_to(
        (x + size * 0.1, top + size * 0.6),
        (x + size * 0.5, top + size * 0.45),
        (x + size * 0.5, top + size * 0.2),
    );
    path.curve_to(
        (x + size * 0.5, top - size * 0.1),
        (x, top - size * 0.1),
        (x, top + size * 0.1),
    );
    path.close_path();
    path
}

fn star(center: Point, outer: f64, inner: f64, points: usize) -> BezPath {
    let mut pts = Vec::with_capacity(points * 2);
    for i in 0..points * 2 {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = -PI / 2.0 + (i as f64) * PI / points as f64;
        pts.push(Point::new(
            center.x + r * angle.cos(),
            center.y + r * angle.sin(),
        ));
    }
    polygon(&pts)
}

fn cat_ears(p: &mut Painter<'_>, c: Point, s: f64) {
    for dir in [-1.0, 1.0] {
        let base_x = c.x + dir * s * 0.35;
        let outer = polygon(&[
            Point::new(base_x - s * 0.18, c.y + s * 0.2),
            Point::new(base_x + dir * s * 0.05, c.y - s * 0.35),
            Point::new(base_x + s * 0.18, c.y + s * 0.2),
        ]);
        let inner = polygon(&[
            Point::new(base_x - s * 0.1, c.y + s * 0.15),
            Point::new(base_x + dir * s * 0.04, c.y - s * 0.2),
            Point::new(base_x + s * 0.1, c.y + s * 0.15),
        ]);
        p.fill_path(&outer, BLACK);
        p.fill_path(&inner, PINK);
    }
}

fn dog_ears(p: &mut Painter<'_>, c: Point, s: f64) {
    for dir in [-1.0, 1.0] {
        let center = Point::new(c.x + dir * s * 0.42, c.y + s * 0.1);
        p.fill_path(&ellipse(center, s * 0.14, s * 0.3, dir * 0.35), BROWN);
        p.fill_path(
            &ellipse(center, s * 0.08, s * 0.2, dir * 0.35),
            Rgba8::opaque(101, 67, 33),
        );
    }
    p.fill_path(&ellipse(Point::new(c.x, c.y + s * 0.75), s * 0.09, s * 0.06, 0.0), BLACK);
}

fn bunny_ears(p: &mut Painter<'_>, c: Point, s: f64) {
    for dir in [-1.0, 1.0] {
        let center = Point::new(c.x + dir * s * 0.2, c.y - s * 0.1);
        p.fill_path(&ellipse(center, s * 0.1, s * 0.4, dir * 0.15), WHITE);
        p.fill_path(&ellipse(center, s * 0.05, s * 0.3, dir * 0.15), PINK);
    }
}

fn crown(p: &mut Painter<'_>, c: Point, s: f64) {
    let (left, right) = (c.x - s * 0.5, c.x + s * 0.5);
    let base = c.y + s * 0.25;
    let body = polygon(&[
        Point::new(left, base),
        Point::new(left, c.y - s * 0.1),
        Point::new(c.x - s * 0.3, c.y + s * 0.05),
        Point::new(c.x, c.y - s * 0.3),
        Point::new(c.x + s * 0.3, c.y + s * 0.05),
        Point::new(right, c.y - s * 0.1),
        Point::new(right, base),
    ]);
    p.fill_path(&body, GOLD);
    p.stroke_path(&body, &StrokeStyle::solid(s * 0.02), Rgba8::opaque(184, 134, 11));
    for (dx, color) in [
        (-0.3, Rgba8::opaque(220, 20, 60)),
        (0.0, Rgba8::opaque(65, 105, 225)),
        (0.3, Rgba8::opaque(50, 205, 50)),
    ] {
        p.fill_path(&circle(Point::new(c.x + dx * s, base - s * 0.12), s * 0.05), color);
    }
}

fn flower_crown(p: &mut Painter<'_>, c: Point, s: f64) {
    let petals = [
        Rgba8::opaque(255, 105, 180),
        Rgba8::opaque(255, 255, 255),
        Rgba8::opaque(186, 85, 211),
    ];
    let count = 7;
    for i in 0..count {
        let t = i as f64 / (count - 1) as f64;
        let angle = PI + t * PI;
        let fc = Point::new(c.x + s * 0.55 * angle.cos(), c.y + s * 0.25 + s * 0.2 * angle.sin());
        let petal_color = petals[i % petals.len()];
        for k in 0..5 {
            let a = k as f64 * 2.0 * PI / 5.0;
            let pc = Point::new(fc.x + s * 0.05 * a.cos(), fc.y + s * 0.05 * a.sin());
            p.fill_path(&circle(pc, s * 0.045), petal_color);
        }
        p.fill_path(&circle(fc, s * 0.03), GOLD);
    }
}

fn sunglasses(p: &mut Painter<'_>, c: Point, s: f64) {
    let lens_w = s * 0.38;
    let lens_h = s * 0.24;
    for dir in [-1.0, 1.0] {
        let cx = c.x + dir * s * 0.24;
        let lens = RoundedRect::new(
            cx - lens_w / 2.0,
            c.y - lens_h / 2.0,
            cx + lens_w / 2.0,
            c.y + lens_h / 2.0,
            s * 0.06,
        );
        p.fill_path(&lens.to_path(TOLERANCE), BLACK);
        let glint = ellipse(
            Point::new(cx - lens_w * 0.2, c.y - lens_h * 0.15),
            lens_w * 0.1,
            lens_h * 0.12,
            -0.5,
        );
        p.fill_path(&glint, Rgba8::new(255, 255, 255, 90));
    }
    let mut bridge = BezPath::new();
    bridge.move_to((c.x - s * 0.05, c.y - lens_h * 0.2));
    bridge.quad_to((c.x, c.y - lens_h * 0.45), (c.x + s * 0.05, c.y - lens_h * 0.2));
    p.stroke_path(&bridge, &StrokeStyle::solid(s * 0.03).with_round_caps(), BLACK);
}

fn hearts(p: &mut Painter<'_>, c: Point, s: f64) {
    for (dx, dy, k, color) in [
        (-0.45, 0.05, 0.28, HOT_PINK),
        (0.0, -0.2, 0.35, Rgba8::opaque(255, 20, 60)),
        (0.45, 0.05, 0.28, PINK),
    ] {
        p.fill_path(&heart(Point::new(c.x + dx * s, c.y + dy * s), s * k), color);
    }
}

fn stars(p: &mut Painter<'_>, c: Point, s: f64) {
    for (dx, dy, k) in [
        (-0.5, 0.1, 0.14),
        (-0.2, -0.2, 0.1),
        (0.15, -0.1, 0.16),
        (0.5, 0.05, 0.12),
    ] {
        let at = Point::new(c.x + dx * s, c.y + dy * s);
        p.fill_path(&star(at, s * k, s * k * 0.45, 5), GOLD);
    }
}

fn mustache(p: &mut Painter<'_>, c: Point, s: f64) {
    for dir in [-1.0, 1.0] {
        let mut half = BezPath::new();
        half.move_to(c);
        half.curve_to(
            (c.x + dir * s * 0.15, c.y - s * 0.15),
            (c.x + dir * s * 0.4, c.y - s * 0.05),
            (c.x + dir * s * 0.5, c.y - s * 0.2),
        );
        half.curve_to(
            (c.x + dir * s * 0.45, c.y + s * 0.1),
            (c.x + dir * s * 0.2, c.y + s * 0.12),
            (c.x, c.y),
        );
        half.close_path();
        p.fill_path(&half, Rgba8::opaque(60, 40, 25));
    }
}

fn blush(p: &mut Painter<'_>, c: Point, s: f64) {
    let tint = Rgba8::new(255, 120, 150, 110);
    for dir in [-1.0, 1.0] {
        let at = Point::new(c.x + dir * s * 0.45, c.y + s * 0.25);
        p.fill_path(&ellipse(at, s * 0.14, s * 0.08, 0.0), tint);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/sticker.rs"]
mod tests;
