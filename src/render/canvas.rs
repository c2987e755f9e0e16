use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Size};
use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::buffer::RasterBuffer;
use crate::render::composite::over_straight_in_place;

/// Stroke parameters for vector outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    /// On/off dash lengths; empty means a continuous line.
    pub dashes: Vec<f64>,
    pub round_caps: bool,
}

impl StrokeStyle {
    pub fn solid(width: f64) -> Self {
        Self {
            width,
            dashes: Vec::new(),
            round_caps: false,
        }
    }

    pub fn dashed(width: f64, dashes: &[f64]) -> Self {
        Self {
            width,
            dashes: dashes.to_vec(),
            round_caps: false,
        }
    }

    pub fn with_round_caps(mut self) -> Self {
        self.round_caps = true;
        self
    }

    fn to_cpu(&self) -> vello_cpu::kurbo::Stroke {
        use vello_cpu::kurbo::{Cap, Join, Stroke};

        let (cap, join) = if self.round_caps {
            (Cap::Round, Join::Round)
        } else {
            (Cap::Butt, Join::Miter)
        };
        let stroke = Stroke::new(self.width).with_caps(cap).with_join(join);
        if self.dashes.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.dashes.iter().copied())
        }
    }
}

/// A 2D drawing surface over a [`RasterBuffer`].
///
/// Rect fills and image draws write pixels directly. Vector work (paths, strokes) is batched
/// through [`Canvas::paint`], rasterized with `vello_cpu` into a premultiplied layer and
/// blended over the buffer.
pub struct Canvas {
    buffer: RasterBuffer,
}

impl Canvas {
    /// Transparent canvas. Fails when the rasterizer cannot address the requested size.
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        Self::from_buffer(RasterBuffer::new(width, height))
    }

    pub fn from_buffer(buffer: RasterBuffer) -> BoothResult<Self> {
        surface_dims(buffer.size())?;
        Ok(Self { buffer })
    }

    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> RasterBuffer {
        self.buffer
    }

    /// Pixel-exact fill of `rect` (snapped to whole pixels, clipped to the canvas).
    /// Opaque colors replace; translucent colors blend.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let Some((x0, y0, x1, y1)) = self.snap(rect) else {
            return;
        };
        if color.a == 255 {
            let px = color.to_array();
            let w = self.buffer.width() as usize;
            let data = self.buffer.as_bytes_mut();
            for y in y0..y1 {
                let row = (y as usize * w + x0 as usize) * 4;
                let end = (y as usize * w + x1 as usize) * 4;
                for chunk in data[row..end].chunks_exact_mut(4) {
                    chunk.copy_from_slice(&px);
                }
            }
            return;
        }
        if color.a == 0 {
            return;
        }
        let layer = RasterBuffer::filled(x1 - x0, y1 - y0, color);
        self.buffer.blend(&layer, i64::from(x0), i64::from(y0));
    }

    /// Draw `img` scaled to fill `dest` exactly, blended over existing pixels.
    pub fn draw_image(&mut self, img: &RasterBuffer, dest: Rect) {
        if img.is_empty() {
            return;
        }
        let w = dest.width().round();
        let h = dest.height().round();
        if w < 1.0 || h < 1.0 {
            return;
        }
        let scaled = img.resized(w as u32, h as u32);
        self.buffer
            .blend(&scaled, dest.x0.round() as i64, dest.y0.round() as i64);
    }

    /// Run a batch of vector drawing and composite the result over the canvas.
    pub fn paint<F>(&mut self, f: F) -> BoothResult<()>
    where
        F: FnOnce(&mut Painter<'_>),
    {
        paint_buffer(&mut self.buffer, f)
    }

    fn snap(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let (cw, ch) = (f64::from(self.width()), f64::from(self.height()));
        let x0 = rect.x0.min(rect.x1).round().clamp(0.0, cw) as u32;
        let x1 = rect.x0.max(rect.x1).round().clamp(0.0, cw) as u32;
        let y0 = rect.y0.min(rect.y1).round().clamp(0.0, ch) as u32;
        let y1 = rect.y0.max(rect.y1).round().clamp(0.0, ch) as u32;
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }
}

/// Vector drawing commands available inside [`Canvas::paint`].
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl Painter<'_> {
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Rgba8) {
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(style.to_cpu());
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle, color: Rgba8) {
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(style.to_cpu());
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }
}

/// Vector-draw directly onto a raster buffer (same semantics as [`Canvas::paint`]).
pub(crate) fn paint_buffer<F>(buffer: &mut RasterBuffer, f: F) -> BoothResult<()>
where
    F: FnOnce(&mut Painter<'_>),
{
    let (w, h) = surface_dims(buffer.size())?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    {
        let mut painter = Painter { ctx: &mut ctx };
        f(&mut painter);
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    over_straight_in_place(buffer.as_bytes_mut(), pixmap.data_as_u8_slice(), 1.0)
}

fn surface_dims(size: Size) -> BoothResult<(u16, u16)> {
    if size.is_empty() {
        return Err(BoothError::canvas_context(format!(
            "cannot create a {}x{} drawing surface",
            size.width, size.height
        )));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| BoothError::canvas_context("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| BoothError::canvas_context("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
