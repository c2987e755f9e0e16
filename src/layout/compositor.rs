use crate::foundation::core::{Rect, Rgba8, Size};
use crate::foundation::error::BoothResult;
use crate::layout::config::LayoutConfig;
use crate::layout::state::LayoutState;
use crate::overlay::custom::{FrameLookup, ImageProxy};
use crate::overlay::frame::{FrameSelection, draw_custom_frame, draw_procedural_frame};
use crate::raster::buffer::RasterBuffer;
use crate::raster::encode::{EncodedImage, encode_jpeg};
use crate::render::canvas::{Canvas, StrokeStyle};

/// Grid width before frame padding.
pub const BASE_WIDTH: u32 = 720;

const GRID_BACKGROUND: Rgba8 = Rgba8::WHITE;
const GRID_LINE: Rgba8 = Rgba8::opaque(0xe0, 0xe0, 0xe0);
const GRID_LINE_WIDTH: f64 = 2.0;

/// Side of one square cell.
pub fn cell_size(config: &LayoutConfig) -> u32 {
    BASE_WIDTH / config.cols.max(1)
}

/// Output size of a layout with `padding` on every side.
pub fn layout_canvas_size(config: &LayoutConfig, padding: u32) -> Size {
    let cell = cell_size(config);
    Size::new(
        cell * config.cols + 2 * padding,
        cell * config.rows + 2 * padding,
    )
}

/// Composite every captured slot into one image, framed by `frame_key`.
///
/// Uncaptured slots are left white; an incomplete session is not an error.
#[tracing::instrument(skip_all, fields(layout = %state.config.layout_type, frame = frame_key))]
pub fn compose_layout(
    state: &LayoutState,
    frame_key: &str,
    frames: &dyn FrameLookup,
    proxy: Option<&dyn ImageProxy>,
) -> BoothResult<RasterBuffer> {
    let selection = FrameSelection::resolve(frame_key, frames)?;
    let padding = selection.padding();
    let size = layout_canvas_size(&state.config, padding);
    let mut canvas = Canvas::new(size.width, size.height)?;

    match &selection {
        FrameSelection::Procedural(frame) => draw_procedural_frame(&mut canvas, &frame.style())?,
        FrameSelection::Custom(_) => canvas.fill_rect(size.to_rect(), Rgba8::WHITE),
        FrameSelection::None => {}
    }

    let cell = f64::from(cell_size(&state.config));
    let origin = f64::from(padding);
    let cell_rect = |row: u32, col: u32| {
        let x = origin + f64::from(col) * cell;
        let y = origin + f64::from(row) * cell;
        Rect::new(x, y, x + cell, y + cell)
    };

    let grid = Rect::new(
        origin,
        origin,
        origin + cell * f64::from(state.config.cols),
        origin + cell * f64::from(state.config.rows),
    );
    canvas.fill_rect(grid, GRID_BACKGROUND);

    let mut drawn = 0usize;
    for slot in &state.slots {
        if let Some(image) = &slot.image {
            canvas.draw_image(image, cell_rect(slot.row, slot.col));
            drawn += 1;
        }
    }
    tracing::debug!(
        drawn,
        total = state.slots.len(),
        width = size.width,
        height = size.height,
        "slots composited"
    );

    let line = StrokeStyle::solid(GRID_LINE_WIDTH);
    canvas.paint(|p| {
        for slot in &state.slots {
            p.stroke_rect(cell_rect(slot.row, slot.col), &line, GRID_LINE);
        }
    })?;

    if let FrameSelection::Custom(custom) = &selection {
        draw_custom_frame(&mut canvas, custom, proxy)?;
    }
    Ok(canvas.into_buffer())
}

/// [`compose_layout`], then JPEG-encode at `jpeg_quality` (90 for exports).
pub fn export_layout(
    state: &LayoutState,
    frame_key: &str,
    frames: &dyn FrameLookup,
    proxy: Option<&dyn ImageProxy>,
    jpeg_quality: u8,
) -> BoothResult<EncodedImage> {
    let composed = compose_layout(state, frame_key, frames, proxy)?;
    encode_jpeg(&composed, jpeg_quality)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compositor.rs"]
mod tests;
