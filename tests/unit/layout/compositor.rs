use super::*;
use crate::layout::config::LayoutType;
use crate::overlay::custom::{CustomFrameImage, FitMode, FrameRegistry};
use crate::raster::encode::{DEFAULT_JPEG_QUALITY, OutputFormat, encode_png};

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

fn state_with(layout: LayoutType, filled: &[usize]) -> LayoutState {
    let mut state = LayoutState::new(layout);
    for &i in filled {
        state = state
            .with_capture(i, RasterBuffer::filled(8, 6, RED))
            .unwrap();
    }
    state
}

#[test]
fn canvas_sizes_follow_columns() {
    assert_eq!(layout_canvas_size(LayoutType::Grid2x2.config(), 0), Size::new(720, 720));
    assert_eq!(layout_canvas_size(LayoutType::Grid2x2.config(), 40), Size::new(800, 800));
    assert_eq!(layout_canvas_size(LayoutType::Vertical4.config(), 0), Size::new(720, 2880));
    assert_eq!(layout_canvas_size(LayoutType::Horizontal4.config(), 0), Size::new(720, 180));
    assert_eq!(layout_canvas_size(LayoutType::Grid3x3.config(), 0), Size::new(720, 720));
    assert_eq!(cell_size(LayoutType::LeftRight.config()), 360);
}

#[test]
fn unframed_grid_is_720_square() {
    let state = state_with(LayoutType::Grid2x2, &[0, 1, 2, 3]);
    let out = compose_layout(&state, "none", &FrameRegistry::new(), None).unwrap();
    assert_eq!(out.size(), Size::new(720, 720));
    assert_eq!(out.pixel(180, 180), RED);
}

#[test]
fn framed_grid_adds_padding() {
    let state = state_with(LayoutType::Grid2x2, &[0]);
    let out = compose_layout(&state, "modern", &FrameRegistry::new(), None).unwrap();
    assert_eq!(out.size(), Size::new(800, 800));
    // border, then frame background, then the first photo inside the padding
    assert_eq!(out.pixel(2, 2), Rgba8::opaque(0x1a, 0x1a, 0x2e));
    assert_eq!(out.pixel(30, 30), Rgba8::opaque(0xf5, 0xf5, 0xf5));
    assert_eq!(out.pixel(200, 200), RED);
}

#[test]
fn empty_slots_stay_white_and_cells_get_grid_lines() {
    let state = state_with(LayoutType::LeftRight, &[0]);
    let out = compose_layout(&state, "none", &FrameRegistry::new(), None).unwrap();
    assert_eq!(out.size(), Size::new(720, 360));
    assert_eq!(out.pixel(100, 100), RED);
    assert_eq!(out.pixel(540, 180), Rgba8::WHITE);
    assert_eq!(out.pixel(540, 0), GRID_LINE);
}

#[test]
fn custom_frame_is_drawn_over_the_photos() {
    let mut reg = FrameRegistry::new();
    let overlay = RasterBuffer::filled(10, 10, Rgba8::opaque(0, 0, 255));
    reg.register(
        CustomFrameImage::from_bytes("party", "Party", encode_png(&overlay).unwrap().bytes)
            .with_fit_mode(FitMode::Fill),
    );
    let state = state_with(LayoutType::Single, &[0]);
    let out = compose_layout(&state, "party", &reg, None).unwrap();
    assert_eq!(out.size(), Size::new(800, 800));
    assert_eq!(out.pixel(400, 400), Rgba8::opaque(0, 0, 255));
}

#[test]
fn unresolvable_frame_fails_the_export() {
    let state = state_with(LayoutType::Single, &[0]);
    assert!(compose_layout(&state, "ghost", &FrameRegistry::new(), None).is_err());
}

#[test]
fn export_encodes_jpeg_with_layout_dimensions() {
    let state = state_with(LayoutType::TopBottom, &[0, 1]);
    let encoded = export_layout(
        &state,
        "elegant",
        &FrameRegistry::new(),
        None,
        DEFAULT_JPEG_QUALITY,
    )
    .unwrap();
    assert_eq!(encoded.format, OutputFormat::Jpeg);
    assert_eq!((encoded.width, encoded.height), (800, 1520));
    let decoded = RasterBuffer::decode(&encoded.bytes).unwrap();
    assert_eq!(decoded.size(), Size::new(800, 1520));
}
