use super::*;
use crate::capture::source::StillFrameSource;
use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::BoothError;

fn frame(w: u32, h: u32, color: Rgba8) -> StillFrameSource {
    StillFrameSource::new(RasterBuffer::filled(w, h, color))
}

#[test]
fn defaults_mirror_and_crop_to_four_thirds() {
    let settings = CaptureSettings::default();
    assert!(settings.mirror);
    assert!((settings.aspect - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(settings.filter, FilterType::None);
    assert_eq!(settings.sticker, StickerType::None);
}

#[test]
fn wide_capture_is_cropped_to_four_thirds() {
    let pipeline = CapturePipeline::default();
    let out = pipeline
        .capture(&frame(1920, 1080, Rgba8::opaque(20, 30, 40)))
        .unwrap();
    assert_eq!(out.size(), Size::new(1440, 1080));
}

#[test]
fn filter_runs_after_crop_and_before_sticker() {
    let pipeline = CapturePipeline::new(CaptureSettings {
        filter: FilterType::Grayscale,
        sticker: StickerType::Crown,
        ..CaptureSettings::default()
    });
    let out = pipeline.capture(&frame(160, 120, Rgba8::opaque(200, 40, 40))).unwrap();

    // Corners stay filtered gray; the crown keeps its gold because it was drawn last.
    let corner = out.pixel(0, 119);
    assert_eq!(corner.r, corner.g);
    let gold = out
        .as_bytes()
        .chunks_exact(4)
        .any(|px| px[0] == 255 && px[1] == 215 && px[2] == 0);
    assert!(gold);
}

#[test]
fn crop_failure_keeps_the_uncropped_frame() {
    let pipeline = CapturePipeline::new(CaptureSettings {
        aspect: f64::NAN,
        ..CaptureSettings::default()
    });
    let out = pipeline.process(RasterBuffer::filled(30, 10, Rgba8::WHITE));
    assert_eq!(out.size(), Size::new(30, 10));
}

#[test]
fn sticker_failure_keeps_the_filtered_frame() {
    // Wider than the rasterizer can address: the sticker surface cannot be created.
    let pipeline = CapturePipeline::new(CaptureSettings {
        aspect: 70_000.0,
        filter: FilterType::Brightness,
        sticker: StickerType::Hearts,
        ..CaptureSettings::default()
    });
    let out = pipeline.process(RasterBuffer::filled(70_000, 1, Rgba8::opaque(100, 100, 100)));
    assert_eq!(out.size(), Size::new(70_000, 1));
    assert_eq!(out.pixel(0, 0), Rgba8::opaque(120, 120, 120));
}

#[test]
fn fallback_returns_prior_only_on_error() {
    let prior = RasterBuffer::filled(1, 1, Rgba8::BLACK);
    let next = RasterBuffer::filled(1, 1, Rgba8::WHITE);
    let ok: BoothResult<RasterBuffer> = Ok(next.clone());
    assert_eq!(ok.or_prior(prior.clone(), "test"), next);
    let failed: BoothResult<RasterBuffer> = Err(BoothError::decode("broken"));
    assert_eq!(failed.or_prior(prior.clone(), "test"), prior);
}

#[test]
fn unready_source_propagates() {
    let pipeline = CapturePipeline::default();
    assert!(pipeline.capture(&frame(0, 0, Rgba8::WHITE)).is_err());
}
