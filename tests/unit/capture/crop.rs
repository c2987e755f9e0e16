use super::*;
use crate::foundation::core::Rgba8;
use crate::raster::encode::encode_png;

#[test]
fn wide_frames_lose_width() {
    let win = crop_window(1920, 1080, CAPTURE_ASPECT).unwrap();
    assert_eq!(
        win,
        CropWindow {
            x: 240,
            y: 0,
            width: 1440,
            height: 1080
        }
    );
}

#[test]
fn tall_frames_lose_height() {
    let win = crop_window(1080, 1920, CAPTURE_ASPECT).unwrap();
    assert_eq!((win.width, win.height), (1080, 810));
    assert_eq!(win.y, (1920 - 810) / 2);
}

#[test]
fn crops_are_centered_and_close_to_target() {
    for (w, h) in [(640, 480), (641, 479), (1000, 333), (333, 1000), (7, 5), (1, 1)] {
        for target in [CAPTURE_ASPECT, 1.0, 16.0 / 9.0, 0.5] {
            let win = crop_window(w, h, target).unwrap();
            assert!(win.width <= w && win.height <= h);
            assert!((w - win.width) / 2 == win.x);
            assert!((h - win.height) / 2 == win.y);
            // Rounding to whole pixels bounds the ratio error by one pixel on the cropped side.
            let ratio = f64::from(win.width) / f64::from(win.height);
            let tol = 1.0 / f64::from(win.height.min(win.width));
            assert!(
                (ratio - target).abs() <= tol * target.max(1.0) + 1e-9,
                "{w}x{h} @ {target}: {ratio}"
            );
        }
    }
}

#[test]
fn matching_ratio_keeps_everything() {
    let buf = RasterBuffer::filled(8, 6, Rgba8::WHITE);
    assert_eq!(crop_to_aspect(&buf, CAPTURE_ASPECT).unwrap(), buf);
}

#[test]
fn crop_keeps_the_center() {
    let mut buf = RasterBuffer::filled(8, 3, Rgba8::BLACK);
    buf.put_pixel(2, 1, Rgba8::opaque(255, 0, 0));
    let out = crop_to_aspect(&buf, CAPTURE_ASPECT).unwrap();
    assert_eq!((out.width(), out.height()), (4, 3));
    assert_eq!(out.pixel(0, 1), Rgba8::opaque(255, 0, 0));
}

#[test]
fn bad_targets_are_rejected() {
    let buf = RasterBuffer::filled(4, 4, Rgba8::WHITE);
    for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(crop_to_aspect(&buf, t), Err(BoothError::Validation(_))));
    }
}

#[test]
fn empty_input_is_returned_unchanged() {
    let buf = RasterBuffer::new(0, 0);
    assert!(crop_to_aspect(&buf, CAPTURE_ASPECT).unwrap().is_empty());
}

#[test]
fn crop_encoded_decodes_then_crops() {
    let src = RasterBuffer::filled(16, 9, Rgba8::opaque(1, 2, 3));
    let bytes = encode_png(&src).unwrap().bytes;
    let out = crop_encoded(&bytes, CAPTURE_ASPECT).unwrap();
    assert_eq!((out.width(), out.height()), (12, 9));
    assert!(matches!(crop_encoded(b"garbage", CAPTURE_ASPECT), Err(BoothError::Decode(_))));
}
