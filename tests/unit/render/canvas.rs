use super::*;

#[test]
fn zero_sized_canvas_is_a_context_error() {
    assert!(matches!(
        Canvas::new(0, 10),
        Err(BoothError::CanvasContext(_))
    ));
    assert!(matches!(
        Canvas::new(70_000, 10),
        Err(BoothError::CanvasContext(_))
    ));
}

#[test]
fn fill_rect_is_pixel_exact_and_clipped() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.fill_rect(Rect::new(-5.0, 2.0, 3.0, 4.0), Rgba8::opaque(255, 0, 0));
    let buf = canvas.buffer();
    assert_eq!(buf.pixel(0, 2), Rgba8::opaque(255, 0, 0));
    assert_eq!(buf.pixel(2, 3), Rgba8::opaque(255, 0, 0));
    assert_eq!(buf.pixel(3, 3), Rgba8::TRANSPARENT);
    assert_eq!(buf.pixel(0, 4), Rgba8::TRANSPARENT);
}

#[test]
fn draw_image_stretches_into_destination() {
    let mut canvas = Canvas::from_buffer(RasterBuffer::filled(8, 8, Rgba8::WHITE)).unwrap();
    let img = RasterBuffer::filled(4, 3, Rgba8::opaque(0, 0, 255));
    canvas.draw_image(&img, Rect::new(4.0, 0.0, 8.0, 4.0));
    let buf = canvas.buffer();
    assert_eq!(buf.pixel(3, 0), Rgba8::WHITE);
    assert_eq!(buf.pixel(4, 0), Rgba8::opaque(0, 0, 255));
    assert_eq!(buf.pixel(7, 3), Rgba8::opaque(0, 0, 255));
    assert_eq!(buf.pixel(7, 4), Rgba8::WHITE);
}

#[test]
fn painted_path_covers_its_interior_only() {
    let mut canvas = Canvas::from_buffer(RasterBuffer::filled(20, 20, Rgba8::WHITE)).unwrap();
    let mut path = BezPath::new();
    path.move_to((5.0, 5.0));
    path.line_to((15.0, 5.0));
    path.line_to((15.0, 15.0));
    path.line_to((5.0, 15.0));
    path.close_path();
    canvas
        .paint(|p| p.fill_path(&path, Rgba8::opaque(0, 128, 0)))
        .unwrap();

    let buf = canvas.buffer();
    let inside = buf.pixel(10, 10);
    assert!(inside.g > 100 && inside.r < 30, "{inside:?}");
    assert_eq!(buf.pixel(1, 1), Rgba8::WHITE);
}
