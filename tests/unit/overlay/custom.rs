use super::*;
use crate::foundation::core::Rgba8;
use crate::raster::encode::encode_png;

struct FixedProxy {
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl ImageProxy for FixedProxy {
    fn fetch(&self, _url: &str) -> Result<ProxiedImage, ProxyError> {
        Ok(ProxiedImage {
            content_type: self.content_type.to_owned(),
            bytes: self.bytes.clone(),
        })
    }
}

struct DownProxy;

impl ImageProxy for DownProxy {
    fn fetch(&self, url: &str) -> Result<ProxiedImage, ProxyError> {
        Err(ProxyError::upstream(format!("connect to {url} timed out")))
    }
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let buf = RasterBuffer::filled(w, h, Rgba8::opaque(10, 200, 30));
    encode_png(&buf).unwrap().bytes
}

#[test]
fn contain_letterboxes_a_wide_image() {
    let r = FitMode::Contain.dest_rect(2.0, Size::new(100, 100));
    assert_eq!(r, Rect::new(0.0, 25.0, 100.0, 75.0));
}

#[test]
fn contain_pillarboxes_a_tall_image() {
    let r = FitMode::Contain.dest_rect(0.5, Size::new(100, 100));
    assert_eq!(r, Rect::new(25.0, 0.0, 75.0, 100.0));
}

#[test]
fn cover_overflows_and_stays_centered() {
    let r = FitMode::Cover.dest_rect(2.0, Size::new(100, 100));
    assert_eq!(r, Rect::new(-50.0, 0.0, 150.0, 100.0));
}

#[test]
fn fill_and_bad_aspects_use_the_whole_canvas() {
    let full = Rect::new(0.0, 0.0, 80.0, 60.0);
    assert_eq!(FitMode::Fill.dest_rect(3.0, Size::new(80, 60)), full);
    assert_eq!(FitMode::Contain.dest_rect(f64::NAN, Size::new(80, 60)), full);
    assert_eq!(FitMode::Cover.dest_rect(0.0, Size::new(80, 60)), full);
}

#[test]
fn registry_looks_up_and_filters_by_tag() {
    let mut reg = FrameRegistry::new();
    assert!(reg.is_empty());
    reg.register(
        CustomFrameImage::from_bytes("a", "A", png_bytes(2, 2))
            .with_layout_tag(FrameCompatTag::Grid2x2),
    );
    reg.register(
        CustomFrameImage::from_url("b", "B", "https://cdn.test/b.png")
            .with_layout_tag(FrameCompatTag::Strip1x4),
    );
    reg.register(CustomFrameImage::from_bytes("c", "C", png_bytes(2, 2)));

    assert_eq!(reg.len(), 3);
    assert_eq!(reg.lookup("b").map(|f| f.name), Some("B".to_owned()));
    assert!(reg.lookup("missing").is_none());
    let ids: Vec<_> = reg
        .compatible_with(FrameCompatTag::Grid2x2)
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, ["a"]);
    assert!(reg.compatible_with(FrameCompatTag::Grid2x3).is_empty());

    assert!(reg.remove("a").is_some());
    assert_eq!(reg.list().count(), 2);
}

#[test]
fn raster_frames_decode_directly() {
    let frame = CustomFrameImage::from_bytes("f", "F", png_bytes(6, 4));
    let img = frame.load(None).unwrap();
    assert_eq!((img.width(), img.height()), (6, 4));
}

#[test]
fn broken_raster_frame_is_a_decode_error() {
    let frame = CustomFrameImage::from_bytes("f", "F", b"not an image".to_vec());
    let err = frame.load(None).unwrap_err();
    assert!(matches!(err, BoothError::Decode(_)));
    assert!(err.to_string().contains("'f'"));
}

#[test]
fn url_frame_without_proxy_is_cross_origin() {
    let frame = CustomFrameImage::from_url("r", "R", "https://cdn.test/r.png");
    assert!(matches!(frame.load(None), Err(BoothError::CrossOrigin(_))));
}

#[test]
fn url_frame_loads_through_proxy() {
    let frame = CustomFrameImage::from_url("r", "R", "https://cdn.test/r.png");
    let proxy = FixedProxy {
        content_type: "image/png",
        bytes: png_bytes(3, 5),
    };
    let img = frame.load(Some(&proxy)).unwrap();
    assert_eq!(img.size(), Size::new(3, 5));
}

#[test]
fn proxy_statuses_map_onto_booth_errors() {
    let frame = CustomFrameImage::from_url("r", "R", "https://cdn.test/r.png");
    let html = FixedProxy {
        content_type: "text/html; charset=utf-8",
        bytes: b"<html>".to_vec(),
    };
    assert!(matches!(
        frame.load(Some(&html)),
        Err(BoothError::Proxy { status: 400, .. })
    ));
    assert!(matches!(
        frame.load(Some(&DownProxy)),
        Err(BoothError::Proxy { status: 502, .. })
    ));

    let bad_url = CustomFrameImage::from_url("u", "U", "ftp://cdn.test/r.png");
    assert!(matches!(
        bad_url.load(Some(&DownProxy)),
        Err(BoothError::Proxy { status: 400, .. })
    ));
}

#[test]
fn proxy_url_validation() {
    for ok in [
        "http://example.com/a.png",
        "HTTPS://cdn.example.com:8443/x?y=1",
        "https://user@host/a",
        "http://[::1]:8080/a.png",
    ] {
        assert!(validate_proxy_url(ok).is_ok(), "{ok}");
    }
    for bad in [
        "example.com/a.png",
        "file:///etc/passwd",
        "https:///a.png",
        "http://host:port/a",
        "http://[::1/a",
        "",
    ] {
        assert_eq!(validate_proxy_url(bad).unwrap_err().status, 400, "{bad}");
    }
}

#[test]
fn content_type_check() {
    assert!(check_image_content_type("image/jpeg").is_ok());
    assert!(check_image_content_type("Image/PNG; q=1").is_ok());
    assert!(check_image_content_type("image/").is_err());
    assert!(check_image_content_type("application/octet-stream").is_err());
}
