use super::*;

#[test]
fn parse_hex_accepts_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#ff6b9d").unwrap(), Rgba8::opaque(255, 107, 157));
    assert_eq!(
        Rgba8::parse_hex("00000080").unwrap(),
        Rgba8::new(0, 0, 0, 128)
    );
    assert!(Rgba8::parse_hex("#fff").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
}

#[test]
fn hex_serde_roundtrips_through_json() {
    let c = Rgba8::opaque(212, 175, 55);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#d4af37\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn with_opacity_scales_alpha_only() {
    let c = Rgba8::opaque(10, 20, 30).with_opacity(0.5);
    assert_eq!(c, Rgba8::new(10, 20, 30, 128));
}

#[test]
fn size_aspect_ratio_handles_empty() {
    assert_eq!(Size::new(0, 10).aspect_ratio(), None);
    assert_eq!(Size::new(1440, 1080).aspect_ratio(), Some(4.0 / 3.0));
}
