use super::*;
use crate::foundation::core::Rgba8;
use crate::overlay::custom::FrameLookup;
use crate::raster::buffer::RasterBuffer;

#[test]
fn empty_json_gives_defaults() {
    let cfg = BoothConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, BoothConfig::default());
    assert_eq!(cfg.layout, LayoutType::Grid2x2);
    assert_eq!(cfg.frame, "none");
    assert!(cfg.mirror);
    assert_eq!(cfg.countdown_secs, 3);
    assert_eq!(cfg.jpeg_quality, 90);
    cfg.validate().unwrap();
}

#[test]
fn parses_kebab_case_names() {
    let json = r#"{
        "layout": "vertical-4",
        "filter": "skin-smooth",
        "sticker": "flower-crown",
        "frame": "vintage",
        "mirror": false
    }"#;
    let cfg = BoothConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.layout, LayoutType::Vertical4);
    assert_eq!(cfg.filter, FilterType::SkinSmooth);
    assert_eq!(cfg.sticker, StickerType::FlowerCrown);
    cfg.validate().unwrap();

    let settings = cfg.capture_settings();
    assert!(!settings.mirror);
    assert_eq!(settings.filter, FilterType::SkinSmooth);
}

#[test]
fn unknown_fields_and_values_are_rejected() {
    assert!(matches!(
        BoothConfig::from_reader(r#"{"colour": "red"}"#.as_bytes()),
        Err(BoothError::Serde(_))
    ));
    assert!(BoothConfig::from_reader(r#"{"filter": "lomo"}"#.as_bytes()).is_err());
}

#[test]
fn validation_checks_ranges_and_frames() {
    let mut cfg = BoothConfig {
        jpeg_quality: 0,
        ..BoothConfig::default()
    };
    assert!(cfg.validate().is_err());
    cfg.jpeg_quality = 90;
    cfg.countdown_secs = 99;
    assert!(cfg.validate().is_err());
    cfg.countdown_secs = 5;
    cfg.frame = "mystery".into();
    assert!(matches!(cfg.validate(), Err(BoothError::Validation(_))));
}

#[test]
fn custom_frame_entries_are_validated() {
    let entry = |id: &str, path: Option<&str>, url: Option<&str>| CustomFrameEntry {
        id: id.into(),
        name: None,
        path: path.map(PathBuf::from),
        url: url.map(String::from),
        aspect_ratio: None,
        fit_mode: FitMode::Contain,
        layout_tag: None,
    };
    let with = |frames: Vec<CustomFrameEntry>| BoothConfig {
        custom_frames: frames,
        ..BoothConfig::default()
    };

    assert!(with(vec![entry("a", Some("a.png"), None)]).validate().is_ok());
    assert!(with(vec![entry("a", None, None)]).validate().is_err());
    assert!(with(vec![entry("a", Some("a.png"), Some("https://x/a.png"))]).validate().is_err());
    let dup = vec![entry("a", Some("a.png"), None), entry("a", Some("b.png"), None)];
    assert!(with(dup).validate().is_err());
    assert!(with(vec![entry("none", Some("a.png"), None)]).validate().is_err());

    let mut bad_ratio = entry("r", None, Some("https://x/r.png"));
    bad_ratio.aspect_ratio = Some(-1.0);
    assert!(with(vec![bad_ratio]).validate().is_err());

    let mut custom_selected = with(vec![entry("party", None, Some("https://x/p.png"))]);
    custom_selected.frame = "party".into();
    assert!(custom_selected.validate().is_ok());
}

#[test]
fn overrides_replace_countdown_and_quality() {
    let cfg = BoothConfig::default().with_overrides(|key| match key {
        ENV_COUNTDOWN_SECS => Some(" 5 ".into()),
        ENV_JPEG_QUALITY => Some("not a number".into()),
        _ => None,
    });
    assert_eq!(cfg.countdown_secs, 5);
    assert_eq!(cfg.jpeg_quality, 90);
}

#[test]
fn registry_loads_frames_relative_to_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    RasterBuffer::filled(6, 2, Rgba8::WHITE)
        .as_image()
        .save(dir.path().join("strip.png"))
        .unwrap();
    let cfg_path = dir.path().join("booth.json");
    std::fs::write(
        &cfg_path,
        r#"{
            "frame": "strip",
            "custom_frames": [
                {
                    "id": "strip",
                    "name": "Strip",
                    "path": "strip.png",
                    "fit_mode": "cover",
                    "layout_tag": "1x4"
                },
                {"id": "remote", "url": "https://cdn.example.com/r.png"}
            ]
        }"#,
    )
    .unwrap();

    let cfg = BoothConfig::from_path(&cfg_path).unwrap();
    cfg.validate().unwrap();
    let registry = cfg.frame_registry().unwrap();
    assert_eq!(registry.len(), 2);

    let strip = registry.lookup("strip").unwrap();
    assert_eq!(strip.fit_mode, FitMode::Cover);
    assert_eq!(strip.layout_tag, Some(FrameCompatTag::Strip1x4));
    assert_eq!(strip.load(None).unwrap().width(), 6);
    assert_eq!(registry.lookup("remote").unwrap().name, "remote");
}

#[test]
fn missing_frame_file_fails_to_load() {
    let cfg = BoothConfig {
        custom_frames: vec![CustomFrameEntry {
            id: "gone".into(),
            name: None,
            path: Some(PathBuf::from("/no/such/frame.png")),
            url: None,
            aspect_ratio: None,
            fit_mode: FitMode::Fill,
            layout_tag: None,
        }],
        ..BoothConfig::default()
    };
    assert!(cfg.frame_registry().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = BoothConfig {
        layout: LayoutType::Grid3x3,
        filter: FilterType::Cinematic,
        ..BoothConfig::default()
    };
    let json = cfg.to_json_pretty().unwrap();
    assert!(json.contains("\"grid-3x3\""));
    assert_eq!(BoothConfig::from_reader(json.as_bytes()).unwrap(), cfg);
}
