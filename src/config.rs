use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::Context;

use crate::capture::crop::CAPTURE_ASPECT;
use crate::capture::pipeline::CaptureSettings;
use crate::effects::filter::FilterType;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::config::{FrameCompatTag, LayoutType};
use crate::overlay::custom::{CustomFrameImage, FitMode, FrameImageSource, FrameRegistry};
use crate::overlay::frame::FrameType;
use crate::overlay::sticker::StickerType;
use crate::raster::encode::DEFAULT_JPEG_QUALITY;

pub const ENV_COUNTDOWN_SECS: &str = "SNAPBOOTH_COUNTDOWN_SECS";
pub const ENV_JPEG_QUALITY: &str = "SNAPBOOTH_JPEG_QUALITY";

const MAX_COUNTDOWN_SECS: u32 = 30;

/// One uploaded frame declared in the config. Exactly one of `path` or `url` is set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomFrameEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Image file, relative to the config file.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub fit_mode: FitMode,
    #[serde(default)]
    pub layout_tag: Option<FrameCompatTag>,
}

/// Booth session settings, read from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    pub layout: LayoutType,
    pub filter: FilterType,
    pub sticker: StickerType,
    /// Built-in frame name, custom frame id, or `none`.
    pub frame: String,
    pub mirror: bool,
    pub countdown_secs: u32,
    pub jpeg_quality: u8,
    pub custom_frames: Vec<CustomFrameEntry>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            layout: LayoutType::Grid2x2,
            filter: FilterType::None,
            sticker: StickerType::None,
            frame: FrameType::None.as_str().to_owned(),
            mirror: true,
            countdown_secs: 3,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            custom_frames: Vec::new(),
            base_dir: None,
        }
    }
}

impl BoothConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BoothError::serde(format!("parse booth config JSON: {e}")))
    }

    /// Parse a config file; relative frame paths resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoothError::validation(format!("open booth config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> BoothResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BoothError::serde(format!("serialize booth config: {e}")))
    }

    /// Apply `SNAPBOOTH_*` environment overrides. Unparsable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(secs) = get(ENV_COUNTDOWN_SECS).and_then(|v| v.trim().parse::<u32>().ok()) {
            self.countdown_secs = secs;
        }
        if let Some(q) = get(ENV_JPEG_QUALITY).and_then(|v| v.trim().parse::<u8>().ok()) {
            self.jpeg_quality = q;
        }
        self
    }

    pub fn validate(&self) -> BoothResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BoothError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.countdown_secs > MAX_COUNTDOWN_SECS {
            return Err(BoothError::validation(format!(
                "countdown_secs must be at most {MAX_COUNTDOWN_SECS}, got {}",
                self.countdown_secs
            )));
        }

        let mut ids = BTreeSet::new();
        for entry in &self.custom_frames {
            let id = entry.id.trim();
            if id.is_empty() {
                return Err(BoothError::validation("custom frame id must be non-empty"));
            }
            if id.eq_ignore_ascii_case("none") {
                return Err(BoothError::validation("custom frame id 'none' is reserved"));
            }
            if !ids.insert(id) {
                return Err(BoothError::validation(format!("duplicate custom frame id '{id}'")));
            }
            match (&entry.path, &entry.url) {
                (Some(_), None) | (None, Some(_)) => {}
                _ => {
                    return Err(BoothError::validation(format!(
                        "custom frame '{id}' needs exactly one of 'path' or 'url'"
                    )));
                }
            }
            if let Some(r) = entry.aspect_ratio
                && !(r.is_finite() && r > 0.0)
            {
                return Err(BoothError::validation(format!(
                    "custom frame '{id}' has invalid aspect_ratio {r}"
                )));
            }
        }

        let frame = self.frame.trim();
        let known = frame.is_empty()
            || frame.parse::<FrameType>().is_ok()
            || ids.contains(frame);
        if !known {
            return Err(BoothError::validation(format!(
                "frame '{frame}' is neither a built-in frame nor a declared custom frame"
            )));
        }
        Ok(())
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            mirror: self.mirror,
            aspect: CAPTURE_ASPECT,
            filter: self.filter,
            sticker: self.sticker,
        }
    }

    /// Load every declared custom frame into a registry.
    pub fn frame_registry(&self) -> BoothResult<FrameRegistry> {
        let mut registry = FrameRegistry::new();
        for entry in &self.custom_frames {
            registry.register(self.load_entry(entry)?);
        }
        Ok(registry)
    }

    fn load_entry(&self, entry: &CustomFrameEntry) -> BoothResult<CustomFrameImage> {
        let (image, created_at) = match (&entry.path, &entry.url) {
            (Some(rel), _) => {
                let path = match &self.base_dir {
                    Some(base) if rel.is_relative() => base.join(rel),
                    _ => rel.clone(),
                };
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read custom frame '{}'", path.display()))?;
                let created_at = std::fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map_or(0, |d| d.as_secs());
                (FrameImageSource::Raster(bytes.into()), created_at)
            }
            (None, Some(url)) => (FrameImageSource::Url(url.clone()), 0),
            (None, None) => {
                return Err(BoothError::validation(format!(
                    "custom frame '{}' has no image source",
                    entry.id
                )));
            }
        };
        Ok(CustomFrameImage {
            id: entry.id.trim().to_owned(),
            name: entry.name.clone().unwrap_or_else(|| entry.id.clone()),
            image,
            aspect_ratio: entry.aspect_ratio,
            fit_mode: entry.fit_mode,
            layout_tag: entry.layout_tag,
            created_at,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
