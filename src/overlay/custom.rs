//! Uploaded frame images and the collaborators that resolve and fetch them.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::config::FrameCompatTag;
use crate::raster::buffer::RasterBuffer;

/// How a custom frame image is scaled onto the canvas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Whole image visible, letterboxed.
    #[default]
    Contain,
    /// Stretched to the canvas, aspect ignored.
    Fill,
    /// Canvas fully covered, overflow cropped.
    Cover,
}

impl FitMode {
    /// Destination rectangle for an image of aspect `image_aspect` (w/h) on `canvas`.
    ///
    /// The rectangle may extend past the canvas for [`FitMode::Cover`].
    pub fn dest_rect(self, image_aspect: f64, canvas: Size) -> Rect {
        let full = canvas.to_rect();
        let Some(canvas_aspect) = canvas.aspect_ratio() else {
            return full;
        };
        if !image_aspect.is_finite() || image_aspect <= 0.0 {
            return full;
        }
        let (cw, ch) = (full.width(), full.height());
        let wider = image_aspect > canvas_aspect;

        let (w, h) = match self {
            Self::Fill => return full,
            Self::Contain if wider => (cw, cw / image_aspect),
            Self::Contain => (ch * image_aspect, ch),
            Self::Cover if wider => (ch * image_aspect, ch),
            Self::Cover => (cw, cw / image_aspect),
        };
        let x = (cw - w) / 2.0;
        let y = (ch - h) / 2.0;
        Rect::new(x, y, x + w, y + h)
    }
}

/// Where a custom frame's pixels come from.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameImageSource {
    /// Encoded image bytes (PNG, JPEG, ...).
    Raster(Arc<[u8]>),
    /// Remote image; only ever loaded through an [`ImageProxy`].
    Url(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomFrameImage {
    pub id: String,
    pub name: String,
    pub image: FrameImageSource,
    /// Overrides the decoded image's natural aspect ratio when set.
    pub aspect_ratio: Option<f64>,
    pub fit_mode: FitMode,
    pub layout_tag: Option<FrameCompatTag>,
    /// Unix seconds.
    pub created_at: u64,
}

impl CustomFrameImage {
    pub fn from_bytes(id: impl Into<String>, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: FrameImageSource::Raster(bytes.into()),
            aspect_ratio: None,
            fit_mode: FitMode::default(),
            layout_tag: None,
            created_at: 0,
        }
    }

    pub fn from_url(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            image: FrameImageSource::Url(url.into()),
            ..Self::from_bytes(id, name, Vec::new())
        }
    }

    pub fn with_fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = fit_mode;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_layout_tag(mut self, tag: FrameCompatTag) -> Self {
        self.layout_tag = Some(tag);
        self
    }

    /// Decode the frame pixels, fetching URL sources through `proxy`.
    pub fn load(&self, proxy: Option<&dyn ImageProxy>) -> BoothResult<RasterBuffer> {
        match &self.image {
            FrameImageSource::Raster(bytes) => RasterBuffer::decode(bytes).map_err(|e| {
                BoothError::decode(format!("custom frame '{}' could not be loaded: {e}", self.id))
            }),
            FrameImageSource::Url(url) => {
                let Some(proxy) = proxy else {
                    return Err(BoothError::cross_origin(format!(
                        "custom frame '{}' is hosted remotely and no image proxy is configured; \
                         try another frame",
                        self.id
                    )));
                };
                let fetched = fetch_via_proxy(proxy, url)?;
                RasterBuffer::decode(&fetched.bytes)
            }
        }
    }
}

/// Resolves frame identifiers to uploaded frame images.
pub trait FrameLookup {
    fn lookup(&self, frame_id: &str) -> Option<CustomFrameImage>;
}

/// In-memory [`FrameLookup`], ordered by id.
#[derive(Clone, Debug, Default)]
pub struct FrameRegistry {
    frames: BTreeMap<String, CustomFrameImage>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the replaced frame.
    pub fn register(&mut self, frame: CustomFrameImage) -> Option<CustomFrameImage> {
        self.frames.insert(frame.id.clone(), frame)
    }

    pub fn remove(&mut self, frame_id: &str) -> Option<CustomFrameImage> {
        self.frames.remove(frame_id)
    }

    pub fn get(&self, frame_id: &str) -> Option<&CustomFrameImage> {
        self.frames.get(frame_id)
    }

    pub fn list(&self) -> impl Iterator<Item = &CustomFrameImage> {
        self.frames.values()
    }

    /// Frames tagged for `tag`. Untagged frames are not included.
    pub fn compatible_with(&self, tag: FrameCompatTag) -> Vec<&CustomFrameImage> {
        self.frames
            .values()
            .filter(|f| f.layout_tag == Some(tag))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameLookup for FrameRegistry {
    fn lookup(&self, frame_id: &str) -> Option<CustomFrameImage> {
        self.frames.get(frame_id).cloned()
    }
}

/// Raw bytes returned by an [`ImageProxy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxiedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Proxy rejection, carrying an HTTP-style status.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{message} (status {status})")]
pub struct ProxyError {
    pub status: u16,
    pub message: String,
}

impl ProxyError {
    pub const BAD_REQUEST: u16 = 400;
    pub const BAD_GATEWAY: u16 = 502;

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: Self::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self {
            status: Self::BAD_GATEWAY,
            message: msg.into(),
        }
    }
}

impl From<ProxyError> for BoothError {
    fn from(e: ProxyError) -> Self {
        BoothError::proxy(e.status, e.message)
    }
}

/// Same-origin indirection for remote frame images.
pub trait ImageProxy {
    fn fetch(&self, url: &str) -> Result<ProxiedImage, ProxyError>;
}

/// Validate `url`, fetch it and check that an image came back.
pub fn fetch_via_proxy(proxy: &dyn ImageProxy, url: &str) -> Result<ProxiedImage, ProxyError> {
    validate_proxy_url(url)?;
    let fetched = proxy.fetch(url)?;
    check_image_content_type(&fetched.content_type)?;
    Ok(fetched)
}

/// Accept only absolute `http`/`https` URLs with a non-empty host.
pub fn validate_proxy_url(url: &str) -> Result<(), ProxyError> {
    let url = url.trim();
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| ProxyError::bad_request(format!("malformed url '{url}'")))?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err(ProxyError::bad_request(format!(
            "unsupported url scheme '{scheme}'"
        )));
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let (host, port) = if let Some(v6) = host_port.strip_prefix('[') {
        let (h, tail) = v6
            .split_once(']')
            .ok_or_else(|| ProxyError::bad_request(format!("malformed url '{url}'")))?;
        (h, tail.strip_prefix(':'))
    } else {
        match host_port.rsplit_once(':') {
            Some((h, p)) => (h, Some(p)),
            None => (host_port, None),
        }
    };
    if host.is_empty() || host.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ProxyError::bad_request(format!("url '{url}' has no valid host")));
    }
    if let Some(port) = port
        && port.parse::<u16>().is_err()
    {
        return Err(ProxyError::bad_request(format!("url '{url}' has an invalid port")));
    }
    Ok(())
}

/// Accept only `image/*` media types (parameters ignored).
pub fn check_image_content_type(content_type: &str) -> Result<(), ProxyError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.strip_prefix("image/") {
        Some(sub) if !sub.is_empty() => Ok(()),
        _ => Err(ProxyError::bad_request(format!(
            "upstream returned non-image content type '{content_type}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/custom.rs"]
mod tests;
