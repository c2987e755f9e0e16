//! snapbooth is the image pipeline of a photobooth.
//!
//! Each slot of a session goes through the same stages, each consuming and producing a
//! [`RasterBuffer`]:
//!
//! - grab a frame from a [`VideoFrameSource`] and center-crop it to 4:3
//! - bake one [`FilterType`] into the pixels, then draw one [`StickerType`]
//! - store the result in a [`LayoutState`] slot through a [`LayoutController`]
//!
//! A finished session is composited into a single grid by [`compose_layout`], framed with a
//! built-in [`FrameType`] or an uploaded [`CustomFrameImage`], encoded with [`export_layout`] and
//! handed to a [`PhotoUploadSink`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod capture;
/// Booth configuration file.
pub mod config;
pub(crate) mod effects;
pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod overlay;
pub(crate) mod raster;
pub(crate) mod render;

pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::capture::countdown::{AutoCapture, CountdownEvent, CountdownToken};
pub use crate::capture::crop::{
    CAPTURE_ASPECT, CropWindow, crop_encoded, crop_to_aspect, crop_window,
};
pub use crate::capture::pipeline::{CapturePipeline, CaptureSettings, Fallback};
pub use crate::capture::source::{
    ImageFileSource, StillFrameSource, VideoFrameSource, capture_frame,
};
pub use crate::config::{BoothConfig, CustomFrameEntry};
pub use crate::effects::filter::{FilterType, apply_filter, contrast_factor};
pub use crate::effects::skin::{is_skin_tone, skin_mask};
pub use crate::export::sink::{
    DirectoryUploadSink, InMemoryUploadSink, PhotoUploadSink, UploadProgress, UploadReceipt,
};
pub use crate::layout::compositor::{
    BASE_WIDTH, cell_size, compose_layout, export_layout, layout_canvas_size,
};
pub use crate::layout::config::{FrameCompatTag, LAYOUT_CONFIGS, LayoutConfig, LayoutType};
pub use crate::layout::controller::{LayoutController, LayoutEvent};
pub use crate::layout::state::{LayoutState, Slot};
pub use crate::overlay::custom::{
    CustomFrameImage, FitMode, FrameImageSource, FrameLookup, FrameRegistry, ImageProxy,
    ProxiedImage, ProxyError, check_image_content_type, fetch_via_proxy, validate_proxy_url,
};
pub use crate::overlay::frame::{
    BorderStyle, FRAME_PADDING, FrameSelection, FrameStyle, FrameType, apply_frame,
};
pub use crate::overlay::sticker::{
    STICKER_OPTIONS, StickerOption, StickerPlacement, StickerPosition, StickerType, apply_sticker,
    sticker_placement,
};
pub use crate::raster::buffer::RasterBuffer;
pub use crate::raster::encode::{
    DEFAULT_JPEG_QUALITY, EncodedImage, OutputFormat, encode, encode_jpeg, encode_png,
};
pub use crate::render::canvas::{Canvas, Painter, StrokeStyle};
