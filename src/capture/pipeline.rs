use crate::capture::crop::{CAPTURE_ASPECT, crop_to_aspect};
use crate::capture::source::{VideoFrameSource, capture_frame};
use crate::effects::filter::{FilterType, apply_filter};
use crate::foundation::error::BoothResult;
use crate::overlay::sticker::{StickerType, apply_sticker};
use crate::raster::buffer::RasterBuffer;

/// Recover a failed stage by keeping the buffer it started from.
pub trait Fallback {
    fn or_prior(self, prior: RasterBuffer, stage: &'static str) -> RasterBuffer;
}

impl Fallback for BoothResult<RasterBuffer> {
    fn or_prior(self, prior: RasterBuffer, stage: &'static str) -> RasterBuffer {
        match self {
            Ok(buf) => buf,
            Err(err) => {
                tracing::warn!(stage, error = %err, "stage failed; keeping previous image");
                prior
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub mirror: bool,
    pub aspect: f64,
    pub filter: FilterType,
    pub sticker: StickerType,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            mirror: true,
            aspect: CAPTURE_ASPECT,
            filter: FilterType::None,
            sticker: StickerType::None,
        }
    }
}

/// Per-slot capture: frame grab, center crop, filter, sticker.
#[derive(Clone, Debug, Default)]
pub struct CapturePipeline {
    pub settings: CaptureSettings,
}

impl CapturePipeline {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    #[tracing::instrument(
        skip_all,
        fields(filter = %self.settings.filter, sticker = %self.settings.sticker)
    )]
    pub fn capture(&self, source: &dyn VideoFrameSource) -> BoothResult<RasterBuffer> {
        let frame = capture_frame(source, self.settings.mirror)?;
        Ok(self.process(frame))
    }

    /// Run crop, filter and sticker on an already captured frame.
    ///
    /// Each stage that fails falls back to its input, so this never loses the captured frame.
    pub fn process(&self, frame: RasterBuffer) -> RasterBuffer {
        let cropped = crop_to_aspect(&frame, self.settings.aspect).or_prior(frame, "crop");

        let mut filtered = cropped.clone();
        let filtered = apply_filter(&mut filtered, self.settings.filter)
            .map(|()| filtered)
            .or_prior(cropped, "filter");

        let mut stickered = filtered.clone();
        apply_sticker(&mut stickered, self.settings.sticker)
            .map(|()| stickered)
            .or_prior(filtered, "sticker")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/pipeline.rs"]
mod tests;
