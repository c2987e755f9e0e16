use std::path::{Path, PathBuf};

use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::buffer::RasterBuffer;

/// Anything that can hand over the pixels of its current frame.
pub trait VideoFrameSource {
    /// Natural (unscaled) frame dimensions.
    fn natural_size(&self) -> Size;
    /// Straight RGBA8 bytes of the current frame, `width * height * 4` long.
    fn read_frame(&self) -> BoothResult<Vec<u8>>;
}

/// A fixed frame held in memory.
#[derive(Clone, Debug)]
pub struct StillFrameSource {
    frame: RasterBuffer,
}

impl StillFrameSource {
    pub fn new(frame: RasterBuffer) -> Self {
        Self { frame }
    }
}

impl VideoFrameSource for StillFrameSource {
    fn natural_size(&self) -> Size {
        self.frame.size()
    }

    fn read_frame(&self) -> BoothResult<Vec<u8>> {
        Ok(self.frame.as_bytes().to_vec())
    }
}

/// A still image file standing in for a camera, decoded once on open.
#[derive(Clone, Debug)]
pub struct ImageFileSource {
    path: PathBuf,
    frame: RasterBuffer,
}

impl ImageFileSource {
    pub fn open(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref().to_path_buf();
        let frame = RasterBuffer::open(&path)?;
        Ok(Self { path, frame })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VideoFrameSource for ImageFileSource {
    fn natural_size(&self) -> Size {
        self.frame.size()
    }

    fn read_frame(&self) -> BoothResult<Vec<u8>> {
        Ok(self.frame.as_bytes().to_vec())
    }
}

/// Grab one frame, mirrored horizontally when `mirror` is set.
pub fn capture_frame(source: &dyn VideoFrameSource, mirror: bool) -> BoothResult<RasterBuffer> {
    let size = source.natural_size();
    if size.is_empty() {
        return Err(BoothError::decode(format!(
            "video source is not ready ({}x{} frame)",
            size.width, size.height
        )));
    }
    let bytes = source.read_frame()?;
    let mut frame = RasterBuffer::from_rgba8(size.width, size.height, bytes)?;
    if mirror {
        frame.flip_horizontal();
    }
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/source.rs"]
mod tests;
