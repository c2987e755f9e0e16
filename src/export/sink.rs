use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{BoothError, BoothResult};
use crate::raster::encode::EncodedImage;

/// Bytes sent per progress report unless a sink is configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Transfer progress reported while an upload runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    /// `loaded / total` in whole percent, 100 for an empty upload.
    pub percentage: u8,
}

impl UploadProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            100
        } else {
            (loaded.min(total) * 100 / total) as u8
        };
        Self {
            loaded,
            total,
            percentage,
        }
    }
}

/// Where an uploaded photo ended up.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    pub url: String,
}

/// Destination for exported layouts.
///
/// `progress` is called with monotonically increasing `loaded` values, ending at `total`.
pub trait PhotoUploadSink {
    fn upload(
        &mut self,
        image: &EncodedImage,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> BoothResult<UploadReceipt>;
}

fn report_chunks(total: usize, chunk_size: usize, progress: &mut dyn FnMut(UploadProgress)) {
    let step = chunk_size.max(1);
    let mut loaded = 0usize;
    progress(UploadProgress::new(0, total as u64));
    while loaded < total {
        loaded = (loaded + step).min(total);
        progress(UploadProgress::new(loaded as u64, total as u64));
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug)]
pub struct InMemoryUploadSink {
    chunk_size: usize,
    uploads: Vec<(UploadReceipt, EncodedImage)>,
}

impl Default for InMemoryUploadSink {
    fn default() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }
}

impl InMemoryUploadSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            uploads: Vec::new(),
        }
    }

    pub fn uploads(&self) -> &[(UploadReceipt, EncodedImage)] {
        &self.uploads
    }
}

impl PhotoUploadSink for InMemoryUploadSink {
    fn upload(
        &mut self,
        image: &EncodedImage,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> BoothResult<UploadReceipt> {
        if image.is_empty() {
            return Err(BoothError::validation("refusing to upload an empty image"));
        }
        report_chunks(image.len(), self.chunk_size, progress);
        let id = format!("photo-{}", self.uploads.len() + 1);
        let receipt = UploadReceipt {
            url: format!("memory://uploads/{id}.{}", image.format.extension()),
            id,
        };
        self.uploads.push((receipt.clone(), image.clone()));
        Ok(receipt)
    }
}

/// Writes each upload as a new file in a directory and returns its `file://` URL.
#[derive(Debug)]
pub struct DirectoryUploadSink {
    dir: PathBuf,
    chunk_size: usize,
}

impl DirectoryUploadSink {
    pub fn new(dir: impl Into<PathBuf>) -> BoothResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create upload directory '{}'", dir.display()))?;
        let dir = dir
            .canonicalize()
            .with_context(|| format!("resolve upload directory '{}'", dir.display()))?;
        Ok(Self {
            dir,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_free_id(&self, ext: &str) -> (String, PathBuf) {
        let mut n = 1usize;
        loop {
            let id = format!("photo-{n:04}");
            let path = self.dir.join(format!("{id}.{ext}"));
            if !path.exists() {
                return (id, path);
            }
            n += 1;
        }
    }
}

/// Write `bytes` to `out` in chunks, reporting progress. On failure the partial file at `path`
/// is removed so its id can be reused.
fn write_or_discard<W: Write>(
    path: &Path,
    mut out: W,
    bytes: &[u8],
    chunk_size: usize,
    progress: &mut dyn FnMut(UploadProgress),
) -> BoothResult<()> {
    let total = bytes.len() as u64;
    let mut loaded = 0u64;
    progress(UploadProgress::new(0, total));
    let written = bytes
        .chunks(chunk_size.max(1))
        .try_for_each(|chunk| -> std::io::Result<()> {
            out.write_all(chunk)?;
            loaded += chunk.len() as u64;
            progress(UploadProgress::new(loaded, total));
            Ok(())
        })
        .and_then(|()| out.flush());
    drop(out);

    if let Err(err) = written {
        if let Err(rm) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "could not remove partial upload");
        }
        return Err(anyhow::Error::new(err)
            .context(format!("write upload file '{}'", path.display()))
            .into());
    }
    Ok(())
}

impl PhotoUploadSink for DirectoryUploadSink {
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display(), bytes = image.len()))]
    fn upload(
        &mut self,
        image: &EncodedImage,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> BoothResult<UploadReceipt> {
        if image.is_empty() {
            return Err(BoothError::validation("refusing to upload an empty image"));
        }
        let (id, path) = self.next_free_id(image.format.extension());
        let file = File::create_new(&path)
            .with_context(|| format!("create upload file '{}'", path.display()))?;
        write_or_discard(&path, file, &image.bytes, self.chunk_size, progress)?;

        tracing::debug!(%id, path = %path.display(), "upload stored");
        Ok(UploadReceipt {
            url: format!("file://{}", path.display()),
            id,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
