/// Convenience result type used across snapbooth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid caller-provided data (indices, ratios, identifiers, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image or video frame failed to load or decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// A raster drawing surface could not be created for the requested size.
    #[error("canvas context error: {0}")]
    CanvasContext(String),

    /// A remote image would be drawn without going through the image proxy.
    #[error("cross-origin error: {0}")]
    CrossOrigin(String),

    /// The image proxy rejected the request or the upstream fetch failed.
    #[error("image proxy error ({status}): {message}")]
    Proxy {
        /// HTTP-style status code (`400` for bad requests, `502` for upstream failures).
        status: u16,
        /// Human-readable reason.
        message: String,
    },

    /// Encoding the output image failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing config and catalogs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::CanvasContext`] value.
    pub fn canvas_context(msg: impl Into<String>) -> Self {
        Self::CanvasContext(msg.into())
    }

    /// Build a [`BoothError::CrossOrigin`] value.
    pub fn cross_origin(msg: impl Into<String>) -> Self {
        Self::CrossOrigin(msg.into())
    }

    /// Build a [`BoothError::Proxy`] value.
    pub fn proxy(status: u16, msg: impl Into<String>) -> Self {
        Self::Proxy {
            status,
            message: msg.into(),
        }
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for failures a pipeline stage may recover from by keeping its prior buffer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::CrossOrigin(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
