use std::path::Path;

/// Convenience result type used across pixmerge.
pub type PixmergeResult<T> = Result<T, PixmergeError>;

/// Every failure a transform job can report.
///
/// All variants are recoverable values; the only panics in the crate are precondition
/// violations such as constructing a [`crate::ScaleView`] with a zero factor.
#[derive(thiserror::Error, Debug)]
pub enum PixmergeError {
    /// The file extension is not one of the supported raster formats.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The bytes could not be decoded as the declared format.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The result could not be serialized in the requested format.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// The scale factor is not a positive integer.
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// The command token matches neither `scale` nor `merge`.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The path has no extension to select a codec from.
    #[error("missing extension: {0}")]
    MissingExtension(String),

    /// The file could not be opened or read.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmergeError {
    /// Build a [`PixmergeError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`PixmergeError::DecodeFailure`] value.
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`PixmergeError::EncodeFailure`] value.
    pub fn encode_failure(msg: impl Into<String>) -> Self {
        Self::EncodeFailure(msg.into())
    }

    /// Build a [`PixmergeError::InvalidScaleFactor`] value.
    pub fn invalid_scale_factor(msg: impl Into<String>) -> Self {
        Self::InvalidScaleFactor(msg.into())
    }

    /// Build a [`PixmergeError::InvalidCommand`] value.
    pub fn invalid_command(msg: impl Into<String>) -> Self {
        Self::InvalidCommand(msg.into())
    }

    /// Build a [`PixmergeError::MissingExtension`] value for `path`.
    pub fn missing_extension(path: &Path) -> Self {
        Self::MissingExtension(format!("'{}' has no file extension", path.display()))
    }

    /// Build a [`PixmergeError::SourceUnavailable`] value for a failed open of `path`.
    pub fn source_unavailable(path: &Path, err: std::io::Error) -> Self {
        Self::SourceUnavailable(format!("cannot open '{}': {err}", path.display()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
