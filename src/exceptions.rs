//! Error types for ncgen

use std::fmt;

/// Main error type for generator operations
#[derive(Debug)]
pub enum ChannelError {
    /// Malformed or missing externally supplied records
    SourceData(String),

    /// Invalid generator configuration or reference assets
    Config(String),

    /// A value does not fit the fixed binary layout it is written into
    Encoding(String),

    /// Cover art could not be decoded or encoded
    Image(String),

    /// IO error
    IoError(std::io::Error),

    /// JSON parsing error
    JsonError(serde_json::Error),

    /// HTTP client could not be constructed
    Http(String),

    /// Generic error with message
    Generic(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::SourceData(msg) => write!(f, "Source data error: {msg}"),
            ChannelError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ChannelError::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            ChannelError::Image(msg) => write!(f, "Image error: {msg}"),
            ChannelError::IoError(err) => write!(f, "IO error: {err}"),
            ChannelError::JsonError(err) => write!(f, "JSON error: {err}"),
            ChannelError::Http(msg) => write!(f, "HTTP error: {msg}"),
            ChannelError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChannelError::IoError(err) => Some(err),
            ChannelError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::IoError(err)
    }
}

impl From<serde_json::Error> for ChannelError {
    fn from(err: serde_json::Error) -> Self {
        ChannelError::JsonError(err)
    }
}

impl From<image::ImageError> for ChannelError {
    fn from(err: image::ImageError) -> Self {
        ChannelError::Image(err.to_string())
    }
}

impl From<reqwest::Error> for ChannelError {
    fn from(err: reqwest::Error) -> Self {
        ChannelError::Http(err.to_string())
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Narrow a length or offset into a u32 header field.
pub(crate) fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| ChannelError::Encoding(format!("{what} does not fit in u32: {value}")))
}

/// Narrow a count into a single-byte field.
pub(crate) fn to_u8(value: usize, what: &str) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| ChannelError::Encoding(format!("{what} does not fit in u8: {value}")))
}
