//! Standard exit codes for the ncgen binary
//!
//! Each fatal error class maps to its own code so an operator (or the cron
//! job wrapping the generator) can tell a bad record from a full disk.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Source record error (unparsable locale, missing title data)
pub const EXIT_SOURCE_DATA_ERROR: i32 = 102;

/// Encoding error (value does not fit the container layout)
pub const EXIT_ENCODING_ERROR: i32 = 103;

/// Image error (cover art could not be decoded or encoded)
pub const EXIT_IMAGE_ERROR: i32 = 104;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 106;

/// Configuration error (invalid config file, missing reference assets)
pub const EXIT_CONFIG_ERROR: i32 = 109;

/// Map a generator error onto its exit code
pub fn exit_code_for(err: &crate::ChannelError) -> i32 {
    use crate::ChannelError;

    match err {
        ChannelError::SourceData(_) | ChannelError::JsonError(_) => EXIT_SOURCE_DATA_ERROR,
        ChannelError::Config(_) | ChannelError::Http(_) => EXIT_CONFIG_ERROR,
        ChannelError::Encoding(_) => EXIT_ENCODING_ERROR,
        ChannelError::Image(_) => EXIT_IMAGE_ERROR,
        ChannelError::IoError(_) => EXIT_IO_ERROR,
        ChannelError::Generic(_) => EXIT_ERROR,
    }
}
