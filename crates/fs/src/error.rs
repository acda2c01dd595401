use thiserror::Error;

/// Errors from decoding raw on-disk metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer is shorter than the fixed layout being decoded.
    #[error("buffer too short: need {needed} bytes, got {got}")]
    TooShort { needed: usize, got: usize },

    /// Path handed to the native decoder has no final component.
    #[error("path {0:?} has no file name component")]
    MissingName(String),
}

/// Why the probe did not select the native path. Never fatal: every variant
/// sends the caller to the crawler.
#[derive(Error, Debug)]
pub enum FallbackReason {
    #[error("cannot open for probing: {0}")]
    Open(#[source] std::io::Error),

    #[error("not a btrfs filesystem or lacks permissions: {0}")]
    Query(#[source] std::io::Error),

    #[error("filesystem info reply was malformed")]
    Malformed(#[from] DecodeError),

    #[error("btrfs probing is not supported on this platform")]
    Unsupported,
}
