pub const PROGRAM_NAME: &str = "btrdex";
pub const PROGRAM_LOG_LEVEL: &str = "BTRDEX_LOG_LEVEL";

/// Emit a progress line every time the record count crosses a multiple of this.
pub const PROGRESS_INTERVAL: usize = 1000;

/// Format tag written into the structured output header.
/// Downstream importers key on this exact value.
pub const FORMAT_TAG: &str = "btrfs_metadata";

/// Timestamp layout for every time value we emit (always UTC).
pub const ISO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
