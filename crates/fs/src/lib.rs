mod error;
mod record;
mod store;
mod walker;

pub mod decode;
pub mod native;
pub mod probe;

pub use error::{DecodeError, FallbackReason};
pub use probe::{FsInfo, ProbeOutcome, probe};
pub use record::{FileKind, FileRecord};
pub use store::{RecordStore, ScanSummary};
pub use walker::crawl;
