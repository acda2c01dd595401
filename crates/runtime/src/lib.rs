mod config;
pub mod logging;
pub mod status;

pub use config::{
    FORMAT_TAG, ISO_TIME_FORMAT, PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRESS_INTERVAL,
};

pub use logging::init;
pub use status::{BufferedWriter, SilentWriter, StatusWriter, StderrWriter};
