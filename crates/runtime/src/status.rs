use std::io;

/// Trait for writing status messages (scan progress, completion, fallback notices).
///
/// Status lines are diagnostics, never data: every implementation here keeps
/// them off stdout.
pub trait StatusWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()>;
}

/// Default status writer that outputs to stderr.
pub struct StderrWriter;

impl StatusWriter for StderrWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()> {
        eprintln!("{}", msg);
        Ok(())
    }
}

/// Discards everything. Used for `--quiet`.
pub struct SilentWriter;

impl StatusWriter for SilentWriter {
    fn write_status(&mut self, _msg: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Buffering status writer for testing.
#[derive(Default)]
pub struct BufferedWriter {
    buf: Vec<String>,
}

impl BufferedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.buf
    }
}

impl StatusWriter for BufferedWriter {
    fn write_status(&mut self, msg: &str) -> io::Result<()> {
        self.buf.push(msg.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
