mod escape;

use std::{
    borrow::Cow,
    io::{self, Write},
};

use btrdex_fs::{FileRecord, RecordStore};
use btrdex_runtime::ISO_TIME_FORMAT;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Serialize, Serializer};

pub use escape::{csv_quote, sanitize};

/// Header row of the flat output.
pub const CSV_HEADER: &str = "path,name,inode,size,mtime,mode,is_dir";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured JSON document with a metadata header.
    #[default]
    #[value(name = "json", alias = "structured")]
    Json,
    /// Flat CSV table, one row per record.
    #[value(name = "csv", alias = "flat")]
    Csv,
}

impl OutputFormat {
    /// Create a printer for this format writing to `out`.
    pub fn make_printer<'w, W: Write + 'w>(self, out: W) -> Box<dyn RecordPrinter + 'w> {
        match self {
            OutputFormat::Json => Box::new(JsonPrinter::new(out)),
            OutputFormat::Csv => Box::new(CsvPrinter::new(out)),
        }
    }
}

/// Static context about a scan run.
#[derive(Debug, Clone, Copy)]
pub struct ScanPrintContext<'a> {
    /// When the scan started.
    pub scan_time: DateTime<Utc>,
    /// Value of `metadata.format`.
    pub format_tag: &'a str,
}

/// Renders a gathered record set.
///
/// Printers are total over any store, empty included; only failures of the
/// underlying writer are reported.
pub trait RecordPrinter {
    fn print(&mut self, store: &RecordStore, ctx: &ScanPrintContext<'_>) -> io::Result<()>;
}

/// Render Unix seconds as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(secs: u64) -> String {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp(secs, 0)
        .or_else(|| DateTime::<Utc>::from_timestamp(0, 0))
        .map(|t| t.format(ISO_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn path_text(rec: &FileRecord) -> Cow<'_, str> {
    rec.path().to_string_lossy()
}

pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata<'a>,
    files: JsonFiles<'a>,
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    total_files: usize,
    scan_time: String,
    format: &'a str,
}

struct JsonFiles<'a>(&'a RecordStore);

impl Serialize for JsonFiles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(JsonRecord::from))
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    path: Cow<'a, str>,
    name: Cow<'a, str>,
    inode: u64,
    size: u64,
    mtime: String,
    mode: u32,
    is_dir: bool,
}

impl<'a> From<&'a FileRecord> for JsonRecord<'a> {
    fn from(rec: &'a FileRecord) -> Self {
        Self {
            path: sanitize(path_text(rec)),
            name: sanitize(rec.name()),
            inode: rec.object_id(),
            size: rec.size(),
            mtime: format_timestamp(rec.mtime_secs()),
            mode: rec.mode(),
            is_dir: rec.is_dir(),
        }
    }
}

impl<W: Write> RecordPrinter for JsonPrinter<W> {
    fn print(&mut self, store: &RecordStore, ctx: &ScanPrintContext<'_>) -> io::Result<()> {
        let doc = JsonDocument {
            metadata: JsonMetadata {
                total_files: store.len(),
                scan_time: ctx.scan_time.format(ISO_TIME_FORMAT).to_string(),
                format: ctx.format_tag,
            },
            files: JsonFiles(store),
        };

        serde_json::to_writer_pretty(&mut self.out, &doc)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

pub struct CsvPrinter<W: Write> {
    out: W,
}

impl<W: Write> CsvPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn print_row(&mut self, rec: &FileRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{}",
            csv_quote(&path_text(rec)),
            csv_quote(rec.name()),
            rec.object_id(),
            rec.size(),
            csv_quote(&format_timestamp(rec.mtime_secs())),
            rec.mode(),
            rec.is_dir(),
        )
    }
}

impl<W: Write> RecordPrinter for CsvPrinter<W> {
    fn print(&mut self, store: &RecordStore, _ctx: &ScanPrintContext<'_>) -> io::Result<()> {
        writeln!(self.out, "{CSV_HEADER}")?;
        for rec in store {
            self.print_row(rec)?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
