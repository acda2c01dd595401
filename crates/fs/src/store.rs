use std::slice;

use crate::record::FileRecord;

/// Append-only, order-preserving collection of records for one scan.
///
/// Iteration order equals discovery order.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<FileRecord>,
}

/// Aggregate figures over a gathered record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub entries: usize,
    pub directories: usize,
    /// Everything that is not a directory, symlinks and specials included.
    pub files: usize,
    /// Sum of non-directory sizes.
    pub total_bytes: u64,
    pub latest_mtime: Option<u64>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            entries: self.records.len(),
            ..ScanSummary::default()
        };

        for rec in &self.records {
            if rec.is_dir() {
                summary.directories += 1;
            } else {
                summary.files += 1;
                summary.total_bytes = summary.total_bytes.saturating_add(rec.size());
            }

            let mtime = rec.mtime_secs();
            summary.latest_mtime = Some(summary.latest_mtime.map_or(mtime, |m| m.max(mtime)));
        }

        summary
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a FileRecord;
    type IntoIter = slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Extend<FileRecord> for RecordStore {
    fn extend<I: IntoIterator<Item = FileRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
