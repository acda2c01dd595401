use std::{
    ffi::OsString,
    fs::{self, read_dir},
    io::Result,
    os::unix::fs::MetadataExt,
    path::{Path, PathBuf},
    vec,
};

use btrdex_runtime::{PROGRESS_INTERVAL, StatusWriter};
use log::{debug, warn};

use crate::{record::FileRecord, store::RecordStore};

/// One directory whose entries are still being visited.
///
/// Names are read eagerly so the directory handle is closed before any
/// child directory is opened.
struct Frame {
    dir: PathBuf,
    names: vec::IntoIter<OsString>,
}

/// Depth-first, pre-order walk of `root` using `lstat` per entry.
///
/// Every entry below `root` (not `root` itself) is appended to `store`; a
/// directory's subtree is visited before its later siblings. Symlinks are
/// recorded but never followed.
///
/// Only a failure to list `root` is returned as an error. Unreadable
/// subdirectories and entries are logged and skipped, and whatever was
/// gathered stays in `store`.
pub fn crawl(root: &Path, store: &mut RecordStore, status: &mut dyn StatusWriter) -> Result<()> {
    debug!("[walk] crawling filesystem from {:?}", root);

    let mut stack = vec![open_frame(root)?];

    while let Some(frame) = stack.last_mut() {
        let Some(name) = frame.names.next() else {
            stack.pop();
            continue;
        };

        let full_path = frame.dir.join(&name);
        let record = match inspect_path(&full_path, name) {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[walk] lstat({:?}) failed: {e}", full_path);
                continue;
            }
        };

        let subdir = record.is_dir().then(|| record.path().to_path_buf());
        store.push(record);
        report_progress(store.len(), status);

        if let Some(dir) = subdir {
            match open_frame(&dir) {
                Ok(child) => stack.push(child),
                Err(e) => warn!("[walk] read_dir({:?}) failed: {e}", dir),
            }
        }
    }

    Ok(())
}

fn open_frame(dir: &Path) -> Result<Frame> {
    let rd = read_dir(dir)?;

    let mut names = Vec::new();
    for entry_res in rd {
        match entry_res {
            Ok(entry) => names.push(entry.file_name()),
            Err(e) => warn!("[walk] error reading entry in {:?}: {e}", dir),
        }
    }

    Ok(Frame {
        dir: dir.to_path_buf(),
        names: names.into_iter(),
    })
}

/// Build a record from the entry's own metadata (no symlink resolution).
fn inspect_path(full_path: &Path, name: OsString) -> Result<FileRecord> {
    let metadata = fs::symlink_metadata(full_path)?;

    let name = match name.into_string() {
        Ok(s) => s,
        Err(raw) => raw.to_string_lossy().into_owned(),
    };

    Ok(FileRecord::new(
        full_path.to_path_buf(),
        name,
        metadata.ino(),
        metadata.size(),
        to_unix_secs(metadata.mtime()),
        metadata.mode(),
    ))
}

/// Pre-epoch timestamps clamp to 0.
fn to_unix_secs(secs: i64) -> u64 {
    u64::try_from(secs).unwrap_or(0)
}

fn report_progress(count: usize, status: &mut dyn StatusWriter) {
    if count % PROGRESS_INTERVAL == 0 {
        let _ = status.write_status(&format!("Processed {count} files..."));
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
