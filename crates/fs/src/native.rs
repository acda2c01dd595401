use std::path::Path;

use crate::{decode::InodeItem, error::DecodeError, record::FileRecord};

/// Build a record straight from a raw inode item, bypassing `lstat`.
///
/// `item` must hold at least one full inode item; nothing is read before that
/// is checked. `path` is the already-reconstructed location of the object.
pub fn record_from_inode_item(
    object_id: u64,
    item: &[u8],
    path: &Path,
) -> Result<FileRecord, DecodeError> {
    let inode = InodeItem::parse(item)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DecodeError::MissingName(path.to_string_lossy().into_owned()))?;

    Ok(FileRecord::new(
        path.to_path_buf(),
        name,
        object_id,
        inode.size(),
        inode.mtime().secs,
        inode.mode(),
    ))
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
