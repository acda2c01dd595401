use std::path::{Path, PathBuf};

/// Mask for the file-type sub-field of `st_mode`.
pub const S_IFMT: u32 = 0o170_000;
pub const S_IFSOCK: u32 = 0o140_000;
pub const S_IFLNK: u32 = 0o120_000;
pub const S_IFREG: u32 = 0o100_000;
pub const S_IFBLK: u32 = 0o060_000;
pub const S_IFDIR: u32 = 0o040_000;
pub const S_IFCHR: u32 = 0o020_000;
pub const S_IFIFO: u32 = 0o010_000;

/// Object type decoded from the `S_IFMT` bits of a mode value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Unknown,
}

impl FileKind {
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFREG => FileKind::Regular,
            S_IFDIR => FileKind::Directory,
            S_IFLNK => FileKind::Symlink,
            S_IFBLK => FileKind::BlockDevice,
            S_IFCHR => FileKind::CharDevice,
            S_IFIFO => FileKind::Fifo,
            S_IFSOCK => FileKind::Socket,
            _ => FileKind::Unknown,
        }
    }
}

/// One discovered filesystem object.
///
/// Records are built once, by the crawler from `lstat` or by the native
/// decoder from a raw inode item, and are read-only afterwards. Hard links
/// produce one record per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    name: String,
    object_id: u64,
    size: u64,
    mtime_secs: u64,
    mode: u32,
}

impl FileRecord {
    pub fn new(
        path: PathBuf,
        name: String,
        object_id: u64,
        size: u64,
        mtime_secs: u64,
        mode: u32,
    ) -> Self {
        Self {
            path,
            name,
            object_id,
            size,
            mtime_secs,
            mode,
        }
    }

    /// Full path as built during discovery (not canonicalized).
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inode number, or the btrfs object id when decoded natively.
    #[inline]
    pub fn object_id(&self) -> u64 {
        self.object_id
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time, Unix seconds.
    #[inline]
    pub fn mtime_secs(&self) -> u64 {
        self.mtime_secs
    }

    /// Raw `st_mode` bits: type and permissions.
    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn kind(&self) -> FileKind {
        FileKind::from_mode(self.mode)
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        self.mode & S_IFMT == S_IFREG
    }

    /// Permission bits only (including setuid/setgid/sticky).
    #[inline]
    pub fn permissions(&self) -> u32 {
        self.mode & !S_IFMT
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
