//! Checked integer extraction and a field view over `btrfs_inode_item`.
//!
//! Nothing here reinterprets bytes as a typed struct: every field is read by
//! offset through a bounds-checked accessor.

use bitflags::bitflags;

use crate::error::DecodeError;

/// `btrfs_inode_item` is a packed 160-byte structure on disk.
pub const INODE_ITEM_SIZE: usize = 160;

#[inline]
fn take<const N: usize>(buf: &[u8], off: usize) -> Option<[u8; N]> {
    let end = off.checked_add(N)?;
    buf.get(off..end)?.try_into().ok()
}

/// Little-endian `u32` at `off`, or `None` if it does not fit in `buf`.
#[inline]
pub fn le_u32(buf: &[u8], off: usize) -> Option<u32> {
    take::<4>(buf, off).map(u32::from_le_bytes)
}

/// Little-endian `u64` at `off`, or `None` if it does not fit in `buf`.
#[inline]
pub fn le_u64(buf: &[u8], off: usize) -> Option<u64> {
    take::<8>(buf, off).map(u64::from_le_bytes)
}

/// Native-endian `u32`, for ioctl argument buffers filled by the kernel.
#[inline]
pub fn ne_u32(buf: &[u8], off: usize) -> Option<u32> {
    take::<4>(buf, off).map(u32::from_ne_bytes)
}

/// Native-endian `u64`, for ioctl argument buffers filled by the kernel.
#[inline]
pub fn ne_u64(buf: &[u8], off: usize) -> Option<u64> {
    take::<8>(buf, off).map(u64::from_ne_bytes)
}

// Field offsets inside the packed 160-byte btrfs_inode_item.
const OFF_GENERATION: usize = 0;
const OFF_TRANSID: usize = 8;
const OFF_SIZE: usize = 16;
const OFF_NBYTES: usize = 24;
const OFF_BLOCK_GROUP: usize = 32;
const OFF_NLINK: usize = 40;
const OFF_UID: usize = 44;
const OFF_GID: usize = 48;
const OFF_MODE: usize = 52;
const OFF_RDEV: usize = 56;
const OFF_FLAGS: usize = 64;
const OFF_SEQUENCE: usize = 72;
// 4 x u64 reserved at 80..112
const OFF_ATIME: usize = 112;
const OFF_CTIME: usize = 124;
const OFF_MTIME: usize = 136;
const OFF_OTIME: usize = 148;

/// On-disk `btrfs_timespec`: 8-byte seconds followed by 4-byte nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timespec {
    pub secs: u64,
    pub nanos: u32,
}

bitflags! {
    /// Per-inode flags stored in `btrfs_inode_item.flags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InodeFlags: u64 {
        const NODATASUM  = 1 << 0;
        const NODATACOW  = 1 << 1;
        const READONLY   = 1 << 2;
        const NOCOMPRESS = 1 << 3;
        const PREALLOC   = 1 << 4;
        const SYNC       = 1 << 5;
        const IMMUTABLE  = 1 << 6;
        const APPEND     = 1 << 7;
        const NODUMP     = 1 << 8;
        const NOATIME    = 1 << 9;
        const DIRSYNC    = 1 << 10;
        const COMPRESS   = 1 << 11;
    }
}

/// Read-only view over one inode item.
///
/// Construction checks the minimum length, so the accessors below never
/// see a short buffer.
#[derive(Debug, Clone, Copy)]
pub struct InodeItem<'a> {
    bytes: &'a [u8],
}

impl<'a> InodeItem<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.len() < INODE_ITEM_SIZE {
            return Err(DecodeError::TooShort {
                needed: INODE_ITEM_SIZE,
                got: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    #[inline]
    fn u32_at(&self, off: usize) -> u32 {
        le_u32(self.bytes, off).unwrap_or_default()
    }

    #[inline]
    fn u64_at(&self, off: usize) -> u64 {
        le_u64(self.bytes, off).unwrap_or_default()
    }

    #[inline]
    fn timespec_at(&self, off: usize) -> Timespec {
        Timespec {
            secs: self.u64_at(off),
            nanos: self.u32_at(off + 8),
        }
    }

    pub fn generation(&self) -> u64 {
        self.u64_at(OFF_GENERATION)
    }

    pub fn transid(&self) -> u64 {
        self.u64_at(OFF_TRANSID)
    }

    /// Logical file size in bytes.
    pub fn size(&self) -> u64 {
        self.u64_at(OFF_SIZE)
    }

    /// Bytes actually allocated on disk.
    pub fn nbytes(&self) -> u64 {
        self.u64_at(OFF_NBYTES)
    }

    pub fn block_group(&self) -> u64 {
        self.u64_at(OFF_BLOCK_GROUP)
    }

    pub fn nlink(&self) -> u32 {
        self.u32_at(OFF_NLINK)
    }

    pub fn uid(&self) -> u32 {
        self.u32_at(OFF_UID)
    }

    pub fn gid(&self) -> u32 {
        self.u32_at(OFF_GID)
    }

    pub fn mode(&self) -> u32 {
        self.u32_at(OFF_MODE)
    }

    pub fn rdev(&self) -> u64 {
        self.u64_at(OFF_RDEV)
    }

    pub fn raw_flags(&self) -> u64 {
        self.u64_at(OFF_FLAGS)
    }

    /// Known flag bits; unknown bits are dropped.
    pub fn flags(&self) -> InodeFlags {
        InodeFlags::from_bits_truncate(self.raw_flags())
    }

    pub fn sequence(&self) -> u64 {
        self.u64_at(OFF_SEQUENCE)
    }

    pub fn atime(&self) -> Timespec {
        self.timespec_at(OFF_ATIME)
    }

    pub fn ctime(&self) -> Timespec {
        self.timespec_at(OFF_CTIME)
    }

    pub fn mtime(&self) -> Timespec {
        self.timespec_at(OFF_MTIME)
    }

    /// Creation time.
    pub fn otime(&self) -> Timespec {
        self.timespec_at(OFF_OTIME)
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
