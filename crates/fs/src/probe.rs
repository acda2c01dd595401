use std::path::Path;

use log::debug;

use crate::{
    decode::{ne_u32, ne_u64},
    error::{DecodeError, FallbackReason},
};

/// Size of `struct btrfs_ioctl_fs_info_args`.
pub const FS_INFO_ARGS_SIZE: usize = 1024;

/// `_IOR(BTRFS_IOCTL_MAGIC, 31, struct btrfs_ioctl_fs_info_args)`
#[cfg(target_os = "linux")]
const BTRFS_IOC_FS_INFO: u32 = (2 << 30) | ((FS_INFO_ARGS_SIZE as u32) << 16) | (0x94 << 8) | 31;

/// Subset of the filesystem info reply we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsInfo {
    pub max_id: u64,
    pub num_devices: u64,
    pub fsid: [u8; 16],
    pub nodesize: u32,
    pub sectorsize: u32,
}

impl FsInfo {
    /// Decode from the raw ioctl argument buffer (host byte order).
    pub fn from_args(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < 40 {
            return Err(DecodeError::TooShort {
                needed: 40,
                got: buf.len(),
            });
        }

        let mut fsid = [0u8; 16];
        fsid.copy_from_slice(&buf[16..32]);

        Ok(Self {
            max_id: ne_u64(buf, 0).unwrap_or_default(),
            num_devices: ne_u64(buf, 8).unwrap_or_default(),
            fsid,
            nodesize: ne_u32(buf, 32).unwrap_or_default(),
            sectorsize: ne_u32(buf, 36).unwrap_or_default(),
        })
    }

    /// Canonical hyphenated UUID rendering of `fsid`.
    pub fn fsid_string(&self) -> String {
        let hex: String = self.fsid.iter().map(|b| format!("{b:02x}")).collect();
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

#[derive(Debug)]
pub enum ProbeOutcome {
    /// Target is btrfs and the info query was permitted.
    Native(FsInfo),
    /// Use the crawler.
    Fallback(FallbackReason),
}

impl ProbeOutcome {
    #[inline]
    pub fn is_native(&self) -> bool {
        matches!(self, ProbeOutcome::Native(_))
    }
}

/// Detect whether `path` lives on btrfs.
///
/// Opens the path read-only and issues `BTRFS_IOC_FS_INFO`. Any failure,
/// including a permission error, yields `Fallback`; the probe never errors.
pub fn probe(path: &Path) -> ProbeOutcome {
    match query_fs_info(path) {
        Ok(info) => {
            debug!(
                "[probe] btrfs detected at {:?}: fsid={} devices={} nodesize={} sectorsize={}",
                path,
                info.fsid_string(),
                info.num_devices,
                info.nodesize,
                info.sectorsize
            );
            ProbeOutcome::Native(info)
        }
        Err(reason) => {
            debug!("[probe] {:?}: {reason}", path);
            ProbeOutcome::Fallback(reason)
        }
    }
}

#[cfg(target_os = "linux")]
fn query_fs_info(path: &Path) -> Result<FsInfo, FallbackReason> {
    use std::{fs::File, io, os::fd::AsRawFd};

    let file = File::open(path).map_err(FallbackReason::Open)?;
    let mut args = [0u8; FS_INFO_ARGS_SIZE];

    // SAFETY: `args` is a writable buffer of exactly the size encoded in the
    // request number, and `file` keeps the descriptor open for the call.
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), BTRFS_IOC_FS_INFO as _, args.as_mut_ptr()) };
    if rc < 0 {
        return Err(FallbackReason::Query(io::Error::last_os_error()));
    }

    Ok(FsInfo::from_args(&args)?)
}

#[cfg(not(target_os = "linux"))]
fn query_fs_info(_path: &Path) -> Result<FsInfo, FallbackReason> {
    Err(FallbackReason::Unsupported)
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
