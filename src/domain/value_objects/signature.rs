//! File signature value object
//!
//! A cheap proxy for "the file content changed": modification time, change
//! time and size. Compared for equality only.

use std::fs::Metadata;
use std::path::Path;

use serde::Serialize;

/// Metadata fingerprint of a file on disk.
///
/// Times are nanoseconds since the Unix epoch. There is intentionally no
/// ordering: a signature is either the same as another one or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FileSignature {
    mtime_ns: i128,
    ctime_ns: i128,
    size: u64,
}

impl FileSignature {
    pub fn new(mtime_ns: i128, ctime_ns: i128, size: u64) -> Self {
        Self {
            mtime_ns,
            ctime_ns,
            size,
        }
    }

    pub fn from_metadata(meta: &Metadata) -> Self {
        let (mtime_ns, ctime_ns) = platform_times(meta);
        Self::new(mtime_ns, ctime_ns, meta.len())
    }

    pub fn mtime_ns(&self) -> i128 {
        self.mtime_ns
    }

    pub fn ctime_ns(&self) -> i128 {
        self.ctime_ns
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Read the current signature of `path`.
///
/// Returns `None` when the path is missing, is not a regular file, or cannot
/// be stat'ed. Writers that replace files atomically leave short gaps where
/// this is expected.
pub fn signature(path: &Path) -> Option<FileSignature> {
    let meta = std::fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    Some(FileSignature::from_metadata(&meta))
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

#[cfg(unix)]
fn platform_times(meta: &Metadata) -> (i128, i128) {
    use std::os::unix::fs::MetadataExt;

    let mtime = i128::from(meta.mtime()) * NANOS_PER_SEC + i128::from(meta.mtime_nsec());
    let ctime = i128::from(meta.ctime()) * NANOS_PER_SEC + i128::from(meta.ctime_nsec());
    (mtime, ctime)
}

#[cfg(not(unix))]
fn platform_times(meta: &Metadata) -> (i128, i128) {
    let mtime = meta.modified().ok().map(system_time_ns).unwrap_or(0);
    // No inode change time here; creation time is the closest secondary field.
    let ctime = meta.created().ok().map(system_time_ns).unwrap_or(0);
    (mtime, ctime)
}

#[cfg(not(unix))]
fn system_time_ns(time: std::time::SystemTime) -> i128 {
    match time.duration_since(std::time::UNIX_EPOCH) {
        Ok(d) => i128::from(d.as_secs()) * NANOS_PER_SEC + i128::from(d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            -(i128::from(d.as_secs()) * NANOS_PER_SEC + i128::from(d.subsec_nanos()))
        }
    }
}
