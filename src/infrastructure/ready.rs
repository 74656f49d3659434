//! Ready signal
//!
//! A side-channel marker file telling the launching process that the viewer
//! has finished its first load.

use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{PreviewError, PreviewResult};

/// Content written to the marker file
pub const READY_MARKER: &str = "ready\n";

/// Write the ready marker to `path`.
///
/// The marker is written to a temporary sibling and renamed into place, so a
/// waiter never sees a half-written marker.
pub fn write_ready_signal(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(READY_MARKER.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Whether `path` currently holds the ready marker.
pub fn is_ready(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|content| content == READY_MARKER)
        .unwrap_or(false)
}

/// Block until the ready marker appears, returning how long it took.
pub fn wait_for_ready(path: &Path, timeout: Duration, poll: Duration) -> PreviewResult<Duration> {
    let started = Instant::now();
    loop {
        if is_ready(path) {
            return Ok(started.elapsed());
        }
        if started.elapsed() >= timeout {
            return Err(PreviewError::ReadyTimeout {
                path: path.to_path_buf(),
                waited_ms: timeout.as_millis() as u64,
            });
        }
        thread::sleep(poll);
    }
}
