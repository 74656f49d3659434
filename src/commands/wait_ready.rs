use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use layout_preview::infrastructure::ready::wait_for_ready;

const READY_POLL_MS: u64 = 20;

pub fn cmd_wait_ready(file: &Path, timeout_ms: u64, json: bool) -> Result<()> {
    let waited = wait_for_ready(
        file,
        Duration::from_millis(timeout_ms),
        Duration::from_millis(READY_POLL_MS),
    )?;

    if json {
        let output = serde_json::json!({
            "event": "ready",
            "signal_path": file.display().to_string(),
            "waited_ms": waited.as_millis() as u64,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Ready after {}ms: {}", waited.as_millis(), file.display());
    }
    Ok(())
}
