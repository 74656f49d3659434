use std::path::Path;

use anyhow::Result;

use layout_preview::domain::value_objects::signature;
use layout_preview::presentation::ColorWhen;

use crate::ui::context::UiContext;
use crate::ui::views::signature::render_signature;

pub fn cmd_signature(path: &Path, json: bool, color: Option<ColorWhen>) -> Result<()> {
    let sig = signature(path);

    if json {
        let output = serde_json::json!({
            "event": "signature",
            "path": path.display().to_string(),
            "signature": sig,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let config = layout_preview::config::Config::default();
    let ui = UiContext::new(json, 0, color, &config);
    print!(
        "{}",
        render_signature(&path.display().to_string(), sig.as_ref(), ui.color, ui.unicode)
    );
    Ok(())
}
