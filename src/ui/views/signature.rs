use crate::ui::primitives::icon::Icon;
use layout_preview::domain::value_objects::FileSignature;

pub fn render_signature(
    path: &str,
    signature: Option<&FileSignature>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    match signature {
        Some(sig) => format!(
            "{} {}\n  mtime_ns: {}\n  ctime_ns: {}\n  size:     {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            path,
            sig.mtime_ns(),
            sig.ctime_ns(),
            sig.size()
        ),
        None => format!(
            "{} {}: missing or not a regular file\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            path
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_components() {
        let sig = FileSignature::new(1_000, 2_000, 42);
        let rendered = render_signature("chip.gds", Some(&sig), false, false);
        assert!(rendered.starts_with("[OK] chip.gds\n"));
        assert!(rendered.contains("mtime_ns: 1000"));
        assert!(rendered.contains("ctime_ns: 2000"));
        assert!(rendered.contains("size:     42"));
    }

    #[test]
    fn renders_missing_file() {
        let rendered = render_signature("gone.gds", None, false, false);
        assert_eq!(rendered, "[WARN] gone.gds: missing or not a regular file\n");
    }
}
