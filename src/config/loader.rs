//! Configuration loading

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PreviewError, PreviewResult};

use super::env_validator::{levenshtein, parse_bool, parse_number, EnvVarValidator, BOOL_VALUES};
use super::types::Config;

/// File name of the project-local config
pub const PROJECT_CONFIG_FILE: &str = "layout-preview.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PreviewResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PreviewError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit config, project config, user config, or defaults.
///
/// An explicit file must exist and parse. The project and user files are
/// only used when present; the first one found wins.
pub fn load_layered(
    explicit: Option<&Path>,
    project_root: Option<&Path>,
) -> PreviewResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            return load_with_warnings(&project_config);
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            return load_with_warnings(&user_config);
        }
    }

    Ok((Config::default(), Vec::new()))
}

/// `~/.config/layout-preview/config.toml` (platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("layout-preview").join("config.toml"))
}

/// Apply environment variable overrides (PREVIEW_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides read through `get_env`, writing warnings to `writer`.
pub fn with_env_overrides_from<W: Write>(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) -> Config {
    // PREVIEW_GDS_FILE
    if let Some(path) = get_env("PREVIEW_GDS_FILE").filter(|p| !p.trim().is_empty()) {
        config.watch.path = Some(PathBuf::from(path));
    }

    // PREVIEW_READY_FILE
    if let Some(path) = get_env("PREVIEW_READY_FILE").filter(|p| !p.trim().is_empty()) {
        config.watch.ready_signal_path = Some(PathBuf::from(path));
    }

    let number = EnvVarValidator::new("PREVIEW_REFRESH_MS", &["<milliseconds>"]);
    if let Some(raw) = get_env("PREVIEW_REFRESH_MS") {
        config.watch.poll_interval_ms =
            number.parse_with_writer(&raw, parse_number, config.watch.poll_interval_ms, writer);
    }

    let number = EnvVarValidator::new("PREVIEW_STABLE_SAMPLES", &["<count>"]);
    if let Some(raw) = get_env("PREVIEW_STABLE_SAMPLES") {
        let current = u64::from(config.watch.stable_samples_required);
        let samples = number.parse_with_writer(&raw, parse_number, current, writer);
        config.watch.stable_samples_required = u32::try_from(samples).unwrap_or(u32::MAX);
    }

    let number = EnvVarValidator::new("PREVIEW_INITIAL_TIMEOUT_MS", &["<milliseconds>"]);
    if let Some(raw) = get_env("PREVIEW_INITIAL_TIMEOUT_MS") {
        config.watch.initial_load_timeout_ms = number.parse_with_writer(
            &raw,
            parse_number,
            config.watch.initial_load_timeout_ms,
            writer,
        );
    }

    let flag = EnvVarValidator::new("PREVIEW_SHOW_ALL", BOOL_VALUES);
    if let Some(raw) = get_env("PREVIEW_SHOW_ALL") {
        config.view.show_all = flag.parse_with_writer(&raw, parse_bool, config.view.show_all, writer);
    }

    let flag = EnvVarValidator::new("PREVIEW_ZOOM_FIT", BOOL_VALUES);
    if let Some(raw) = get_env("PREVIEW_ZOOM_FIT") {
        config.view.zoom_fit = flag.parse_with_writer(&raw, parse_bool, config.view.zoom_fit, writer);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "path",
        "poll_interval_ms",
        "stable_samples_required",
        "initial_load_timeout_ms",
        "ready_signal_path",
        "view",
        "show_all",
        "zoom_fit",
        "viewer",
        "command",
        "reload_command",
        "show_all_command",
        "zoom_fit_command",
        "exit_with_viewer",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
