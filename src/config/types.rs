//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::watch::{
    WatchOptions, DEFAULT_INITIAL_LOAD_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_STABLE_SAMPLES,
};
use crate::error::{PreviewError, PreviewResult};

use super::loader::{self, ConfigWarning};

/// Watch loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Layout file to watch
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_stable_samples")]
    pub stable_samples_required: u32,

    #[serde(default = "default_initial_load_timeout_ms")]
    pub initial_load_timeout_ms: u64,

    /// Marker file written once the first load is done
    #[serde(default)]
    pub ready_signal_path: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            path: None,
            poll_interval_ms: default_poll_interval_ms(),
            stable_samples_required: default_stable_samples(),
            initial_load_timeout_ms: default_initial_load_timeout_ms(),
            ready_signal_path: None,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_stable_samples() -> u32 {
    DEFAULT_STABLE_SAMPLES
}

fn default_initial_load_timeout_ms() -> u64 {
    DEFAULT_INITIAL_LOAD_TIMEOUT_MS
}

/// What to do with the view after each load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_true")]
    pub show_all: bool,

    #[serde(default = "default_true")]
    pub zoom_fit: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_all: true,
            zoom_fit: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// External viewer commands.
///
/// Every command is an argv list; `{path}` and `{session}` are substituted.
/// Empty optional commands mean "not supported" for reload and "no-op" for
/// the view commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_viewer_command")]
    pub command: Vec<String>,

    #[serde(default)]
    pub reload_command: Vec<String>,

    #[serde(default)]
    pub show_all_command: Vec<String>,

    #[serde(default)]
    pub zoom_fit_command: Vec<String>,

    /// Stop watching once the viewer process exits
    #[serde(default = "default_true")]
    pub exit_with_viewer: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            command: default_viewer_command(),
            reload_command: Vec::new(),
            show_all_command: Vec::new(),
            zoom_fit_command: Vec::new(),
            exit_with_viewer: true,
        }
    }
}

fn default_viewer_command() -> Vec<String> {
    vec!["klayout".to_string(), "{path}".to_string()]
}

/// Output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PreviewResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PreviewResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the project file, the user file, or defaults
    pub fn load_layered(
        explicit: Option<&Path>,
        project_root: Option<&Path>,
    ) -> PreviewResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(explicit, project_root)
    }

    /// Apply environment variable overrides (PREVIEW_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolve into watch options.
    ///
    /// Fails when no path is configured. Out-of-range numbers are clamped.
    pub fn to_watch_options(&self) -> PreviewResult<WatchOptions> {
        let path = match &self.watch.path {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => return Err(PreviewError::MissingPath),
        };

        Ok(WatchOptions::new(path)
            .with_poll_interval_ms(self.watch.poll_interval_ms)
            .with_stable_samples(self.watch.stable_samples_required)
            .with_initial_load_timeout_ms(self.watch.initial_load_timeout_ms)
            .with_show_all(self.view.show_all)
            .with_zoom_fit(self.view.zoom_fit)
            .with_ready_signal_path(self.watch.ready_signal_path.clone()))
    }
}
