//! Configuration module for layout-preview
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PREVIEW_*)
//! 3. `--config <FILE>` or project config (./layout-preview.toml)
//! 4. User config (~/.config/layout-preview/config.toml)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, parse_bool, parse_number, EnvVarValidator, BOOL_VALUES};
pub use loader::{
    user_config_path, with_env_overrides_from, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{ColorMode, Config, OutputConfig, ViewConfig, ViewerConfig, WatchConfig};
