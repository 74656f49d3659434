//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose) are inherited by all subcommands
//! - Watch flags only override values that were given explicitly, so the
//!   config file and `PREVIEW_*` variables still apply underneath them

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// layout-preview - keep a layout viewer in sync with a file on disk
#[derive(Parser, Debug)]
#[command(name = "layout-preview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows every poll that sees a pending change)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a layout in the viewer and reload it whenever the file settles
    Watch(WatchArgs),

    /// Print the current change signature of a file
    Signature {
        /// File to inspect
        path: PathBuf,
    },

    /// Wait until a watcher has written its ready marker
    WaitReady {
        /// Marker file passed to `watch --ready-file`
        file: PathBuf,

        /// Give up after this many milliseconds
        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct WatchArgs {
    /// Layout file to watch (overrides PREVIEW_GDS_FILE)
    pub path: Option<PathBuf>,

    /// Config file (default: ./layout-preview.toml, then the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Poll interval in milliseconds (minimum 20)
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Consecutive identical samples required before reloading
    #[arg(long)]
    pub stable_samples: Option<u32>,

    /// Retry window for the first load in milliseconds
    #[arg(long)]
    pub initial_timeout_ms: Option<u64>,

    /// Write a ready marker to this file after the first load
    #[arg(long)]
    pub ready_file: Option<PathBuf>,

    /// Do not show all cells after loading
    #[arg(long)]
    pub no_show_all: bool,

    /// Do not zoom to fit after loading
    #[arg(long)]
    pub no_zoom_fit: bool,

    /// Viewer command; `{path}` is replaced by the layout path
    #[arg(long, num_args = 1.., value_name = "CMD", allow_hyphen_values = true)]
    pub viewer: Option<Vec<String>>,
}

impl WatchArgs {
    /// Apply flags that were given on top of `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(path) = &self.path {
            config.watch.path = Some(path.clone());
        }
        if let Some(ms) = self.poll_interval_ms {
            config.watch.poll_interval_ms = ms;
        }
        if let Some(samples) = self.stable_samples {
            config.watch.stable_samples_required = samples;
        }
        if let Some(ms) = self.initial_timeout_ms {
            config.watch.initial_load_timeout_ms = ms;
        }
        if let Some(ready) = &self.ready_file {
            config.watch.ready_signal_path = Some(ready.clone());
        }
        if self.no_show_all {
            config.view.show_all = false;
        }
        if self.no_zoom_fit {
            config.view.zoom_fit = false;
        }
        if let Some(viewer) = &self.viewer {
            config.viewer.command = viewer.clone();
        }
        config
    }
}
