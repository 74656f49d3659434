//! layout-preview CLI - live reload for external layout viewers
//!
//! Usage: layout-preview <COMMAND>
//!
//! Commands:
//!   watch       Open a layout in the viewer and reload it on settled changes
//!   signature   Print the change signature of a file
//!   wait-ready  Wait for a watcher's ready marker

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use layout_preview::presentation::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Watch(args) => commands::watch::cmd_watch(args, cli.json, cli.verbose, cli.color),
        Commands::Signature { path } => commands::signature::cmd_signature(path, cli.json, cli.color),
        Commands::WaitReady { file, timeout_ms } => {
            commands::wait_ready::cmd_wait_ready(file, *timeout_ms, cli.json)
        }
    }
}
