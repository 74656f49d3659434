use anyhow::Result;

use layout_preview::application::watch::{watch, PreviewEvent};
use layout_preview::config::Config;
use layout_preview::infrastructure::CommandViewer;
use layout_preview::presentation::{ColorWhen, WatchArgs};

use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_watch(args: &WatchArgs, json: bool, verbose: u8, color: Option<ColorWhen>) -> Result<()> {
    // Config file < PREVIEW_* environment < CLI flags
    let cwd = std::env::current_dir().ok();
    let (config, warnings) = Config::load_layered(args.config.as_deref(), cwd.as_deref())?;
    let config = args.apply_to(config.with_env_overrides());
    let ui = UiContext::new(json, verbose, color, &config);

    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let options = config.to_watch_options()?;
    let mut viewer = CommandViewer::new(config.viewer.clone())?;

    if !json {
        print!(
            "{}",
            render_watch_header(
                &options.path.display().to_string(),
                &config.viewer.command.join(" "),
                ui.color,
                ui.unicode
            )
        );
    }

    watch(options, &mut viewer, |event| emit(&ui, &event))?;
    Ok(())
}

fn emit(ui: &UiContext, event: &PreviewEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }
    if event.is_verbose() && ui.verbose == 0 {
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_watch_event(&timestamp, event, ui.color, ui.unicode);
    if event.is_failure() {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
