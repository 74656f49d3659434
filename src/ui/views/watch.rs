use crate::ui::primitives::icon::Icon;
use layout_preview::application::watch::{PreviewEvent, ReloadMode};

pub fn render_watch_header(
    path: &str,
    viewer: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} Layout Preview\n  File:   {}\n  Viewer: {}\n  Hint:   Close the viewer or press Ctrl+C to stop\n\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        path,
        viewer
    )
}

pub fn render_watch_event(
    timestamp: &str,
    event: &PreviewEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        PreviewEvent::WatchStarted {
            path,
            poll_interval_ms,
            stable_samples_required,
        } => format!(
            "{} {} Watching: {} (every {}ms, {} stable samples)\n",
            prefix,
            icon(Icon::Watch),
            path,
            poll_interval_ms,
            stable_samples_required
        ),
        PreviewEvent::InitialLoadRetry { attempt, message } => format!(
            "{} {} Waiting for file (attempt {}): {}\n",
            prefix,
            icon(Icon::Progress),
            attempt,
            message
        ),
        PreviewEvent::Loaded { path, session } => format!(
            "{} {} Loaded {} (session {})\n",
            prefix,
            icon(Icon::Success),
            path,
            session
        ),
        PreviewEvent::Ready { signal_path } => match signal_path {
            Some(signal) => format!(
                "{} {} Ready, signalled {}\n",
                prefix,
                icon(Icon::Success),
                signal
            ),
            None => format!("{} {} Ready\n", prefix, icon(Icon::Success)),
        },
        PreviewEvent::ReadySignalFailed {
            signal_path,
            message,
        } => format!(
            "{} {} Could not write ready signal {}: {}\n",
            prefix,
            icon(Icon::Warning),
            signal_path,
            message
        ),
        PreviewEvent::ChangeObserved {
            pending_count,
            required,
        } => format!(
            "{} {} Change pending ({}/{})\n",
            prefix,
            icon(Icon::Arrow),
            pending_count,
            required
        ),
        PreviewEvent::Settled { size } => format!(
            "{} {} Changed: {} bytes\n",
            prefix,
            icon(Icon::Arrow),
            size
        ),
        PreviewEvent::Reloaded { mode, session } => {
            let how = match mode {
                ReloadMode::Soft => "Reloaded",
                ReloadMode::Open => "Opened",
                ReloadMode::Reopen => "Reopened",
            };
            format!(
                "{} {} {} (session {})\n",
                prefix,
                icon(Icon::Success),
                how,
                session
            )
        }
        PreviewEvent::SoftReloadFailed { message } => format!(
            "{} {} Reload failed, reopening: {}\n",
            prefix,
            icon(Icon::Warning),
            message
        ),
        PreviewEvent::ReopenFailed { message } => format!(
            "{} {} Error: reopen failed, waiting for next change: {}\n",
            prefix,
            icon(Icon::Error),
            message
        ),
        PreviewEvent::ViewerClosed { reloads } => format!(
            "\n{} {} Viewer closed after {} reload(s).\n",
            prefix,
            icon(Icon::Watch),
            reloads
        ),
    }
}
