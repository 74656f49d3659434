//! Command-driven viewer
//!
//! Implements the `Viewer` and `EventPump` ports by running an external
//! viewer program. The viewer is spawned with the layout path, and the
//! optional reload/view commands are run to completion when requested.
//!
//! Arguments may contain `{path}` and `{session}` placeholders.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::config::ViewerConfig;
use crate::domain::ports::{
    EventPump, PumpStatus, SessionHandle, ViewHandle, Viewer, ViewerError, ViewerResult,
};
use crate::error::{PreviewError, PreviewResult};

const PATH_PLACEHOLDER: &str = "{path}";
const SESSION_PLACEHOLDER: &str = "{session}";

/// External viewer process
#[derive(Debug)]
pub struct CommandViewer {
    config: ViewerConfig,
    child: Option<Child>,
    path: Option<PathBuf>,
    session: Option<SessionHandle>,
    opened: usize,
}

impl CommandViewer {
    /// Build a viewer from config.
    ///
    /// An empty `command` leaves nothing to show the layout in, which is a
    /// fatal configuration error.
    pub fn new(config: ViewerConfig) -> PreviewResult<Self> {
        if config.command.is_empty() || config.command[0].trim().is_empty() {
            return Err(PreviewError::NoViewerSession {
                reason: "viewer.command is empty".to_string(),
            });
        }
        Ok(Self {
            config,
            child: None,
            path: None,
            session: None,
            opened: 0,
        })
    }

    /// Process id of the running viewer, if any
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    fn stop_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn run(
        &self,
        operation: &'static str,
        template: &[String],
        session: Option<SessionHandle>,
    ) -> ViewerResult<()> {
        let argv = expand(template, self.path.as_deref(), session);
        let status = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(ViewerError::Command {
                operation,
                message: format!("`{}` exited with {}", argv.join(" "), status),
            });
        }
        Ok(())
    }

    fn run_optional(&self, operation: &'static str, template: &[String]) -> ViewerResult<()> {
        if template.is_empty() {
            return Ok(());
        }
        self.run(operation, template, self.session)
    }

    fn child_running(&mut self) -> ViewerResult<bool> {
        match self.child.as_mut() {
            Some(child) => Ok(child.try_wait()?.is_none()),
            None => Ok(false),
        }
    }
}

impl Viewer for CommandViewer {
    fn open(&mut self, path: &Path) -> ViewerResult<SessionHandle> {
        if !path.is_file() {
            return Err(ViewerError::Load {
                path: path.to_path_buf(),
                message: "not a regular file".to_string(),
            });
        }

        self.stop_child();
        let session = SessionHandle(self.opened);
        let argv = expand(&self.config.command, Some(path), Some(session));
        let child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| ViewerError::Load {
                path: path.to_path_buf(),
                message: format!("cannot start `{}`: {}", argv[0], e),
            })?;

        self.child = Some(child);
        self.path = Some(path.to_path_buf());
        self.session = Some(session);
        self.opened += 1;
        Ok(session)
    }

    fn current_view(&mut self) -> ViewerResult<Option<ViewHandle>> {
        if !self.child_running()? {
            return Ok(None);
        }
        Ok(self.session.map(|s| ViewHandle(s.index())))
    }

    fn reload(&mut self, _view: ViewHandle, session: SessionHandle) -> ViewerResult<()> {
        if self.config.reload_command.is_empty() {
            return Err(ViewerError::Unsupported("reload"));
        }
        self.run("reload", &self.config.reload_command, Some(session))
    }

    fn show_all_cells(&mut self, _view: ViewHandle) -> ViewerResult<()> {
        self.run_optional("show all cells", &self.config.show_all_command)
    }

    fn zoom_to_fit(&mut self, _view: ViewHandle) -> ViewerResult<()> {
        self.run_optional("zoom to fit", &self.config.zoom_fit_command)
    }
}

impl EventPump for CommandViewer {
    fn process_events(&mut self) -> PumpStatus {
        if self.child.is_none() || !self.config.exit_with_viewer {
            return PumpStatus::Continue;
        }
        match self.child_running() {
            Ok(false) => PumpStatus::Closed,
            _ => PumpStatus::Continue,
        }
    }
}

impl Drop for CommandViewer {
    fn drop(&mut self) {
        self.stop_child();
    }
}

fn expand(template: &[String], path: Option<&Path>, session: Option<SessionHandle>) -> Vec<String> {
    let path = path.map(|p| p.display().to_string()).unwrap_or_default();
    let session = session.map(|s| s.to_string()).unwrap_or_default();
    template
        .iter()
        .map(|arg| {
            arg.replace(PATH_PLACEHOLDER, &path)
                .replace(SESSION_PLACEHOLDER, &session)
        })
        .collect()
}
