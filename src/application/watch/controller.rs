//! Reload controller
//!
//! Drives the viewer port: soft reload of the tracked session first, full
//! reopen when that fails. Errors never escape `reload`; they are turned into
//! events so the watch loop keeps running.

use std::path::{Path, PathBuf};

use crate::domain::ports::{SessionHandle, Viewer, ViewerResult};

use super::event::{PreviewEvent, ReloadMode, WatchOptions};

/// Result of one reload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Applied {
        mode: ReloadMode,
        session: SessionHandle,
    },
    /// Both the soft reload and the reopen failed
    Failed,
}

#[derive(Debug, Clone)]
pub struct ReloadController {
    path: PathBuf,
    show_all: bool,
    zoom_fit: bool,
    session: Option<SessionHandle>,
}

impl ReloadController {
    pub fn new(options: &WatchOptions) -> Self {
        Self {
            path: options.path.clone(),
            show_all: options.show_all,
            zoom_fit: options.zoom_fit,
            session: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session of the layout currently tracked in the viewer
    pub fn session(&self) -> Option<SessionHandle> {
        self.session
    }

    /// Track a session opened outside the controller (the initial load).
    pub fn adopt(&mut self, session: SessionHandle) {
        self.session = Some(session);
    }

    /// Apply `show_all` / `zoom_fit` to the current view, if there is one.
    pub fn apply_view_options<V: Viewer + ?Sized>(&self, viewer: &mut V) -> ViewerResult<()> {
        if !self.show_all && !self.zoom_fit {
            return Ok(());
        }
        if let Some(view) = viewer.current_view()? {
            if self.show_all {
                viewer.show_all_cells(view)?;
            }
            if self.zoom_fit {
                viewer.zoom_to_fit(view)?;
            }
        }
        Ok(())
    }

    /// Bring the viewer up to date with the file on disk.
    pub fn reload<V: Viewer + ?Sized>(
        &mut self,
        viewer: &mut V,
        events: &impl Fn(PreviewEvent),
    ) -> ReloadOutcome {
        let err = match self.soft_reload(viewer) {
            Ok((mode, session)) => return ReloadOutcome::Applied { mode, session },
            Err(err) => err,
        };
        events(PreviewEvent::SoftReloadFailed {
            message: err.to_string(),
        });

        match self.reopen(viewer) {
            Ok(session) => ReloadOutcome::Applied {
                mode: ReloadMode::Reopen,
                session,
            },
            Err(err) => {
                events(PreviewEvent::ReopenFailed {
                    message: err.to_string(),
                });
                ReloadOutcome::Failed
            }
        }
    }

    fn soft_reload<V: Viewer + ?Sized>(
        &mut self,
        viewer: &mut V,
    ) -> ViewerResult<(ReloadMode, SessionHandle)> {
        let (mode, session) = match (viewer.current_view()?, self.session) {
            (Some(view), Some(session)) => {
                viewer.reload(view, session)?;
                (ReloadMode::Soft, session)
            }
            _ => {
                let session = viewer.open(&self.path)?;
                self.session = Some(session);
                (ReloadMode::Open, session)
            }
        };
        self.apply_view_options(viewer)?;
        Ok((mode, session))
    }

    fn reopen<V: Viewer + ?Sized>(&mut self, viewer: &mut V) -> ViewerResult<SessionHandle> {
        let session = viewer.open(&self.path)?;
        self.session = Some(session);
        self.apply_view_options(viewer)?;
        Ok(session)
    }
}
