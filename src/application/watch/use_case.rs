//! Watch Use Case implementation

use std::thread;
use std::time::Instant;

use crate::domain::ports::{EventPump, PumpStatus, SessionHandle, Viewer};
use crate::domain::value_objects::{signature, FileSignature};
use crate::error::{PreviewError, PreviewResult};
use crate::infrastructure::ready::write_ready_signal;

use super::controller::{ReloadController, ReloadOutcome};
use super::event::{PreviewEvent, WatchOptions};
use super::state::{PollDecision, WatchState};

/// Summary returned when the viewer goes away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchReport {
    pub state: WatchState,
    /// Settled changes that reached the viewer
    pub reloads: usize,
    /// Settled changes where both reload paths failed
    pub failed_reloads: usize,
    pub session: Option<SessionHandle>,
}

/// Watch Use Case
///
/// Orchestrates the initial load and the poll loop. This is the main entry
/// point for the `layout-preview watch` command.
pub struct WatchUseCase {
    options: WatchOptions,
    state: WatchState,
    controller: ReloadController,
    on_ready: Option<Box<dyn FnOnce()>>,
    started: bool,
    reloads: usize,
    failed_reloads: usize,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions) -> Self {
        let controller = ReloadController::new(&options);
        Self {
            options,
            state: WatchState::default(),
            controller,
            on_ready: None,
            started: false,
            reloads: 0,
            failed_reloads: 0,
        }
    }

    /// Run `on_ready` once, right after the first successful load.
    pub fn with_on_ready(mut self, on_ready: impl FnOnce() + 'static) -> Self {
        self.on_ready = Some(Box::new(on_ready));
        self
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub fn report(&self) -> WatchReport {
        WatchReport {
            state: self.state.clone(),
            reloads: self.reloads,
            failed_reloads: self.failed_reloads,
            session: self.controller.session(),
        }
    }

    /// Perform the first load, retrying until the configured deadline.
    ///
    /// The writer may not have created the file yet when the watcher starts,
    /// so load failures are retried. Once the deadline passes the last error
    /// is returned.
    pub fn start<H>(&mut self, host: &mut H, events: &impl Fn(PreviewEvent)) -> PreviewResult<()>
    where
        H: Viewer + EventPump + ?Sized,
    {
        let path = self.options.path.clone();
        let deadline = Instant::now() + self.options.initial_load_timeout;
        let retry_delay = self.options.initial_retry_delay();
        let mut attempts = 0u32;

        let (session, loaded_sig) = loop {
            attempts += 1;
            // Taken before the load so a write racing the load is seen as a change.
            let pre_load_sig = signature(&path);
            match host.open(&path) {
                Ok(session) => break (session, pre_load_sig),
                Err(source) => {
                    if Instant::now() >= deadline {
                        return Err(PreviewError::InitialLoad {
                            path,
                            attempts,
                            source,
                        });
                    }
                    events(PreviewEvent::InitialLoadRetry {
                        attempt: attempts,
                        message: source.to_string(),
                    });
                    host.process_events();
                    thread::sleep(retry_delay);
                }
            }
        };

        self.controller.adopt(session);
        self.controller.apply_view_options(host)?;
        events(PreviewEvent::Loaded {
            path: path.display().to_string(),
            session: session.index(),
        });

        self.signal_ready(events);
        self.state = WatchState::new(loaded_sig);
        self.started = true;
        Ok(())
    }

    fn signal_ready(&mut self, events: &impl Fn(PreviewEvent)) {
        if let Some(signal_path) = &self.options.ready_signal_path {
            if let Err(e) = write_ready_signal(signal_path) {
                events(PreviewEvent::ReadySignalFailed {
                    signal_path: signal_path.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
        events(PreviewEvent::Ready {
            signal_path: self
                .options
                .ready_signal_path
                .as_ref()
                .map(|p| p.display().to_string()),
        });
        if let Some(on_ready) = self.on_ready.take() {
            on_ready();
        }
    }

    /// Run one polling cycle against the file's current signature.
    pub fn poll_once<V>(&mut self, viewer: &mut V, events: &impl Fn(PreviewEvent)) -> PollDecision
    where
        V: Viewer + ?Sized,
    {
        let observed = signature(&self.options.path);
        self.apply_observation(observed, viewer, events)
    }

    /// Feed an already taken observation through the debounce gate.
    pub fn apply_observation<V>(
        &mut self,
        observed: Option<FileSignature>,
        viewer: &mut V,
        events: &impl Fn(PreviewEvent),
    ) -> PollDecision
    where
        V: Viewer + ?Sized,
    {
        let decision = self
            .state
            .observe(observed, self.options.stable_samples_required);

        match decision {
            PollDecision::Settling { count, required } => {
                events(PreviewEvent::ChangeObserved {
                    pending_count: count,
                    required,
                });
            }
            PollDecision::Settled(sig) => {
                events(PreviewEvent::Settled { size: sig.size() });
                match self.controller.reload(viewer, events) {
                    ReloadOutcome::Applied { mode, session } => {
                        self.reloads += 1;
                        events(PreviewEvent::Reloaded {
                            mode,
                            session: session.index(),
                        });
                    }
                    ReloadOutcome::Failed => self.failed_reloads += 1,
                }
                // Applied even on failure: the next write produces a new
                // signature and a fresh debounce cycle.
                self.state.mark_applied();
            }
            PollDecision::Missing | PollDecision::Current => {}
        }

        decision
    }

    /// Load the file if needed, then poll until the viewer closes.
    ///
    /// Each cycle processes viewer events, sleeps one poll interval and then
    /// polls. There is no other way out of the loop.
    pub fn run<H>(&mut self, host: &mut H, events: &impl Fn(PreviewEvent)) -> PreviewResult<WatchReport>
    where
        H: Viewer + EventPump + ?Sized,
    {
        if !self.started {
            self.start(host, events)?;
        }

        loop {
            if host.process_events() == PumpStatus::Closed {
                events(PreviewEvent::ViewerClosed {
                    reloads: self.reloads,
                });
                return Ok(self.report());
            }
            thread::sleep(self.options.poll_interval);
            self.poll_once(host, events);
        }
    }
}

/// Start watching `options.path` and keep `host` in sync with it.
pub fn watch<H>(
    options: WatchOptions,
    host: &mut H,
    event_callback: impl Fn(PreviewEvent),
) -> PreviewResult<WatchReport>
where
    H: Viewer + EventPump + ?Sized,
{
    event_callback(PreviewEvent::WatchStarted {
        path: options.path.display().to_string(),
        poll_interval_ms: options.poll_interval.as_millis() as u64,
        stable_samples_required: options.stable_samples_required,
    });

    let mut use_case = WatchUseCase::new(options);
    use_case.run(host, &event_callback)
}
