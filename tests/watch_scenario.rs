//! End-to-end scenario for the watch loop
//!
//! A writer creates the layout after the watcher has started and rewrites it
//! shortly after. The viewer must end up showing the final content.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use layout_preview::{
    signature, watch, EventPump, PreviewEvent, PumpStatus, SessionHandle, ViewHandle, Viewer,
    ViewerError, WatchOptions,
};
use tempfile::tempdir;

const FIRST: &str = "cell TOP v1";
const SECOND: &str = "cell TOP v2 with more polygons";

/// Records the file content every time it is loaded
struct RecordingViewer {
    shown: Vec<String>,
    view: Option<ViewHandle>,
    opened: usize,
    cycles_left: usize,
}

impl RecordingViewer {
    fn new(cycles: usize) -> Self {
        Self {
            shown: Vec::new(),
            view: None,
            opened: 0,
            cycles_left: cycles,
        }
    }

    fn capture(&mut self, path: &Path) -> Result<(), ViewerError> {
        let content = fs::read_to_string(path)?;
        self.shown.push(content);
        Ok(())
    }
}

impl Viewer for RecordingViewer {
    fn open(&mut self, path: &Path) -> Result<SessionHandle, ViewerError> {
        self.capture(path)?;
        let session = SessionHandle(self.opened);
        self.opened += 1;
        self.view = Some(ViewHandle(session.index()));
        Ok(session)
    }

    fn current_view(&mut self) -> Result<Option<ViewHandle>, ViewerError> {
        Ok(self.view)
    }

    fn reload(&mut self, _view: ViewHandle, _session: SessionHandle) -> Result<(), ViewerError> {
        Err(ViewerError::Unsupported("reload"))
    }

    fn show_all_cells(&mut self, _view: ViewHandle) -> Result<(), ViewerError> {
        Ok(())
    }

    fn zoom_to_fit(&mut self, _view: ViewHandle) -> Result<(), ViewerError> {
        Ok(())
    }
}

impl EventPump for RecordingViewer {
    fn process_events(&mut self) -> PumpStatus {
        if self.cycles_left == 0 {
            return PumpStatus::Closed;
        }
        self.cycles_left -= 1;
        PumpStatus::Continue
    }
}

fn spawn_writer(path: PathBuf) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(60));
        fs::write(&path, FIRST).unwrap();
        thread::sleep(Duration::from_millis(70));
        fs::write(&path, SECOND).unwrap();
    })
}

#[test]
fn late_file_and_quick_rewrite_end_on_final_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chip.gds");
    let writer = spawn_writer(path.clone());

    let options = WatchOptions::new(path.clone())
        .with_poll_interval_ms(20)
        .with_stable_samples(2);
    let mut viewer = RecordingViewer::new(40);
    let report = watch(options, &mut viewer, |_| {}).unwrap();
    writer.join().unwrap();

    assert_eq!(viewer.shown.last().map(String::as_str), Some(SECOND));
    assert!(viewer.shown.iter().all(|c| c == FIRST || c == SECOND));
    assert_eq!(report.state.last_applied_sig(), signature(&path));
}

#[test]
fn unchanged_file_is_loaded_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chip.gds");
    fs::write(&path, FIRST).unwrap();

    let mut viewer = RecordingViewer::new(10);
    let report = watch(WatchOptions::new(path), &mut viewer, |_| {}).unwrap();

    assert_eq!(viewer.shown, vec![FIRST.to_string()]);
    assert_eq!(report.reloads, 0);
    assert_eq!(report.failed_reloads, 0);
}

#[test]
fn settled_rewrite_falls_back_to_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chip.gds");
    fs::write(&path, FIRST).unwrap();
    let rewrite = {
        let path = path.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(80));
            fs::write(&path, SECOND).unwrap();
        })
    };

    let events = std::cell::RefCell::new(Vec::new());
    let mut viewer = RecordingViewer::new(20);
    let report = watch(WatchOptions::new(path), &mut viewer, |event| {
        events.borrow_mut().push(event)
    })
    .unwrap();
    rewrite.join().unwrap();

    assert_eq!(viewer.shown, vec![FIRST.to_string(), SECOND.to_string()]);
    assert_eq!(report.reloads, 1);
    assert_eq!(report.session, Some(SessionHandle(1)));
    let events = events.into_inner();
    assert!(events
        .iter()
        .any(|e| matches!(e, PreviewEvent::SoftReloadFailed { .. })));
    assert_eq!(
        events.last(),
        Some(&PreviewEvent::ViewerClosed { reloads: 1 })
    );
}
