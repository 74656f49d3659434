//! Debounce state machine
//!
//! Fed one signature observation per poll. A change is only reported as
//! settled once the same signature has been seen `required` times in a row,
//! so a file that is still being written never reaches the viewer.

use crate::domain::value_objects::FileSignature;

/// What a single poll concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// File missing or not statable, nothing learned this cycle
    Missing,
    /// The observed content is what the viewer already shows
    Current,
    /// A change is pending but has not been stable long enough
    Settling { count: u32, required: u32 },
    /// The change has settled and should be reloaded
    Settled(FileSignature),
}

/// Watcher state for debouncing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchState {
    last_applied_sig: Option<FileSignature>,
    pending_sig: Option<FileSignature>,
    pending_count: u32,
}

impl WatchState {
    /// Seed the state with the signature of the content already loaded.
    pub fn new(applied: Option<FileSignature>) -> Self {
        Self {
            last_applied_sig: applied,
            pending_sig: applied,
            pending_count: 0,
        }
    }

    /// Record one observation and decide what to do with it.
    ///
    /// A missing observation leaves the state untouched.
    pub fn observe(&mut self, sig: Option<FileSignature>, required: u32) -> PollDecision {
        let Some(sig) = sig else {
            return PollDecision::Missing;
        };

        if self.pending_sig == Some(sig) {
            self.pending_count = self.pending_count.saturating_add(1);
        } else {
            self.pending_sig = Some(sig);
            self.pending_count = 1;
        }

        if self.pending_sig == self.last_applied_sig {
            return PollDecision::Current;
        }

        let required = required.max(1);
        if self.pending_count < required {
            return PollDecision::Settling {
                count: self.pending_count,
                required,
            };
        }

        PollDecision::Settled(sig)
    }

    /// The pending signature is now what the viewer shows (or was attempted).
    pub fn mark_applied(&mut self) {
        self.last_applied_sig = self.pending_sig;
    }

    pub fn last_applied_sig(&self) -> Option<FileSignature> {
        self.last_applied_sig
    }

    pub fn pending_sig(&self) -> Option<FileSignature> {
        self.pending_sig
    }

    pub fn pending_count(&self) -> u32 {
        self.pending_count
    }
}

impl Default for WatchState {
    fn default() -> Self {
        Self::new(None)
    }
}
