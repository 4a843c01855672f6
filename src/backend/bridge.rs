//! Single-slot handoff between the acquisition thread and the frontend
//!
//! The bridge holds exactly one [`PlotFrame`]: the newest complete state the
//! worker has published. The slot stores an `Arc`, so publishing swaps a
//! pointer and reading clones one; neither side ever holds the lock across
//! real work, and a reader can never observe a latest value torn from the
//! window snapshot it belongs to. Frames may be read many times (redraw
//! ticks outpace 1 Hz samples) or replaced unread; both are fine, the slot
//! semantically holds only the newest state.

use crate::types::PlotFrame;
use std::sync::{Arc, Mutex};

/// Single-writer, multi-reader slot for the newest published frame
#[derive(Debug)]
pub struct PresentationBridge {
    slot: Mutex<Arc<PlotFrame>>,
}

impl PresentationBridge {
    /// Create a bridge holding the initial (pre-acquisition) frame
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Arc::new(PlotFrame::initial())),
        }
    }

    /// Replace the slot with a newly published frame
    ///
    /// Called only by the acquisition worker.
    pub fn publish(&self, frame: PlotFrame) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Arc::new(frame);
    }

    /// Read the most recently published frame
    ///
    /// Never blocks the writer for longer than a pointer swap; the returned
    /// frame is immutable and may be stale but is always self-consistent.
    pub fn latest(&self) -> Arc<PlotFrame> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for PresentationBridge {
    fn default() -> Self {
        Self::new()
    }
}
