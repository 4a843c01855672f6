//! Core data types for the serial scope
//!
//! This module contains the fundamental data structures shared between the
//! acquisition backend and the rendering frontend.
//!
//! # Main Types
//!
//! - [`Sample`] - One scalar reading from the device
//! - [`SampleWindow`] - Fixed-capacity time-series store with reset-on-overflow
//! - [`LinkStatus`] - Connection state of the acquisition loop
//! - [`AcquisitionStats`] - Read/parse counters tracked by the worker
//! - [`PlotFrame`] - The complete, immutable unit published to the frontend
//!
//! # Window Model
//!
//! The window holds at most `capacity` samples, where capacity is derived
//! from the display window length and the sample period (30 s at 1 Hz by
//! default). When an append would exceed the capacity the window is cleared
//! and the new sample becomes its sole element, so the trace restarts from
//! the left edge instead of scrolling.

/// One scalar reading from the device.
///
/// Raw device range is [`RAW_SAMPLE_MIN`, `RAW_SAMPLE_MAX`]; no timestamp is
/// stored, a sample's position in the window implies its time of arrival.
pub type Sample = f32;

/// Lowest raw value the device can report
pub const RAW_SAMPLE_MIN: Sample = 0.0;

/// Full-scale raw value of the device
pub const RAW_SAMPLE_MAX: Sample = 1023.0;

/// Value displayed before the first sample arrives
pub const INITIAL_DISPLAY_VALUE: Sample = 60.0;

/// Fixed-capacity sample store backing the scrolling plot
///
/// Insertion order is significant; there is no removal or reordering of
/// individual elements. Owned exclusively by the acquisition worker; the
/// frontend only ever sees snapshots.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Vec<Sample>,
    capacity: usize,
}

impl SampleWindow {
    /// Create an empty window holding at most `capacity` samples
    ///
    /// Callers derive the capacity from the acquisition config; a capacity of
    /// zero is rejected there (see `AcquisitionConfig::validate`).
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, clearing the window first if it is full
    ///
    /// The hard reset (rather than dropping the oldest element) is what makes
    /// the trace redraw from the left edge once the window fills up.
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.clear();
        }
        self.samples.push(sample);
    }

    /// Point-in-time copy of the stored samples, oldest first
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.clone()
    }

    /// Maximum number of samples the window holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently stored
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all stored samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Connection state of the acquisition loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// Waiting for the serial device to accept a connection
    #[default]
    Connecting,
    /// Connected and polling
    Connected,
    /// The loop has terminated and released the port
    Stopped,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Connecting => write!(f, "Connecting..."),
            LinkStatus::Connected => write!(f, "Connected"),
            LinkStatus::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Counters tracked by the acquisition worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionStats {
    /// Number of connection attempts, successful or not
    pub connect_attempts: u64,
    /// Number of samples read and parsed successfully
    pub successful_reads: u64,
    /// Number of read failures on an established connection
    pub transport_errors: u64,
    /// Number of tokens that failed to parse as a sample
    pub parse_errors: u64,
}

impl AcquisitionStats {
    /// Total number of cycles that produced no sample
    pub fn skipped_cycles(&self) -> u64 {
        self.transport_errors + self.parse_errors
    }
}

/// The complete, self-consistent state published to the frontend
///
/// A frame is immutable once published: the render side may read it any
/// number of times (redraw ticks usually outpace sample arrivals) without
/// ever observing a latest value inconsistent with the window it was
/// appended into.
#[derive(Debug, Clone)]
pub struct PlotFrame {
    /// Most recently parsed sample, retained across window resets
    pub latest: Sample,
    /// Snapshot of the sample window, oldest first
    pub samples: Vec<Sample>,
    /// Connection state at publish time
    pub status: LinkStatus,
    /// Counters at publish time
    pub stats: AcquisitionStats,
}

impl PlotFrame {
    /// The frame shown before the acquisition loop publishes anything
    pub fn initial() -> Self {
        Self {
            latest: INITIAL_DISPLAY_VALUE,
            samples: Vec::new(),
            status: LinkStatus::Connecting,
            stats: AcquisitionStats::default(),
        }
    }
}
