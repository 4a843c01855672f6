//! Acquisition worker thread
//!
//! This module contains the loop that runs on the dedicated acquisition
//! thread and owns the serial source for its whole lifetime. It moves
//! through three states:
//!
//! - **Connecting**: retry `connect()` on a fixed interval until the device
//!   appears or cancellation is requested. The device being absent at
//!   process start is the normal case, not an error.
//! - **Polling**: once per sample period, read one token, parse it, append
//!   it to the window and publish a frame. Pausing skips the read but keeps
//!   the cadence; read and parse failures skip the cycle and are counted.
//! - **Stopped**: release the port, publish a final frame, return.
//!
//! The loop is fatal-error-free: the only way it ends is cancellation.
//! Every wait happens on the cancel gate, so a stop request wakes the
//! thread immediately instead of waiting out a sleep.
//!
//! A connection that starts failing reads keeps being polled; the loop
//! never falls back to Connecting after an initial success.

use crate::backend::bridge::PresentationBridge;
use crate::backend::cancel::CancelGate;
use crate::backend::source::SampleSource;
use crate::config::AcquisitionConfig;
use crate::error::{Result, ScopeError};
use crate::types::{
    AcquisitionStats, LinkStatus, PlotFrame, Sample, SampleWindow, INITIAL_DISPLAY_VALUE,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Decode one wire token into a sample
///
/// Whitespace (including the CR left by CRLF devices) is trimmed first.
/// Non-numeric and non-finite tokens are parse errors.
pub fn parse_sample(token: &str) -> Result<Sample> {
    let trimmed = token.trim();
    match trimmed.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ScopeError::Parse {
            token: trimmed.to_string(),
        }),
    }
}

/// The loop state and resources owned by the acquisition thread
pub struct AcquisitionWorker {
    source: Box<dyn SampleSource>,
    window: SampleWindow,
    latest: Sample,
    status: LinkStatus,
    stats: AcquisitionStats,
    bridge: Arc<PresentationBridge>,
    paused: Arc<AtomicBool>,
    gate: CancelGate,
    sample_period: Duration,
    connect_retry: Duration,
}

impl AcquisitionWorker {
    /// Create a worker; it starts running only when [`run`](Self::run) is called
    pub fn new(
        source: Box<dyn SampleSource>,
        config: &AcquisitionConfig,
        bridge: Arc<PresentationBridge>,
        paused: Arc<AtomicBool>,
        gate: CancelGate,
    ) -> Self {
        Self {
            source,
            window: SampleWindow::new(config.window_capacity()),
            latest: INITIAL_DISPLAY_VALUE,
            status: LinkStatus::Connecting,
            stats: AcquisitionStats::default(),
            bridge,
            paused,
            gate,
            sample_period: config.sample_period(),
            connect_retry: config.connect_retry(),
        }
    }

    /// Run to completion; returns once cancellation has been observed
    pub fn run(mut self) {
        tracing::info!(source = %self.source.describe(), "acquisition worker started");
        if self.connect() {
            self.poll();
        }
        self.stop();
    }

    /// Retry the connection until it succeeds; false if cancelled first
    fn connect(&mut self) -> bool {
        loop {
            if self.gate.is_cancelled() {
                return false;
            }
            self.stats.connect_attempts += 1;
            match self.source.connect() {
                Ok(()) => {
                    tracing::info!(
                        attempts = self.stats.connect_attempts,
                        "serial connection established"
                    );
                    self.status = LinkStatus::Connected;
                    self.publish();
                    return true;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "connect attempt failed, retrying");
                    self.publish();
                    if self.gate.wait(self.connect_retry) {
                        return false;
                    }
                }
            }
        }
    }

    /// Poll one sample per period until cancelled
    fn poll(&mut self) {
        loop {
            if self.gate.is_cancelled() {
                return;
            }
            if !self.paused.load(Ordering::SeqCst) {
                match self.sample_once() {
                    Ok(sample) => {
                        self.latest = sample;
                        self.window.append(sample);
                        self.stats.successful_reads += 1;
                        self.publish();
                    }
                    Err(ScopeError::Parse { token }) => {
                        self.stats.parse_errors += 1;
                        tracing::warn!(token = %token, "discarding unparseable sample");
                        self.publish();
                    }
                    Err(e) => {
                        self.stats.transport_errors += 1;
                        tracing::warn!(error = %e, "read failed, skipping cycle");
                        self.publish();
                    }
                }
            }
            if self.gate.wait(self.sample_period) {
                return;
            }
        }
    }

    fn sample_once(&mut self) -> Result<Sample> {
        let token = self.source.read_token()?;
        parse_sample(&token)
    }

    /// Release the source and publish the terminal frame
    fn stop(&mut self) {
        self.source.disconnect();
        self.status = LinkStatus::Stopped;
        self.publish();
        tracing::info!(
            reads = self.stats.successful_reads,
            skipped = self.stats.skipped_cycles(),
            "acquisition worker stopped"
        );
    }

    fn publish(&self) {
        self.bridge.publish(PlotFrame {
            latest: self.latest,
            samples: self.window.snapshot(),
            status: self.status,
            stats: self.stats,
        });
    }
}
