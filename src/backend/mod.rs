//! Acquisition backend
//!
//! Everything that runs on, or talks to, the dedicated acquisition thread.
//! The thread owns the serial source exclusively for its lifetime and
//! communicates with the UI thread through exactly two points: the
//! [`PresentationBridge`] (worker to UI, newest frame wins) and the
//! [`Controllable`] capability (UI to worker: pause flag and stop request).
//!
//! # Components
//!
//! - [`SampleSource`] - Trait boundary to the transport
//! - [`SerialSource`] - Real hardware over the `serialport` crate
//! - [`MockSource`] - Hardware-free source (feature-gated)
//! - [`AcquisitionWorker`] - The connect/poll/stop loop
//! - [`PresentationBridge`] - Single-slot frame handoff
//! - [`CancelToken`] / [`CancelGate`] - One-shot cooperative cancellation
//! - [`AcquisitionHandle`] - Owns the thread; joins it deterministically
//!
//! # Example
//!
//! ```ignore
//! use serialscope::backend::{spawn_acquisition, Controllable, PresentationBridge, SerialSource};
//! use serialscope::config::AppConfig;
//! use std::sync::Arc;
//!
//! let config = AppConfig::default();
//! let bridge = Arc::new(PresentationBridge::new());
//! let source = Box::new(SerialSource::new(config.serial.clone()));
//! let handle = spawn_acquisition(source, &config.acquisition, bridge.clone())?;
//!
//! let controls = handle.controls();
//! controls.set_paused(true);
//!
//! // ... run the UI, reading bridge.latest() on every redraw ...
//!
//! handle.shutdown(); // cancel, then join: the port is released here
//! ```

pub mod bridge;
pub mod cancel;
#[cfg(feature = "mock-serial")]
pub mod mock_source;
pub mod serial;
pub mod source;
pub mod worker;

pub use bridge::PresentationBridge;
pub use cancel::{cancel_pair, CancelGate, CancelToken};
#[cfg(feature = "mock-serial")]
pub use mock_source::{MockSource, MockWave};
pub use serial::SerialSource;
pub use source::SampleSource;
pub use worker::{parse_sample, AcquisitionWorker};

use crate::config::AcquisitionConfig;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Capability handed to the host UI
///
/// Deliberately free of UI-framework and thread types: a toggle widget flips
/// the pause state through it and a window-close handler requests the stop.
pub trait Controllable {
    /// Set whether the acquisition loop should skip its read cycles
    fn set_paused(&self, paused: bool);

    /// Current pause state
    fn is_paused(&self) -> bool;

    /// Request termination of the acquisition loop (idempotent)
    fn request_stop(&self);
}

/// Cloneable implementation of [`Controllable`] backed by the shared flags
#[derive(Debug, Clone)]
pub struct AcquisitionControls {
    paused: Arc<AtomicBool>,
    cancel: CancelToken,
}

impl Controllable for AcquisitionControls {
    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn request_stop(&self) {
        self.cancel.cancel();
    }
}

/// Owner of the acquisition thread
///
/// Dropping the handle (or calling [`shutdown`](Self::shutdown)) cancels the
/// loop and joins the thread, so the serial port is guaranteed released by
/// the time teardown completes.
pub struct AcquisitionHandle {
    controls: AcquisitionControls,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl AcquisitionHandle {
    /// Get a cloneable control capability for the UI side
    pub fn controls(&self) -> AcquisitionControls {
        self.controls.clone()
    }

    /// Cancel the loop and wait for the thread to finish
    pub fn shutdown(mut self) {
        self.join_inner();
    }

    fn join_inner(&mut self) {
        self.controls.request_stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("acquisition thread panicked");
            }
        }
    }
}

impl Drop for AcquisitionHandle {
    fn drop(&mut self) {
        self.join_inner();
    }
}

/// Spawn the acquisition thread over the given source
///
/// The loop starts unpaused, in its Connecting state. It runs until
/// [`Controllable::request_stop`] (or handle teardown) cancels it.
pub fn spawn_acquisition(
    source: Box<dyn SampleSource>,
    config: &AcquisitionConfig,
    bridge: Arc<PresentationBridge>,
) -> Result<AcquisitionHandle> {
    config.validate()?;
    let paused = Arc::new(AtomicBool::new(false));
    let (cancel, gate) = cancel_pair();
    let worker = AcquisitionWorker::new(source, config, bridge, paused.clone(), gate);
    let thread = std::thread::Builder::new()
        .name("acquisition".to_string())
        .spawn(move || worker.run())?;
    Ok(AcquisitionHandle {
        controls: AcquisitionControls { paused, cancel },
        thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::source::MockSampleSource;
    use crate::types::LinkStatus;
    use std::time::{Duration, Instant};

    fn idle_mock() -> MockSampleSource {
        let mut mock = MockSampleSource::new();
        mock.expect_describe().returning(|| "idle mock".to_string());
        mock.expect_connect().returning(|| Ok(()));
        mock.expect_read_token().returning(|| Ok("10".to_string()));
        mock.expect_disconnect().return_const(());
        mock
    }

    fn fast_config() -> AcquisitionConfig {
        AcquisitionConfig {
            sample_period_ms: 5,
            window_seconds: 1,
            connect_retry_ms: 5,
        }
    }

    #[test]
    fn test_spawn_rejects_invalid_config() {
        let bridge = Arc::new(PresentationBridge::new());
        let config = AcquisitionConfig {
            sample_period_ms: 0,
            ..Default::default()
        };
        assert!(spawn_acquisition(Box::new(idle_mock()), &config, bridge).is_err());
    }

    #[test]
    fn test_controls_toggle_pause() {
        let bridge = Arc::new(PresentationBridge::new());
        let handle = spawn_acquisition(Box::new(idle_mock()), &fast_config(), bridge).unwrap();
        let controls = handle.controls();

        assert!(!controls.is_paused());
        controls.set_paused(true);
        assert!(controls.is_paused());
        controls.set_paused(false);
        assert!(!controls.is_paused());

        handle.shutdown();
    }

    #[test]
    fn test_shutdown_joins_and_publishes_stopped() {
        let bridge = Arc::new(PresentationBridge::new());
        let handle =
            spawn_acquisition(Box::new(idle_mock()), &fast_config(), bridge.clone()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        handle.shutdown();
        assert_eq!(bridge.latest().status, LinkStatus::Stopped);
    }

    #[test]
    fn test_drop_joins_the_thread() {
        let bridge = Arc::new(PresentationBridge::new());
        let handle =
            spawn_acquisition(Box::new(idle_mock()), &fast_config(), bridge.clone()).unwrap();
        let start = Instant::now();
        drop(handle);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(bridge.latest().status, LinkStatus::Stopped);
    }

    #[test]
    fn test_stop_requests_are_idempotent() {
        let bridge = Arc::new(PresentationBridge::new());
        let handle = spawn_acquisition(Box::new(idle_mock()), &fast_config(), bridge).unwrap();
        let controls = handle.controls();
        controls.request_stop();
        controls.request_stop();
        handle.shutdown();
    }
}
