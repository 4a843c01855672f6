//! # SerialScope: real-time scope for a serial-attached signal
//!
//! Samples a single scalar signal from a serial device at a fixed rate and
//! renders it as a scrolling time-series of markers, with a pause/resume
//! gate. The acquisition loop runs on its own thread and hands frames to
//! the eframe/egui frontend through a single-slot bridge.
//!
//! ## Architecture
//!
//! - **Backend**: serial polling on a dedicated thread; connect-with-retry,
//!   one parsed sample per period, windowed buffer with reset-on-overflow
//! - **Frontend**: eframe/egui window with a pause toggle and the signal pane
//! - **Bridge**: single-writer slot holding the newest complete frame
//! - **Control**: `Controllable` capability (pause flag, stop request) so the
//!   UI layer never holds thread or transport types
//!
//! ## Example
//!
//! ```ignore
//! use serialscope::{
//!     backend::{spawn_acquisition, PresentationBridge, SerialSource},
//!     config::AppConfig,
//!     frontend::ScopeApp,
//! };
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load_or_default("serialscope.toml")?;
//!     let bridge = Arc::new(PresentationBridge::new());
//!     let source = Box::new(SerialSource::new(config.serial.clone()));
//!     let handle = spawn_acquisition(source, &config.acquisition, bridge.clone())?;
//!     let controls = handle.controls();
//!     let capacity = config.acquisition.window_capacity();
//!
//!     eframe::run_native(
//!         "Serial Scope",
//!         eframe::NativeOptions::default(),
//!         Box::new(move |_cc| {
//!             Ok(Box::new(ScopeApp::new(bridge, controls, capacity, config.ui)))
//!         }),
//!     )?;
//!
//!     handle.shutdown();
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use app::ScopeApp;
pub use backend::{
    spawn_acquisition, AcquisitionHandle, Controllable, PresentationBridge, SampleSource,
    SerialSource,
};
pub use config::AppConfig;
pub use error::{Result, ScopeError};
pub use types::{LinkStatus, PlotFrame, Sample, SampleWindow};
