//! Rendering frontend
//!
//! Runs entirely on the UI thread. [`ScopeApp`] is the eframe application;
//! [`plot`] holds the pure marker-layout math and the painting helpers it
//! uses. The frontend's only views into the acquisition side are the
//! published frames and the control capability.

pub mod app;
pub mod plot;

pub use app::ScopeApp;
pub use plot::{draw_signal, layout_markers, linear_map, MARKER_RADIUS, REGION_INSET};
