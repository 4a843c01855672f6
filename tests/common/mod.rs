//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod sources;

use serialscope::backend::PresentationBridge;
use serialscope::types::PlotFrame;
use std::time::{Duration, Instant};

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Poll the bridge until a frame satisfies `cond`, panicking after 2 seconds
pub fn wait_for_frame(
    bridge: &PresentationBridge,
    cond: impl Fn(&PlotFrame) -> bool,
) -> std::sync::Arc<PlotFrame> {
    let start = Instant::now();
    loop {
        let frame = bridge.latest();
        if cond(&frame) {
            return frame;
        }
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "condition not reached within 2s; last frame: {:?}",
            frame
        );
        std::thread::sleep(Duration::from_millis(2));
    }
}
