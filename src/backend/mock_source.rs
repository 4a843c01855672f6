//! Mock sample source for running without hardware
//!
//! Generates sample tokens from a configurable waveform across the raw
//! device range, optionally failing the first few connection attempts and
//! injecting malformed tokens, so the full acquisition path (connect retry,
//! parse-failure skip, windowing) can be exercised with no device attached.
//!
//! # Enabling
//!
//! Only available with the `mock-serial` feature:
//!
//! ```bash
//! cargo run --features mock-serial
//! ```
//!
//! With the feature enabled, setting `serial.port = "mock"` in the config
//! file selects this source instead of a real port.

use crate::backend::source::SampleSource;
use crate::error::{Result, ScopeError};
use crate::types::{RAW_SAMPLE_MAX, RAW_SAMPLE_MIN};
use std::time::Instant;

/// Waveform generated by the mock device
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockWave {
    /// Fixed value
    Constant(f32),
    /// Full-range sine with the given period
    Sine { period_secs: f32 },
    /// Full-range ramp that resets each period
    Sawtooth { period_secs: f32 },
}

impl Default for MockWave {
    fn default() -> Self {
        MockWave::Sine { period_secs: 20.0 }
    }
}

/// Sample source that synthesizes tokens instead of reading a port
pub struct MockSource {
    wave: MockWave,
    connected: bool,
    started: Instant,
    connect_failures_left: u32,
    garble_every: Option<u32>,
    reads: u32,
}

impl MockSource {
    /// Create a mock source with the default waveform
    pub fn new() -> Self {
        Self {
            wave: MockWave::default(),
            connected: false,
            started: Instant::now(),
            connect_failures_left: 0,
            garble_every: None,
            reads: 0,
        }
    }

    /// Set the generated waveform
    pub fn with_wave(mut self, wave: MockWave) -> Self {
        self.wave = wave;
        self
    }

    /// Fail the first `n` connection attempts, to exercise the retry path
    pub fn with_connect_failures(mut self, n: u32) -> Self {
        self.connect_failures_left = n;
        self
    }

    /// Make every `n`-th token malformed, to exercise the parse-skip path
    pub fn with_garble_every(mut self, n: u32) -> Self {
        self.garble_every = Some(n.max(1));
        self
    }

    fn value_at(&self, elapsed_secs: f32) -> f32 {
        let span = RAW_SAMPLE_MAX - RAW_SAMPLE_MIN;
        match self.wave {
            MockWave::Constant(v) => v,
            MockWave::Sine { period_secs } => {
                let phase = elapsed_secs / period_secs * std::f32::consts::TAU;
                RAW_SAMPLE_MIN + span * (phase.sin() * 0.5 + 0.5)
            }
            MockWave::Sawtooth { period_secs } => {
                let t = elapsed_secs % period_secs;
                RAW_SAMPLE_MIN + span * (t / period_secs)
            }
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for MockSource {
    fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }
        if self.connect_failures_left > 0 {
            self.connect_failures_left -= 1;
            return Err(ScopeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "mock device not present yet",
            )));
        }
        self.connected = true;
        self.started = Instant::now();
        tracing::info!("mock source connected");
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn read_token(&mut self) -> Result<String> {
        if !self.connected {
            return Err(ScopeError::Disconnected);
        }
        self.reads += 1;
        if let Some(n) = self.garble_every {
            if self.reads % n == 0 {
                return Ok("###".to_string());
            }
        }
        let value = self.value_at(self.started.elapsed().as_secs_f32());
        Ok(format!("{}", value.round() as i32))
    }

    fn describe(&self) -> String {
        format!("mock device ({:?})", self.wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failures_then_success() {
        let mut source = MockSource::new().with_connect_failures(2);
        assert!(source.connect().is_err());
        assert!(source.connect().is_err());
        assert!(source.connect().is_ok());
        assert!(source.is_connected());
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut source = MockSource::new();
        source.connect().unwrap();
        source.connect().unwrap();
        assert!(source.is_connected());
    }

    #[test]
    fn test_tokens_stay_in_raw_range() {
        let mut source = MockSource::new().with_wave(MockWave::Sawtooth { period_secs: 5.0 });
        source.connect().unwrap();
        for _ in 0..100 {
            let value: f32 = source.read_token().unwrap().parse().unwrap();
            assert!((RAW_SAMPLE_MIN..=RAW_SAMPLE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_constant_wave_is_deterministic() {
        let mut source = MockSource::new().with_wave(MockWave::Constant(511.0));
        source.connect().unwrap();
        assert_eq!(source.read_token().unwrap(), "511");
        assert_eq!(source.read_token().unwrap(), "511");
    }

    #[test]
    fn test_garbled_tokens_are_injected() {
        let mut source = MockSource::new()
            .with_wave(MockWave::Constant(1.0))
            .with_garble_every(3);
        source.connect().unwrap();
        let tokens: Vec<String> = (0..6).map(|_| source.read_token().unwrap()).collect();
        assert_eq!(tokens[2], "###");
        assert_eq!(tokens[5], "###");
        assert_eq!(tokens[0], "1");
    }

    #[test]
    fn test_read_without_connect_fails() {
        let mut source = MockSource::new();
        assert!(matches!(source.read_token(), Err(ScopeError::Disconnected)));
    }
}
