//! Scripted sample sources for driving the acquisition loop in tests

use serialscope::backend::SampleSource;
use serialscope::error::{Result, ScopeError};
use std::collections::VecDeque;

fn timeout_err() -> ScopeError {
    ScopeError::Io(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "scripted source idle",
    ))
}

/// Source that replays a fixed list of tokens, then times out on every read
///
/// Optionally fails the first few connection attempts to exercise the retry
/// path. `u32::MAX` failures means the device never appears.
pub struct ScriptedSource {
    tokens: VecDeque<String>,
    repeat: Option<String>,
    connect_failures_left: u32,
    connected: bool,
}

impl ScriptedSource {
    /// Replay `tokens` in order, then report read timeouts
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            repeat: None,
            connect_failures_left: 0,
            connected: false,
        }
    }

    /// Yield the same token on every read, forever
    pub fn repeating(token: &str) -> Self {
        Self {
            tokens: VecDeque::new(),
            repeat: Some(token.to_string()),
            connect_failures_left: 0,
            connected: false,
        }
    }

    /// Fail the first `n` connection attempts
    pub fn with_connect_failures(mut self, n: u32) -> Self {
        self.connect_failures_left = n;
        self
    }
}

impl SampleSource for ScriptedSource {
    fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }
        if self.connect_failures_left > 0 {
            self.connect_failures_left = self.connect_failures_left.saturating_sub(1);
            return Err(ScopeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "scripted device absent",
            )));
        }
        self.connected = true;
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
        if let Some(token) = self.tokens.pop_front() {
            return Ok(token);
        }
        match &self.repeat {
            Some(token) => Ok(token.clone()),
            None => Err(timeout_err()),
        }
    }

    fn describe(&self) -> String {
        "scripted source".to_string()
    }
}
