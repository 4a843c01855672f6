//! Configuration for the serial scope
//!
//! Configuration is a single TOML file with three sections: the serial link
//! (`[serial]`), the acquisition loop (`[acquisition]`) and the window host
//! (`[ui]`). Every field has a default, so an empty or missing file yields a
//! working configuration for a device on the default port.
//!
//! # Example
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyUSB0"
//! baud_rate = 9600
//!
//! [acquisition]
//! sample_period_ms = 1000
//! window_seconds = 30
//! ```

use crate::error::{Result, ScopeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config filename, looked up in the working directory
pub const CONFIG_FILE: &str = "serialscope.toml";

/// Default serial port identifier
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Default baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default serial read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1500;

/// Default sample period in milliseconds (1 Hz sampling)
pub const DEFAULT_SAMPLE_PERIOD_MS: u64 = 1000;

/// Default display window length in seconds
pub const DEFAULT_WINDOW_SECONDS: u64 = 30;

/// Default interval between connection attempts in milliseconds
pub const DEFAULT_CONNECT_RETRY_MS: u64 = 1000;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Serial link settings
    pub serial: SerialConfig,
    /// Acquisition loop settings
    pub acquisition: AcquisitionConfig,
    /// Window host settings
    pub ui: UiConfig,
}

/// Serial link settings, treated as opaque by the acquisition core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port identifier, e.g. `/dev/ttyUSB0` or `COM5`
    pub port: String,
    /// Baud rate for the connection
    pub baud_rate: u32,
    /// Upper bound on a single blocking read
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    /// Read timeout as a [`Duration`]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Acquisition loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Time between samples in milliseconds
    pub sample_period_ms: u64,
    /// Length of the display window in seconds
    pub window_seconds: u64,
    /// Interval between connection attempts in milliseconds
    pub connect_retry_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: DEFAULT_SAMPLE_PERIOD_MS,
            window_seconds: DEFAULT_WINDOW_SECONDS,
            connect_retry_ms: DEFAULT_CONNECT_RETRY_MS,
        }
    }
}

impl AcquisitionConfig {
    /// Sample period as a [`Duration`]
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms)
    }

    /// Connection retry interval as a [`Duration`]
    pub fn connect_retry(&self) -> Duration {
        Duration::from_millis(self.connect_retry_ms)
    }

    /// Number of samples the display window holds
    ///
    /// `floor(window / sample_period)`: 30 seconds at 1 Hz gives 30.
    pub fn window_capacity(&self) -> usize {
        (self.window_seconds.saturating_mul(1000) / self.sample_period_ms.max(1)) as usize
    }

    /// Reject configurations the acquisition loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_period_ms == 0 {
            return Err(ScopeError::Config(
                "sample_period_ms must be non-zero".to_string(),
            ));
        }
        if self.connect_retry_ms == 0 {
            return Err(ScopeError::Config(
                "connect_retry_ms must be non-zero".to_string(),
            ));
        }
        if self.window_capacity() == 0 {
            return Err(ScopeError::Config(format!(
                "window of {} s holds no samples at a period of {} ms",
                self.window_seconds, self.sample_period_ms
            )));
        }
        Ok(())
    }
}

/// Window host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial window width in logical points
    pub window_width: f32,
    /// Initial window height in logical points
    pub window_height: f32,
    /// Number of grid divisions drawn behind the signal
    pub grid_divisions: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 500.0,
            window_height: 300.0,
            grid_divisions: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| ScopeError::Config(format!("failed to parse config: {}", e)))?;
        config.acquisition.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is absent
    ///
    /// A malformed file is a hard error; a missing one is not.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| ScopeError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}
