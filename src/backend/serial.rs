//! Serial port backed sample source
//!
//! Wraps the `serialport` crate behind [`SampleSource`]. The device emits one
//! numeric token per line; a read pulls bytes until a newline or the
//! configured timeout. Serial parameters are the common 8N1 with no flow
//! control, which is what these line-oriented sensor firmwares speak.

use crate::backend::source::SampleSource;
use crate::config::SerialConfig;
use crate::error::{Result, ScopeError};
use std::io::{BufRead, BufReader};

/// Sample source reading newline-terminated tokens from a serial port
pub struct SerialSource {
    config: SerialConfig,
    reader: Option<BufReader<Box<dyn serialport::SerialPort>>>,
    line: String,
}

impl SerialSource {
    /// Create a source for the given port settings without opening the port
    pub fn new(config: SerialConfig) -> Self {
        Self {
            config,
            reader: None,
            line: String::new(),
        }
    }
}

impl SampleSource for SerialSource {
    fn connect(&mut self) -> Result<()> {
        if self.reader.is_some() {
            return Ok(());
        }
        let port = serialport::new(&self.config.port, self.config.baud_rate)
            .timeout(self.config.read_timeout())
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()?;
        self.reader = Some(BufReader::new(port));
        Ok(())
    }

    fn disconnect(&mut self) {
        // Dropping the port closes it.
        self.reader = None;
    }

    fn is_connected(&self) -> bool {
        self.reader.is_some()
    }

    fn read_token(&mut self) -> Result<String> {
        let reader = self.reader.as_mut().ok_or(ScopeError::Disconnected)?;
        self.line.clear();
        let n = reader.read_line(&mut self.line)?;
        if n == 0 {
            return Err(ScopeError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "serial stream closed",
            )));
        }
        Ok(self.line.trim().to_string())
    }

    fn describe(&self) -> String {
        format!("{} @ {} baud", self.config.port, self.config.baud_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_without_connection_fails() {
        let mut source = SerialSource::new(SerialConfig::default());
        assert!(matches!(
            source.read_token(),
            Err(ScopeError::Disconnected)
        ));
    }

    #[test]
    fn test_disconnect_without_connection_is_harmless() {
        let mut source = SerialSource::new(SerialConfig::default());
        assert!(!source.is_connected());
        source.disconnect();
        assert!(!source.is_connected());
    }

    #[test]
    fn test_describe_names_the_port() {
        let config = SerialConfig {
            port: "COM5".to_string(),
            baud_rate: 9600,
            ..Default::default()
        };
        let source = SerialSource::new(config);
        assert_eq!(source.describe(), "COM5 @ 9600 baud");
    }
}
