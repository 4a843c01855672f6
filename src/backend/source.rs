//! SampleSource trait for the serial device boundary
//!
//! This trait is the seam between the acquisition loop and the transport:
//! the real serial port implementation and the mock used for hardware-free
//! runs and tests are interchangeable behind it.

use crate::error::Result;

/// Unified interface to a device that yields one sample token per read
///
/// Implementations must be `Send`: the acquisition loop owns its source for
/// the lifetime of a dedicated thread.
#[cfg_attr(test, mockall::automock)]
pub trait SampleSource: Send {
    /// Attempt to establish the connection
    ///
    /// Bounded in time and idempotent: calling it on an already-open source
    /// succeeds without side effects. The device may well be absent at
    /// process start; the caller retries.
    fn connect(&mut self) -> Result<()>;

    /// Release the connection, if held
    fn disconnect(&mut self);

    /// Check whether the connection is currently established
    fn is_connected(&self) -> bool;

    /// Block (up to the transport's timeout) for one textual sample token
    ///
    /// The token is expected to decode to a numeric sample; decoding is the
    /// caller's concern, so garbage on the wire surfaces as a parse error
    /// rather than a transport error.
    fn read_token(&mut self) -> Result<String>;

    /// Human-readable description of the source, for logs and the status UI
    fn describe(&self) -> String;
}
