//! Serial port transport.

use std::time::Duration;

use crate::error::{Result, SourceError};

/// An open serial port; implements `Read + Write`.
pub type SerialStream = Box<dyn serialport::SerialPort>;

/// Baud rate of the CH100 factory configuration.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Open `path` at `baud_rate`, 8N1, no flow control.
///
/// Reads block for at most `timeout` and then fail with `TimedOut`.
pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<SerialStream> {
    let port = serialport::new(path, baud_rate)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::None)
        .timeout(timeout)
        .open()
        .map_err(|source| SourceError::Open {
            path: path.to_string(),
            source,
        })?;
    tracing::info!(path, baud_rate, "serial port opened");
    Ok(port)
}
