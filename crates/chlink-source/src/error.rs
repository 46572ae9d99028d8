use std::net::SocketAddr;

use chlink_frame::FrameError;

/// Errors that can occur while producing samples.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The serial port could not be opened.
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// The UDP socket could not be bound.
    #[error("failed to bind UDP socket to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// A host/port pair did not resolve to a socket address.
    #[error("could not resolve {0}")]
    Resolve(String),

    /// The waveform name is neither `sin` nor `cos`.
    #[error("invalid waveform {0:?} (expected \"sin\" or \"cos\")")]
    InvalidWaveform(String),

    /// The underlying stream reached EOF.
    #[error("source closed")]
    Closed,

    /// Frame decoding failed on the underlying transport.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// An I/O error occurred on the underlying transport.
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub(crate) fn bind(addr: SocketAddr, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
