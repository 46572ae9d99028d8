use crate::payload::FrameType;

/// Errors that can occur while assembling, validating or decoding frames.
///
/// Every variant except `Io` and `ConnectionClosed` is recoverable: the
/// decoder drops the offending bytes and keeps scanning.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The buffer head is not the 0x5A 0xA5 sync pair.
    #[error("lost frame sync (expected 0x5A 0xA5)")]
    SyncLoss,

    /// The transmitted CRC does not match the one computed over the frame.
    #[error("frame CRC mismatch (transmitted {expected:#06x}, computed {computed:#06x})")]
    CrcMismatch { expected: u16, computed: u16 },

    /// The payload is shorter than its frame type requires.
    #[error("{frame_type} payload too short ({len} bytes, need {required})")]
    PayloadTooShort {
        frame_type: FrameType,
        len: usize,
        required: usize,
    },

    /// A CRC-valid frame carried no payload, so it has no type tag.
    #[error("frame has an empty payload")]
    EmptyPayload,

    /// The payload does not fit the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading from the transport.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport reached EOF.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
