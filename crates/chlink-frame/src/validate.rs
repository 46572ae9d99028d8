use crate::codec::Frame;
use crate::error::{FrameError, Result};

/// Check a frame's transmitted CRC against the one computed over its
/// sync pair, length field and payload.
pub fn validate_frame(frame: &Frame) -> Result<()> {
    let computed = frame.computed_crc();
    if computed != frame.header.crc {
        return Err(FrameError::CrcMismatch {
            expected: frame.header.crc,
            computed,
        });
    }
    Ok(())
}
