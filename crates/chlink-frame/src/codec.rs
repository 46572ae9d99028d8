use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::crc::crc16;
use crate::error::{FrameError, Result};
use crate::payload::FrameType;

/// Frame header: sync (2) + length (2) + crc (2) = 6 bytes.
pub const HEADER_SIZE: usize = 6;

/// Sync bytes that open every frame.
pub const SYNC: [u8; 2] = [0x5A, 0xA5];

/// Largest payload the 16-bit length field can describe.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// The fixed 6-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Payload byte count following the header.
    pub length: u16,
    /// CRC as transmitted.
    pub crc: u16,
}

impl FrameHeader {
    /// Total wire size of the frame this header announces.
    pub fn frame_size(&self) -> usize {
        HEADER_SIZE + usize::from(self.length)
    }

    /// The header bytes covered by the CRC: sync pair and length field.
    pub fn crc_prefix(&self) -> [u8; 4] {
        let [lo, hi] = self.length.to_le_bytes();
        [SYNC[0], SYNC[1], lo, hi]
    }
}

/// A length-delimited frame lifted off the wire. Not yet CRC-checked.
#[derive(Debug, Clone)]
pub struct Frame {
    pub header: FrameHeader,
    pub payload: Bytes,
}

impl Frame {
    /// The payload type tag, if the payload is non-empty.
    pub fn frame_type(&self) -> Option<FrameType> {
        self.payload.first().map(|&tag| FrameType::from(tag))
    }

    /// CRC computed over the sync pair, length field and payload.
    pub fn computed_crc(&self) -> u16 {
        crc16(crc16(0, &self.header.crc_prefix()), &self.payload)
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a payload into the wire format, computing its CRC.
///
/// Wire format:
/// ```text
/// ┌───────────┬───────────┬──────────┬──────────────────┐
/// │ Sync (2B) │ Length    │ CRC16    │ Payload          │
/// │ 0x5A 0xA5 │ (2B LE)   │ (2B LE)  │ (Length bytes)   │
/// └───────────┴───────────┴──────────┴──────────────────┘
/// ```
///
/// The CRC covers bytes 0..4 and the payload, skipping the CRC field.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let length = u16::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: MAX_PAYLOAD,
    })?;
    let header = FrameHeader { length, crc: 0 };
    let crc = crc16(crc16(0, &header.crc_prefix()), payload);

    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&SYNC);
    dst.put_u16_le(length);
    dst.put_u16_le(crc);
    dst.put_slice(payload);
    Ok(())
}

/// Split the next frame off the head of a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet; the
/// partial frame stays buffered. Returns `Err(FrameError::SyncLoss)` without
/// consuming anything when the head is not the sync pair; the caller decides
/// how many bytes to drop. On success, consumes exactly the frame bytes.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    if src[0..2] != SYNC {
        return Err(FrameError::SyncLoss);
    }

    let header = FrameHeader {
        length: u16::from_le_bytes([src[2], src[3]]),
        crc: u16::from_le_bytes([src[4], src[5]]),
    };

    if src.len() < header.frame_size() {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(usize::from(header.length)).freeze();

    Ok(Some(Frame { header, payload }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut buf = BytesMut::new();
        let payload = b"\x91hello, ch100";

        encode_frame(payload, &mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE + payload.len());
        assert_eq!(&buf[0..2], &SYNC);
        assert_eq!(u16::from_le_bytes([buf[2], buf[3]]) as usize, payload.len());

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(frame.payload.as_ref(), payload);
        assert_eq!(frame.header.crc, frame.computed_crc());
        assert_eq!(frame.frame_type(), Some(FrameType::Hi91));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_crc_skips_crc_field() {
        let mut buf = BytesMut::new();
        encode_frame(&[0x01, 0x02, 0x03], &mut buf).unwrap();

        let mut covered = buf[0..4].to_vec();
        covered.extend_from_slice(&buf[6..]);
        assert_eq!(u16::from_le_bytes([buf[4], buf[5]]), crc16(0, &covered));
    }

    #[test]
    fn test_decode_incomplete_header() {
        let mut buf = BytesMut::from(&[0x5A, 0xA5, 0x00][..]);
        assert!(decode_frame(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_decode_incomplete_payload() {
        let mut buf = BytesMut::new();
        encode_frame(b"\x91payload", &mut buf).unwrap();
        buf.truncate(HEADER_SIZE + 2);

        assert!(decode_frame(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), HEADER_SIZE + 2);
    }

    #[test]
    fn test_decode_sync_loss_consumes_nothing() {
        let mut buf = BytesMut::from(&[0xFF, 0x5A, 0xA5, 0x00, 0x00, 0x00, 0x00][..]);
        let result = decode_frame(&mut buf);
        assert!(matches!(result, Err(FrameError::SyncLoss)));
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_multiple_frames() {
        let mut buf = BytesMut::new();
        encode_frame(b"\x10first", &mut buf).unwrap();
        encode_frame(b"\x20second", &mut buf).unwrap();

        let f1 = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(f1.payload.as_ref(), b"\x10first");

        let f2 = decode_frame(&mut buf).unwrap().unwrap();
        assert_eq!(f2.payload.as_ref(), b"\x20second");

        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_payload() {
        let mut buf = BytesMut::new();
        encode_frame(b"", &mut buf).unwrap();

        let frame = decode_frame(&mut buf).unwrap().unwrap();
        assert!(frame.payload.is_empty());
        assert_eq!(frame.frame_type(), None);
        assert_eq!(frame.wire_size(), HEADER_SIZE);
    }

    #[test]
    fn test_payload_too_large() {
        let mut buf = BytesMut::new();
        let payload = vec![0u8; MAX_PAYLOAD + 1];
        let result = encode_frame(&payload, &mut buf);
        assert!(matches!(result, Err(FrameError::PayloadTooLarge { .. })));
        assert!(buf.is_empty());
    }
}
