use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::decoder::{next_frame, process_frame, DecoderStats, FrameOutcome};
use crate::error::FrameError;
use crate::payload::Record;

/// `tokio_util` codec yielding decoded records from an async byte stream.
///
/// Shares assembly, validation and payload decoding with [`crate::FrameDecoder`];
/// rejected and skipped frames never surface as stream errors.
#[derive(Debug, Default)]
pub struct RecordCodec {
    stats: DecoderStats,
}

impl RecordCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }
}

impl Decoder for RecordCodec {
    type Item = Record;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Record>, FrameError> {
        while let Some(frame) = next_frame(src, &mut self.stats) {
            if let FrameOutcome::Decoded(record) = process_frame(frame, &mut self.stats) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Record>, FrameError> {
        if let Some(record) = self.decode(src)? {
            return Ok(Some(record));
        }
        if !src.is_empty() {
            tracing::debug!(remaining = src.len(), "discarding partial frame at end of stream");
            src.clear();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;
    use tokio_util::codec::FramedRead;

    use super::*;
    use crate::codec::encode_frame;
    use crate::payload::Hi91Record;

    fn frame_bytes(yaw: f32, dst: &mut BytesMut) {
        let mut payload = BytesMut::new();
        Hi91Record {
            yaw,
            ..Hi91Record::default()
        }
        .encode(&mut payload);
        encode_frame(&payload, dst).unwrap();
    }

    #[tokio::test]
    async fn framed_read_yields_records() {
        let mut wire = BytesMut::new();
        wire.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x00, 0x00]);
        frame_bytes(10.0, &mut wire);
        encode_frame(&[0x40, 0x01], &mut wire).unwrap();
        frame_bytes(20.0, &mut wire);
        wire.extend_from_slice(&[0x5A, 0xA5, 0x4C]);

        let bytes = wire.to_vec();
        let mut stream = FramedRead::new(bytes.as_slice(), RecordCodec::new());

        let mut yaws = Vec::new();
        while let Some(item) = stream.next().await {
            match item.unwrap() {
                Record::Hi91(r) => yaws.push(r.yaw),
            }
        }

        assert_eq!(yaws, vec![10.0, 20.0]);
        let stats = stream.decoder().stats();
        assert_eq!(stats.unknown_frames, 1);
        assert_eq!(stats.discarded_bytes, 7);
    }
}
