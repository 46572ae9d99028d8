use bytes::{Buf, BytesMut};

use crate::codec::{decode_frame, Frame};
use crate::error::FrameError;
use crate::payload::{decode_payload, FrameType, Record};
use crate::validate::validate_frame;

const INITIAL_BUFFER_CAPACITY: usize = 512;

/// What became of one assembled frame.
#[derive(Debug)]
pub enum FrameOutcome {
    /// The frame passed CRC and decoded into a record.
    Decoded(Record),
    /// The frame passed CRC but its type is not decoded. Informational.
    Skipped(FrameType),
    /// The frame was dropped: CRC mismatch, empty or short payload.
    Rejected(FrameError),
}

impl FrameOutcome {
    pub fn into_record(self) -> Option<Record> {
        match self {
            FrameOutcome::Decoded(record) => Some(record),
            FrameOutcome::Skipped(_) | FrameOutcome::Rejected(_) => None,
        }
    }
}

/// Running counters kept by a decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames split off the stream, valid or not.
    pub frames: u64,
    pub records: u64,
    pub crc_errors: u64,
    pub unknown_frames: u64,
    /// CRC-valid frames whose payload could not be decoded.
    pub rejected_payloads: u64,
    /// Bytes dropped while hunting for the sync pair.
    pub discarded_bytes: u64,
}

/// Push-style decoder: feed it arbitrary chunks, get records back.
///
/// The decoder owns its stream buffer and does no I/O. After every `feed`
/// call the buffer holds at most one partial frame plus garbage shorter than
/// a header.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: BytesMut,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            stats: DecoderStats::default(),
        }
    }

    /// Append a chunk and return the records completed by it, in arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Record> {
        self.feed_outcomes(chunk)
            .into_iter()
            .filter_map(FrameOutcome::into_record)
            .collect()
    }

    /// Append a chunk and return the outcome of every frame it completed.
    pub fn feed_outcomes(&mut self, chunk: &[u8]) -> Vec<FrameOutcome> {
        self.buf.extend_from_slice(chunk);

        let mut outcomes = Vec::new();
        while let Some(frame) = next_frame(&mut self.buf, &mut self.stats) {
            outcomes.push(process_frame(frame, &mut self.stats));
        }
        outcomes
    }

    /// Bytes currently buffered: a partial frame and/or unscanned garbage.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }
}

/// Assemble the next frame from `buf`, dropping one byte at a time until the
/// head is a sync pair. Returns `None` when more input is needed.
pub(crate) fn next_frame(buf: &mut BytesMut, stats: &mut DecoderStats) -> Option<Frame> {
    loop {
        match decode_frame(buf) {
            Ok(Some(frame)) => {
                stats.frames += 1;
                return Some(frame);
            }
            Ok(None) => return None,
            Err(_) => {
                tracing::trace!(byte = buf[0], "dropping byte while resyncing");
                buf.advance(1);
                stats.discarded_bytes += 1;
            }
        }
    }
}

/// Validate and decode one assembled frame.
///
/// The frame's bytes are already gone from the stream buffer, so a rejected
/// frame is simply dropped. A corrupted length field is trusted as-is.
pub(crate) fn process_frame(frame: Frame, stats: &mut DecoderStats) -> FrameOutcome {
    if let Err(err) = validate_frame(&frame) {
        tracing::warn!(error = %err, length = frame.header.length, "dropping frame");
        stats.crc_errors += 1;
        return FrameOutcome::Rejected(err);
    }

    match decode_payload(&frame.payload) {
        Ok(Some(record)) => {
            stats.records += 1;
            FrameOutcome::Decoded(record)
        }
        Ok(None) => {
            let frame_type = frame.frame_type().unwrap_or(FrameType::Unknown(0));
            tracing::info!(frame_type = %frame_type, "skipping frame type");
            stats.unknown_frames += 1;
            FrameOutcome::Skipped(frame_type)
        }
        Err(err) => {
            tracing::warn!(error = %err, "dropping undecodable frame");
            stats.rejected_payloads += 1;
            FrameOutcome::Rejected(err)
        }
    }
}
