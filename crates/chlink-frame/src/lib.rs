//! Frame decoder for HiPNUC CH100 AHRS telemetry streams.
//!
//! This is the core of chlink. Every frame on the wire carries:
//! - A 2-byte sync marker (0x5A 0xA5) for stream synchronization
//! - A 2-byte little-endian payload length
//! - A 2-byte little-endian CRC-16 over everything except itself
//!
//! Feed arbitrary byte chunks to a [`FrameDecoder`] and get complete,
//! CRC-checked [`Record`]s back. Noise is skipped one byte at a time and
//! corrupt frames are dropped without stalling the stream.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod crc;
pub mod decoder;
pub mod error;
pub mod payload;
pub mod reader;
pub mod validate;

#[cfg(feature = "async")]
pub use async_codec::RecordCodec;
pub use codec::{decode_frame, encode_frame, Frame, FrameHeader, HEADER_SIZE, MAX_PAYLOAD, SYNC};
pub use self::crc::crc16;
pub use decoder::{DecoderStats, FrameDecoder, FrameOutcome};
pub use error::{FrameError, Result};
pub use payload::{decode_payload, FrameType, Hi91Record, Record, HI91_PAYLOAD_LEN, TAG_HI91};
pub use reader::{ReaderConfig, RecordReader, DEFAULT_CHUNK_SIZE};
pub use validate::validate_frame;
