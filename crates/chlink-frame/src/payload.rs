//! Payload type dispatch and the HI91 telemetry record.
//!
//! Byte 0 of every payload is a type tag. Only HI91 (0x91) is decoded;
//! other tags are reported as [`FrameType::Unknown`] and produce no record.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Type tag of the HI91 full-AHRS telemetry payload.
pub const TAG_HI91: u8 = 0x91;

/// Minimum HI91 payload size, tag included.
pub const HI91_PAYLOAD_LEN: usize = 76;

/// Raw `sync_time` units per second.
const SYNC_TIME_SCALE: f64 = 1e-3;

/// Payload type, taken from the first payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    Hi91,
    Unknown(u8),
}

impl FrameType {
    /// The wire tag for this type.
    pub fn tag(self) -> u8 {
        match self {
            FrameType::Hi91 => TAG_HI91,
            FrameType::Unknown(tag) => tag,
        }
    }
}

impl From<u8> for FrameType {
    fn from(tag: u8) -> Self {
        match tag {
            TAG_HI91 => FrameType::Hi91,
            other => FrameType::Unknown(other),
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameType::Hi91 => f.write_str("HI91"),
            FrameType::Unknown(tag) => write!(f, "unknown ({tag:#04x})"),
        }
    }
}

/// A decoded telemetry record, one variant per supported frame type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record {
    Hi91(Hi91Record),
}

impl Record {
    pub fn frame_type(&self) -> FrameType {
        match self {
            Record::Hi91(_) => FrameType::Hi91,
        }
    }
}

/// Full AHRS telemetry carried by an HI91 payload.
///
/// Payload layout (little-endian, offsets relative to the tag byte):
///
/// | Offset | Field | Type |
/// |---|---|---|
/// | 1 | sync_time | u16, milliseconds |
/// | 3 | temperature | i8, °C |
/// | 4 | pressure | f32 |
/// | 8 | system_time_ms | u32 |
/// | 12 | acc | 3 × f32 |
/// | 24 | gyr | 3 × f32 |
/// | 36 | mag | 3 × f32 |
/// | 48 | roll, pitch, yaw | 3 × f32, degrees |
/// | 60 | quat | 4 × f32 |
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hi91Record {
    /// Sync timestamp in seconds.
    pub sync_time: f64,
    pub temperature: i8,
    pub pressure: f32,
    pub system_time_ms: u32,
    pub acc: [f32; 3],
    pub gyr: [f32; 3],
    pub mag: [f32; 3],
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub quat: [f32; 4],
}

impl Hi91Record {
    /// Decode an HI91 payload. `payload[0]` must be the tag; bytes past
    /// [`HI91_PAYLOAD_LEN`] are ignored.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < HI91_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooShort {
                frame_type: FrameType::Hi91,
                len: payload.len(),
                required: HI91_PAYLOAD_LEN,
            });
        }

        let mut buf = &payload[1..HI91_PAYLOAD_LEN];
        Ok(Self {
            sync_time: f64::from(buf.get_u16_le()) * SYNC_TIME_SCALE,
            temperature: buf.get_i8(),
            pressure: buf.get_f32_le(),
            system_time_ms: buf.get_u32_le(),
            acc: get_f32s(&mut buf),
            gyr: get_f32s(&mut buf),
            mag: get_f32s(&mut buf),
            roll: buf.get_f32_le(),
            pitch: buf.get_f32_le(),
            yaw: buf.get_f32_le(),
            quat: get_f32s(&mut buf),
        })
    }

    /// Write this record as a 76-byte HI91 payload, tag included.
    ///
    /// `sync_time` is rounded to the nearest raw millisecond unit and
    /// saturates at the u16 range.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HI91_PAYLOAD_LEN);
        dst.put_u8(TAG_HI91);
        dst.put_u16_le((self.sync_time / SYNC_TIME_SCALE).round() as u16);
        dst.put_i8(self.temperature);
        dst.put_f32_le(self.pressure);
        dst.put_u32_le(self.system_time_ms);
        for value in self
            .acc
            .iter()
            .chain(&self.gyr)
            .chain(&self.mag)
            .chain(&[self.roll, self.pitch, self.yaw])
            .chain(&self.quat)
        {
            dst.put_f32_le(*value);
        }
    }

    /// Write this record as a complete wire frame: header, CRC and payload.
    pub fn encode_frame(&self, dst: &mut BytesMut) -> Result<()> {
        let mut payload = BytesMut::with_capacity(HI91_PAYLOAD_LEN);
        self.encode(&mut payload);
        crate::codec::encode_frame(&payload, dst)
    }

    /// Euler angles as `[roll, pitch, yaw]` in degrees.
    pub fn euler(&self) -> [f32; 3] {
        [self.roll, self.pitch, self.yaw]
    }
}

fn get_f32s<const N: usize>(buf: &mut &[u8]) -> [f32; N] {
    let mut out = [0.0; N];
    for value in &mut out {
        *value = buf.get_f32_le();
    }
    out
}

/// Decode a CRC-validated payload.
///
/// Returns `Ok(None)` for frame types this crate does not decode.
pub fn decode_payload(payload: &[u8]) -> Result<Option<Record>> {
    let Some(&tag) = payload.first() else {
        return Err(FrameError::EmptyPayload);
    };

    match FrameType::from(tag) {
        FrameType::Hi91 => Hi91Record::decode(payload).map(|r| Some(Record::Hi91(r))),
        FrameType::Unknown(_) => Ok(None),
    }
}
