use bytes::{BufMut, Bytes, BytesMut};

/// JustFloat frame tail: `f32::INFINITY` in little-endian.
pub const FRAME_TAIL: [u8; 4] = [0x00, 0x00, 0x80, 0x7F];

/// Append each sample as a little-endian `f32`.
pub fn build_float_matrix(samples: &[f32], dst: &mut BytesMut) {
    dst.reserve(samples.len() * 4);
    for &sample in samples {
        dst.put_f32_le(sample);
    }
}

/// Build a complete JustFloat datagram: samples followed by the tail.
pub fn build_vofa_stream(samples: &[f32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(samples.len() * 4 + FRAME_TAIL.len());
    build_float_matrix(samples, &mut buf);
    buf.put_slice(&FRAME_TAIL);
    buf.freeze()
}
