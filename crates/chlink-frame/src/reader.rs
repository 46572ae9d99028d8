use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::decoder::{DecoderStats, FrameDecoder};
use crate::error::{FrameError, Result};
use crate::payload::Record;

/// One HI91 frame on the wire: 6-byte header + 76-byte payload.
pub const DEFAULT_CHUNK_SIZE: usize = 82;

/// Configuration for [`RecordReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum bytes requested from the transport per read.
    pub chunk_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Reads decoded records from any `Read` stream.
///
/// Handles partial reads, noise and corrupt frames internally; callers only
/// ever see complete records.
pub struct RecordReader<T> {
    inner: T,
    decoder: FrameDecoder,
    pending: VecDeque<Record>,
    chunk: Vec<u8>,
}

impl<T: Read> RecordReader<T> {
    /// Create a new record reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    /// Create a new record reader with explicit configuration.
    pub fn with_config(inner: T, config: ReaderConfig) -> Self {
        Self {
            inner,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            chunk: vec![0u8; config.chunk_size.max(1)],
        }
    }

    /// Read the next record (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_record(&mut self) -> Result<Record> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Ok(record);
            }

            let read = match self.inner.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            let records = self.decoder.feed(&self.chunk[..read]);
            self.pending.extend(records);
        }
    }

    /// Perform exactly one read and return whatever it completed.
    ///
    /// Read timeouts yield an empty batch, so this suits transports
    /// configured with a short timeout such as serial ports.
    pub fn poll(&mut self) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self.pending.drain(..).collect();

        let read = match self.inner.read(&mut self.chunk) {
            Ok(0) if records.is_empty() => return Err(FrameError::ConnectionClosed),
            Ok(n) => n,
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock
                ) =>
            {
                0
            }
            Err(err) => return Err(FrameError::Io(err)),
        };

        records.extend(self.decoder.feed(&self.chunk[..read]));
        Ok(records)
    }

    /// Decoder counters accumulated so far.
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    ///
    /// Buffered partial frames and undelivered records are dropped.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::codec::encode_frame;
    use crate::payload::Hi91Record;

    fn wire_for(rolls: &[f32]) -> Vec<u8> {
        let mut wire = BytesMut::new();
        for &roll in rolls {
            let mut payload = BytesMut::new();
            Hi91Record {
                roll,
                ..Hi91Record::default()
            }
            .encode(&mut payload);
            encode_frame(&payload, &mut wire).unwrap();
        }
        wire.to_vec()
    }

    fn roll_of(record: Record) -> f32 {
        match record {
            Record::Hi91(r) => r.roll,
        }
    }

    #[test]
    fn read_single_record() {
        let mut reader = RecordReader::new(Cursor::new(wire_for(&[12.5])));
        assert_eq!(roll_of(reader.read_record().unwrap()), 12.5);
    }

    #[test]
    fn read_multiple_records_with_large_chunks() {
        let cfg = ReaderConfig { chunk_size: 4096 };
        let mut reader = RecordReader::with_config(Cursor::new(wire_for(&[1.0, 2.0, 3.0])), cfg);

        assert_eq!(roll_of(reader.read_record().unwrap()), 1.0);
        assert_eq!(roll_of(reader.read_record().unwrap()), 2.0);
        assert_eq!(roll_of(reader.read_record().unwrap()), 3.0);
        assert!(matches!(
            reader.read_record(),
            Err(FrameError::ConnectionClosed)
        ));
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire_for(&[9.0]),
            pos: 0,
        };
        let mut reader = RecordReader::new(byte_reader);
        assert_eq!(roll_of(reader.read_record().unwrap()), 9.0);
    }

    #[test]
    fn noise_between_frames_is_skipped() {
        let mut bytes = vec![0x00, 0xFF, 0x13];
        bytes.extend(wire_for(&[1.0]));
        bytes.extend([0xA5, 0x5A, 0x00, 0x01]);
        bytes.extend(wire_for(&[2.0]));

        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert_eq!(roll_of(reader.read_record().unwrap()), 1.0);
        assert_eq!(roll_of(reader.read_record().unwrap()), 2.0);
        assert_eq!(reader.stats().discarded_bytes, 7);
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = RecordReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut partial = wire_for(&[1.0]);
        partial.truncate(40);

        let mut reader = RecordReader::new(Cursor::new(partial));
        let err = reader.read_record().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = FailOnceThenData {
            kind: ErrorKind::Interrupted,
            failed: false,
            inner: Cursor::new(wire_for(&[8.0])),
        };
        let mut framed = RecordReader::new(reader);
        assert_eq!(roll_of(framed.read_record().unwrap()), 8.0);
    }

    #[test]
    fn read_would_block_propagates_io_error() {
        let reader = FailOnceThenData {
            kind: ErrorKind::WouldBlock,
            failed: false,
            inner: Cursor::new(wire_for(&[8.0])),
        };
        let mut framed = RecordReader::new(reader);
        let err = framed.read_record().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WouldBlock));
    }

    #[test]
    fn poll_treats_timeout_as_empty_batch() {
        let reader = FailOnceThenData {
            kind: ErrorKind::TimedOut,
            failed: false,
            inner: Cursor::new(wire_for(&[5.0, 6.0])),
        };
        let mut framed = RecordReader::with_config(reader, ReaderConfig { chunk_size: 164 });

        assert!(framed.poll().unwrap().is_empty());
        let batch = framed.poll().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(roll_of(batch[1]), 6.0);
        assert!(matches!(framed.poll(), Err(FrameError::ConnectionClosed)));
    }

    #[test]
    fn poll_returns_records_left_by_read_record() {
        let cfg = ReaderConfig { chunk_size: 1024 };
        let mut reader = RecordReader::with_config(Cursor::new(wire_for(&[1.0, 2.0])), cfg);

        assert_eq!(roll_of(reader.read_record().unwrap()), 1.0);
        let rest = reader.poll().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(roll_of(rest[0]), 2.0);
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut reader = RecordReader::new(cursor);

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    #[derive(Debug)]
    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }

            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct FailOnceThenData {
        kind: ErrorKind,
        failed: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for FailOnceThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::from(self.kind));
            }
            self.inner.read(buf)
        }
    }
}
