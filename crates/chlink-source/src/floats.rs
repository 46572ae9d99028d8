use std::io::{ErrorKind, Read};

use crate::error::{Result, SourceError};
use crate::traits::SampleSource;

/// Reads `channels` raw little-endian `f32` values per batch from a byte stream.
///
/// A value whose four bytes do not arrive before the transport times out is
/// dropped, so batches can come back short on a quiet line.
#[derive(Debug)]
pub struct FloatStreamSource<R> {
    inner: R,
    channels: usize,
}

impl<R: Read> FloatStreamSource<R> {
    pub fn new(inner: R, channels: usize) -> Self {
        Self { inner, channels }
    }

    /// Consume the source and return the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> SampleSource for FloatStreamSource<R> {
    fn next_batch(&mut self) -> Result<Vec<f32>> {
        let mut batch = Vec::with_capacity(self.channels);
        for _ in 0..self.channels {
            let mut raw = [0u8; 4];
            match self.inner.read_exact(&mut raw) {
                Ok(()) => batch.push(f32::from_le_bytes(raw)),
                Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    tracing::debug!("float read timed out, dropping value");
                }
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                    if batch.is_empty() {
                        return Err(SourceError::Closed);
                    }
                    break;
                }
                Err(err) => return Err(SourceError::Io(err)),
            }
        }
        Ok(batch)
    }
}
