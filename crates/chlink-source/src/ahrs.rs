use std::io::{ErrorKind, Read};

use chlink_frame::{DecoderStats, FrameError, Record, RecordReader};

use crate::error::{Result, SourceError};
use crate::traits::SampleSource;

/// Decodes CH100 frames from a byte stream and yields `[roll, pitch, yaw]`
/// of each record, in degrees.
///
/// A transport read timeout yields an empty batch.
pub struct AhrsSource<R> {
    reader: RecordReader<R>,
}

impl<R: Read> AhrsSource<R> {
    pub fn new(inner: R) -> Self {
        Self::from_reader(RecordReader::new(inner))
    }

    pub fn from_reader(reader: RecordReader<R>) -> Self {
        Self { reader }
    }

    pub fn stats(&self) -> DecoderStats {
        self.reader.stats()
    }
}

impl<R: Read> SampleSource for AhrsSource<R> {
    fn next_batch(&mut self) -> Result<Vec<f32>> {
        match self.reader.read_record() {
            Ok(Record::Hi91(record)) => Ok(record.euler().to_vec()),
            Err(FrameError::ConnectionClosed) => Err(SourceError::Closed),
            Err(FrameError::Io(err))
                if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
            {
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }
}
