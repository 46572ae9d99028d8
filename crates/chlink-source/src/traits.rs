use crate::error::Result;

/// Something that produces batches of samples on demand.
///
/// Blocking behavior and cadence belong to the implementation: a waveform
/// returns immediately, a serial or UDP source waits on its transport.
pub trait SampleSource {
    /// Produce the next batch. An empty batch is valid.
    fn next_batch(&mut self) -> Result<Vec<f32>>;
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn next_batch(&mut self) -> Result<Vec<f32>> {
        (**self).next_batch()
    }
}
