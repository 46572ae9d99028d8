use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SourceError};
use crate::traits::SampleSource;

/// Shape of a synthetic channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Sin,
    Cos,
}

impl WaveKind {
    fn eval(self, x: f64) -> f64 {
        match self {
            WaveKind::Sin => x.sin(),
            WaveKind::Cos => x.cos(),
        }
    }
}

impl FromStr for WaveKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sin" => Ok(WaveKind::Sin),
            "cos" => Ok(WaveKind::Cos),
            other => Err(SourceError::InvalidWaveform(other.to_string())),
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WaveKind::Sin => "sin",
            WaveKind::Cos => "cos",
        })
    }
}

/// Synthetic multi-channel waveform.
///
/// Channel `i` (1-based) of a batch taken at phase `t` is `f(i * t)`. The
/// phase starts at zero and advances by `step` after every batch.
#[derive(Debug, Clone)]
pub struct Waveform {
    kind: WaveKind,
    channels: usize,
    step: f64,
    t: f64,
}

impl Waveform {
    pub fn new(kind: WaveKind, channels: usize, step: f64) -> Self {
        Self {
            kind,
            channels,
            step,
            t: 0.0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> f64 {
        self.t
    }

    /// Sample every channel at phase `t` without advancing.
    pub fn sample_at(&self, t: f64) -> Vec<f32> {
        (1..=self.channels)
            .map(|i| self.kind.eval(i as f64 * t) as f32)
            .collect()
    }
}

impl SampleSource for Waveform {
    fn next_batch(&mut self) -> Result<Vec<f32>> {
        let batch = self.sample_at(self.t);
        self.t += self.step;
        Ok(batch)
    }
}
