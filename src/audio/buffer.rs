//! Decoded multi-channel sample buffer

use ndarray::{Array2, ArrayView1};
use crate::error::{TempoBassError, Result};

/// Decoded audio held as one row per channel.
///
/// The `(channels, frames)` layout keeps every channel the same length by
/// construction. Buffers are never mutated once built: processing stages take
/// a buffer by value and hand back a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    samples: Array2<f32>,
}

impl SampleBuffer {
    /// Wrap a `(channels, frames)` sample matrix.
    pub fn new(sample_rate: u32, samples: Array2<f32>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(TempoBassError::invalid_parameter("Sample rate must be greater than 0"));
        }
        if samples.nrows() == 0 {
            return Err(TempoBassError::invalid_parameter("Buffer needs at least one channel"));
        }
        Ok(Self { sample_rate, samples })
    }

    /// Build from separate per-channel sample vectors.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        let frames = channels.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != frames) {
            return Err(TempoBassError::invalid_parameter(format!(
                "Channel {} has {} frames, expected {}", idx, ch.len(), frames
            )));
        }

        let count = channels.len();
        let flat: Vec<f32> = channels.into_iter().flatten().collect();
        let samples = Array2::from_shape_vec((count, frames), flat)
            .map_err(|e| TempoBassError::invalid_parameter(format!("Bad channel layout: {}", e)))?;
        Self::new(sample_rate, samples)
    }

    pub fn mono(sample_rate: u32, data: Vec<f32>) -> Result<Self> {
        Self::from_channels(sample_rate, vec![data])
    }

    /// Build from frame-interleaved samples (`L R L R ...`).
    pub fn from_interleaved(sample_rate: u32, channels: usize, interleaved: &[f32]) -> Result<Self> {
        if channels == 0 {
            return Err(TempoBassError::invalid_parameter("Buffer needs at least one channel"));
        }
        if interleaved.len() % channels != 0 {
            return Err(TempoBassError::invalid_parameter(format!(
                "{} samples do not divide into {} channels", interleaved.len(), channels
            )));
        }

        let frames = interleaved.len() / channels;
        let samples = Array2::from_shape_fn((channels, frames), |(c, f)| interleaved[f * channels + c]);
        Self::new(sample_rate, samples)
    }

    /// A zero-filled buffer of the given shape.
    pub fn silent(sample_rate: u32, channels: usize, frames: usize) -> Result<Self> {
        Self::new(sample_rate, Array2::zeros((channels, frames)))
    }

    /// Same sample rate and channel count, new sample data.
    pub(crate) fn with_samples(&self, samples: Array2<f32>) -> Self {
        debug_assert_eq!(samples.nrows(), self.channel_count());
        Self { sample_rate: self.sample_rate, samples }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.samples.nrows()
    }

    pub fn frame_count(&self) -> usize {
        self.samples.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn channel(&self, index: usize) -> ArrayView1<'_, f32> {
        self.samples.row(index)
    }

    pub fn samples(&self) -> &Array2<f32> {
        &self.samples
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |p, &x| p.max(x.abs()))
    }

    /// Number of samples outside [-1.0, 1.0] (these get clamped on encode).
    pub fn count_out_of_range(&self) -> usize {
        self.samples.iter().filter(|x| x.abs() > 1.0).count()
    }
}
