//! Tempo change by nearest-neighbour index mapping
//!
//! Playing faster or slower without rate conversion: pitch and duration move
//! together, and the declared sample rate is left alone. No smoothing is done,
//! so decimation aliases and slow-down repeats samples.

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;
use crate::audio::{SampleBuffer, wav};
use crate::error::{TempoBassError, Result};

pub struct Resampler;

impl Resampler {
    /// Output length for a given input length: `floor(frames / tempo_factor)`.
    ///
    /// Lengths whose `channels`-channel PCM16 encoding would not fit a WAV data
    /// chunk are rejected before anything is allocated.
    pub fn output_frames(input_frames: usize, channels: usize, tempo_factor: f64) -> Result<usize> {
        let frames = (input_frames as f64 / tempo_factor).floor();
        let data_size = frames * channels as f64 * wav::BYTES_PER_SAMPLE as f64;
        if data_size > wav::MAX_DATA_SIZE as f64 {
            return Err(TempoBassError::processing(format!(
                "Tempo x{} stretches {} frames past the WAV size limit", tempo_factor, input_frames
            )));
        }
        Ok(frames as usize)
    }

    /// Resample `input` to play `tempo_factor` times as fast.
    pub fn resample(input: SampleBuffer, tempo_factor: f64) -> Result<SampleBuffer> {
        if !tempo_factor.is_finite() || tempo_factor <= 0.0 {
            return Err(TempoBassError::invalid_parameter(format!(
                "Tempo factor must be positive and finite, got {}", tempo_factor
            )));
        }

        let input_frames = input.frame_count();
        let output_frames = Self::output_frames(input_frames, input.channel_count(), tempo_factor)?;

        let mut output = Array2::<f32>::zeros((input.channel_count(), output_frames));
        output.axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(input.samples().axis_iter(Axis(0)))
            .for_each(|(out, src)| Self::resample_channel(src, out, tempo_factor));

        log::debug!(
            "Tempo x{}: {} -> {} frames ({} channels)",
            tempo_factor, input_frames, output_frames, input.channel_count()
        );
        Ok(input.with_samples(output))
    }

    fn resample_channel(src: ArrayView1<f32>, mut out: ArrayViewMut1<f32>, tempo_factor: f64) {
        let src_len = src.len();
        for (i, sample) in out.iter_mut().enumerate() {
            let source_index = (i as f64 * tempo_factor).floor() as usize;
            // Out-of-range positions keep the zero fill
            if source_index < src_len {
                *sample = src[source_index];
            }
        }
    }
}
