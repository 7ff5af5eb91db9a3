//! Bass emphasis
//!
//! A one-tap blend of each sample with half of its predecessor, scaled by the
//! boost gain and a fixed 0.7 trim, then hard-clamped to [-1.0, 1.0]. It is a
//! heuristic rather than a shelf filter; the coefficients are the contract.

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;
use crate::audio::SampleBuffer;

const PREVIOUS_SAMPLE_WEIGHT: f64 = 0.5;
const OUTPUT_TRIM: f64 = 0.7;

/// Linear gain for a boost in decibels.
pub fn db_to_gain(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

pub struct BassEnhancer;

impl BassEnhancer {
    /// Apply a `boost_db` bass boost. A zero boost returns the input untouched.
    pub fn boost_bass(input: SampleBuffer, boost_db: f64) -> SampleBuffer {
        if boost_db == 0.0 {
            return input;
        }

        let gain = db_to_gain(boost_db);
        let mut output = Array2::<f32>::zeros(input.samples().raw_dim());
        output.axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(input.samples().axis_iter(Axis(0)))
            .for_each(|(out, src)| Self::boost_channel(src, out, gain));

        log::debug!(
            "Bass +{} dB (gain {:.3}) over {} frames x {} channels",
            boost_db, gain, input.frame_count(), input.channel_count()
        );
        input.with_samples(output)
    }

    fn boost_channel(src: ArrayView1<f32>, mut out: ArrayViewMut1<f32>, gain: f64) {
        let mut previous: Option<f64> = None;
        for (sample, &x) in out.iter_mut().zip(src.iter()) {
            let x = x as f64;
            let raw = match previous {
                None => x,
                Some(prev) => (x + prev * PREVIOUS_SAMPLE_WEIGHT) * gain * OUTPUT_TRIM,
            };
            *sample = raw.clamp(-1.0, 1.0) as f32;
            previous = Some(x);
        }
    }
}
