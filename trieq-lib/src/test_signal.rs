//! Signal helpers shared by the unit tests.

use std::f32::consts::PI;

use crate::dsp::level::linear_to_db;

/// `len` samples of a unit-amplitude sine.
pub fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| (2.0 * PI * freq * n as f32 / sample_rate).sin())
        .collect()
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let energy: f64 = samples.iter().map(|s| f64::from(*s).powi(2)).sum();
    (energy / samples.len() as f64).sqrt() as f32
}

/// Output level relative to input level, in dB.
pub fn gain_db(input: &[f32], output: &[f32]) -> f32 {
    linear_to_db(rms(output) / rms(input))
}
