//! Magnitude response evaluation for sections and cascades.

use std::f64::consts::PI;

use super::biquad::Coefficients;
use super::design::CascadeCoefficients;

/// Linear magnitude of one section at `freq` Hz.
pub fn magnitude(coeffs: &Coefficients, freq: f64, sample_rate: f64) -> f64 {
    let w = 2.0 * PI * freq / sample_rate;
    let (sin_w, cos_w) = w.sin_cos();
    let (sin_2w, cos_2w) = (2.0 * w).sin_cos();

    let b0 = f64::from(coeffs.b0);
    let b1 = f64::from(coeffs.b1);
    let b2 = f64::from(coeffs.b2);
    let a1 = f64::from(coeffs.a1);
    let a2 = f64::from(coeffs.a2);

    let num_re = b0 + b1 * cos_w + b2 * cos_2w;
    let num_im = -(b1 * sin_w + b2 * sin_2w);
    let den_re = 1.0 + a1 * cos_w + a2 * cos_2w;
    let den_im = -(a1 * sin_w + a2 * sin_2w);

    (num_re.hypot(num_im)) / (den_re.hypot(den_im))
}

/// Magnitude of one section in dB.
pub fn magnitude_db(coeffs: &Coefficients, freq: f64, sample_rate: f64) -> f64 {
    to_db(magnitude(coeffs, freq, sample_rate))
}

/// Linear magnitude of every section of a cascade multiplied together.
pub fn cascade_magnitude(cascade: &CascadeCoefficients, freq: f64, sample_rate: f64) -> f64 {
    cascade
        .iter()
        .map(|coeffs| magnitude(coeffs, freq, sample_rate))
        .product()
}

pub fn cascade_magnitude_db(cascade: &CascadeCoefficients, freq: f64, sample_rate: f64) -> f64 {
    to_db(cascade_magnitude(cascade, freq, sample_rate))
}

pub(crate) fn to_db(value: f64) -> f64 {
    20.0 * value.max(f64::MIN_POSITIVE).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_is_flat() {
        for freq in [20.0, 1_000.0, 20_000.0] {
            assert!(magnitude_db(&Coefficients::PASSTHROUGH, freq, 48_000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn cascade_multiplies_sections() {
        let half = Coefficients {
            b0: 0.5,
            ..Coefficients::PASSTHROUGH
        };
        let single = magnitude(&half, 1_000.0, 48_000.0);
        assert!((single - 0.5).abs() < 1e-9);

        let cascade = CascadeCoefficients::passthrough(3);
        assert!((cascade_magnitude(&cascade, 1_000.0, 48_000.0) - 1.0).abs() < 1e-9);
    }
}
