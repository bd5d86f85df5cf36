//! Turning a parameter snapshot into chain coefficients.
//!
//! Design functions reject out-of-range input; this is where the engine
//! resolves those rejections by clamping, since nothing may fail inside the
//! audio callback.

use crate::dsp::design::{self, CascadeCoefficients};
use crate::dsp::level::db_to_linear;
use crate::dsp::{ChainCoefficients, Coefficients};
use crate::params::{
    FilterParameters, NormalisableRange, ParameterId, DEFAULT_HIGH_CUT_FREQ_HZ,
    DEFAULT_LOW_CUT_FREQ_HZ, DEFAULT_PEAK_FREQ_HZ, DEFAULT_PEAK_GAIN_DB, DEFAULT_PEAK_Q,
};

/// Lowest frequency a clamped cutoff or center may take.
pub const MIN_FREQ_HZ: f64 = 1.0;
/// Highest frequency a clamped cutoff or center may take, relative to the
/// sample rate.
pub const MAX_FREQ_RATIO: f64 = 0.49;

/// Designed coefficients plus whether any parameter had to be clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainDesign {
    pub coefficients: ChainCoefficients,
    pub clamped: bool,
}

/// Design every band for `params` at `sample_rate`.
///
/// Parameters the designers reject are clamped (frequencies into
/// `[MIN_FREQ_HZ, MAX_FREQ_RATIO * sample_rate]`, Q and gain into their
/// ranges, non-finite values to defaults) and designed again.
pub fn design_chain(params: &FilterParameters, sample_rate: f64) -> ChainDesign {
    let mut clamped = false;

    let low_cut_order = params.low_cut_slope.order();
    let low_cut = design::butterworth_highpass_cascade(
        f64::from(params.low_cut_freq),
        sample_rate,
        low_cut_order,
    )
    .or_else(|_| {
        clamped = true;
        let freq = clamp_frequency(params.low_cut_freq, DEFAULT_LOW_CUT_FREQ_HZ, sample_rate);
        design::butterworth_highpass_cascade(freq, sample_rate, low_cut_order)
    })
    .unwrap_or_else(|_| CascadeCoefficients::passthrough(params.low_cut_slope.stages()));

    let peak = design::peak_filter(
        sample_rate,
        f64::from(params.peak_freq),
        f64::from(params.peak_q),
        f64::from(db_to_linear(params.peak_gain_db)),
    )
    .or_else(|_| {
        clamped = true;
        let freq = clamp_frequency(params.peak_freq, DEFAULT_PEAK_FREQ_HZ, sample_rate);
        let q = clamp_to_range(params.peak_q, DEFAULT_PEAK_Q, ParameterId::PeakQ);
        let gain_db = clamp_to_range(params.peak_gain_db, DEFAULT_PEAK_GAIN_DB, ParameterId::PeakGain);
        design::peak_filter(
            sample_rate,
            freq,
            f64::from(q),
            f64::from(db_to_linear(gain_db)),
        )
    })
    .unwrap_or(Coefficients::PASSTHROUGH);

    let high_cut_order = params.high_cut_slope.order();
    let high_cut = design::butterworth_lowpass_cascade(
        f64::from(params.high_cut_freq),
        sample_rate,
        high_cut_order,
    )
    .or_else(|_| {
        clamped = true;
        let freq = clamp_frequency(params.high_cut_freq, DEFAULT_HIGH_CUT_FREQ_HZ, sample_rate);
        design::butterworth_lowpass_cascade(freq, sample_rate, high_cut_order)
    })
    .unwrap_or_else(|_| CascadeCoefficients::passthrough(params.high_cut_slope.stages()));

    ChainDesign {
        coefficients: ChainCoefficients {
            low_cut,
            peak,
            high_cut,
        },
        clamped,
    }
}

fn clamp_frequency(freq: f32, fallback: f32, sample_rate: f64) -> f64 {
    let freq = if freq.is_finite() { freq } else { fallback };
    let upper = MAX_FREQ_RATIO * sample_rate;
    let lower = MIN_FREQ_HZ.min(upper / 2.0);
    f64::from(freq).clamp(lower, upper)
}

fn clamp_to_range(value: f32, fallback: f32, id: ParameterId) -> f32 {
    let NormalisableRange { start, end, .. } = id.spec().range;
    if value.is_finite() {
        value.clamp(start, end)
    } else {
        fallback
    }
}
