//! Coefficient design for the peak band and the Butterworth cut cascades.
//!
//! Every function here is pure: it takes semantic parameters and returns new
//! taps. Nothing is clamped; out-of-range input is reported as a
//! [`DesignError`] and resolving it is the caller's job.

use std::f64::consts::PI;

use thiserror::Error;

use super::biquad::Coefficients;

/// Maximum number of biquad sections in one cut cascade.
pub const MAX_STAGES: usize = 4;
/// Highest supported Butterworth order (48 dB/oct).
pub const MAX_ORDER: usize = MAX_STAGES * 2;

/// Contract violations reported by coefficient design.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DesignError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    #[error("frequency {freq} Hz is outside (0, {nyquist}) Hz")]
    InvalidFrequency { freq: f64, nyquist: f64 },

    #[error("invalid filter order {0}: expected 2, 4, 6 or 8")]
    InvalidOrder(usize),

    #[error("invalid Q: {0}")]
    InvalidQ(f64),

    #[error("invalid linear gain: {0}")]
    InvalidGain(f64),

    #[error("invalid stage count {0}: expected 1 to 4")]
    InvalidStageCount(usize),

    #[error("{provided} section(s) provided for {expected} stage(s)")]
    MissingSections { expected: usize, provided: usize },
}

/// Taps for up to [`MAX_STAGES`] cascaded sections, stored inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeCoefficients {
    sections: [Coefficients; MAX_STAGES],
    len: usize,
}

impl CascadeCoefficients {
    fn empty() -> Self {
        Self {
            sections: [Coefficients::PASSTHROUGH; MAX_STAGES],
            len: 0,
        }
    }

    /// A cascade of `stages` identity sections (at least one, at most four).
    pub fn passthrough(stages: usize) -> Self {
        Self {
            sections: [Coefficients::PASSTHROUGH; MAX_STAGES],
            len: stages.clamp(1, MAX_STAGES),
        }
    }

    fn push(&mut self, coeffs: Coefficients) {
        self.sections[self.len] = coeffs;
        self.len += 1;
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Filter order realized by the cascade (two poles per section).
    pub fn order(&self) -> usize {
        self.len * 2
    }

    pub fn as_slice(&self) -> &[Coefficients] {
        &self.sections[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coefficients> {
        self.as_slice().iter()
    }

    /// True when every tap of every section is finite.
    pub fn is_finite(&self) -> bool {
        self.iter().all(Coefficients::is_finite)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CutKind {
    HighPass,
    LowPass,
}

/// Peaking (bell) EQ section.
///
/// # Arguments
/// - `sample_rate`: Sampling rate in Hz.
/// - `center_freq`: Center of the bell in Hz, strictly below Nyquist.
/// - `q`: Bandwidth control; higher values narrow the bell.
/// - `linear_gain`: Gain at the center frequency as a linear factor
///   (`10^(dB/20)`). A gain of `1.0` yields an identity section.
///
/// # Errors
/// Returns a [`DesignError`] for a non-positive sample rate, Q or gain, or a
/// center frequency outside `(0, sample_rate / 2)`.
pub fn peak_filter(
    sample_rate: f64,
    center_freq: f64,
    q: f64,
    linear_gain: f64,
) -> Result<Coefficients, DesignError> {
    check_sample_rate(sample_rate)?;
    check_frequency(center_freq, sample_rate)?;
    check_q(q)?;
    if !(linear_gain.is_finite() && linear_gain > 0.0) {
        return Err(DesignError::InvalidGain(linear_gain));
    }

    let amplitude = linear_gain.sqrt();
    let w0 = 2.0 * PI * center_freq / sample_rate;
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q);

    let b0 = 1.0 + alpha * amplitude;
    let b1 = -2.0 * cos_w0;
    let b2 = 1.0 - alpha * amplitude;
    let a0 = 1.0 + alpha / amplitude;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha / amplitude;

    Ok(Coefficients::normalized(b0, b1, b2, a0, a1, a2))
}

/// High-pass Butterworth response of `order` built from `order / 2` sections.
///
/// # Errors
/// `order` must be one of 2, 4, 6 or 8 and `cutoff_freq` must lie in
/// `(0, sample_rate / 2)`.
pub fn butterworth_highpass_cascade(
    cutoff_freq: f64,
    sample_rate: f64,
    order: usize,
) -> Result<CascadeCoefficients, DesignError> {
    butterworth_cascade(CutKind::HighPass, cutoff_freq, sample_rate, order)
}

/// Low-pass Butterworth response of `order` built from `order / 2` sections.
///
/// # Errors
/// Same contract as [`butterworth_highpass_cascade`].
pub fn butterworth_lowpass_cascade(
    cutoff_freq: f64,
    sample_rate: f64,
    order: usize,
) -> Result<CascadeCoefficients, DesignError> {
    butterworth_cascade(CutKind::LowPass, cutoff_freq, sample_rate, order)
}

/// Q of section `index` in an even-order Butterworth cascade.
///
/// Poles sit at angles `(2i + 1) * pi / (2 * order)` from the negative real
/// axis; each conjugate pair becomes one section with `Q = 1 / (2 cos θ)`.
pub fn butterworth_section_q(index: usize, order: usize) -> f64 {
    let theta = (2 * index + 1) as f64 * PI / (2 * order) as f64;
    1.0 / (2.0 * theta.cos())
}

fn butterworth_cascade(
    kind: CutKind,
    cutoff_freq: f64,
    sample_rate: f64,
    order: usize,
) -> Result<CascadeCoefficients, DesignError> {
    check_order(order)?;
    check_sample_rate(sample_rate)?;
    check_frequency(cutoff_freq, sample_rate)?;

    let mut cascade = CascadeCoefficients::empty();
    for index in 0..order / 2 {
        let q = butterworth_section_q(index, order);
        let section = match kind {
            CutKind::HighPass => high_pass_section(sample_rate, cutoff_freq, q),
            CutKind::LowPass => low_pass_section(sample_rate, cutoff_freq, q),
        };
        cascade.push(section);
    }
    Ok(cascade)
}

fn low_pass_section(sample_rate: f64, freq: f64, q: f64) -> Coefficients {
    let w0 = 2.0 * PI * freq / sample_rate;
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q);

    let b1 = 1.0 - cos_w0;
    let b0 = b1 / 2.0;
    let b2 = b0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha;

    Coefficients::normalized(b0, b1, b2, a0, a1, a2)
}

fn high_pass_section(sample_rate: f64, freq: f64, q: f64) -> Coefficients {
    let w0 = 2.0 * PI * freq / sample_rate;
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q);

    let b0 = (1.0 + cos_w0) / 2.0;
    let b1 = -1.0 - cos_w0;
    let b2 = b0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha;

    Coefficients::normalized(b0, b1, b2, a0, a1, a2)
}

fn check_sample_rate(sample_rate: f64) -> Result<(), DesignError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidSampleRate(sample_rate))
    }
}

fn check_frequency(freq: f64, sample_rate: f64) -> Result<(), DesignError> {
    let nyquist = sample_rate / 2.0;
    if freq.is_finite() && freq > 0.0 && freq < nyquist {
        Ok(())
    } else {
        Err(DesignError::InvalidFrequency { freq, nyquist })
    }
}

fn check_q(q: f64) -> Result<(), DesignError> {
    if q.is_finite() && q > 0.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidQ(q))
    }
}

fn check_order(order: usize) -> Result<(), DesignError> {
    if (2..=MAX_ORDER).contains(&order) && order % 2 == 0 {
        Ok(())
    } else {
        Err(DesignError::InvalidOrder(order))
    }
}
