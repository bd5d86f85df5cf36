//! Second-order IIR section, the building block of every band.

/// Normalized biquad taps (`a0` divided out).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Coefficients {
    /// Identity section: every input sample is returned unchanged.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build taps from un-normalized values by dividing through by `a0`.
    pub(crate) fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        }
    }

    /// True when every tap is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
            .iter()
            .all(|tap| tap.is_finite())
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Once both delay-line values fall below this they are flushed to zero,
/// keeping a decaying tail out of the subnormal range.
pub const DENORMAL_THRESHOLD: f32 = 1e-15;

/// Both values are flushed together; flushing one alone feeds the other's
/// recursion and can sustain a limit cycle near the threshold.
#[inline]
fn flush_denormals(s1: f32, s2: f32) -> (f32, f32) {
    if s1.abs() < DENORMAL_THRESHOLD && s2.abs() < DENORMAL_THRESHOLD {
        (0.0, 0.0)
    } else {
        (s1, s2)
    }
}

/// A single biquad with its own two-sample delay line.
///
/// Uses the transposed direct form II, so the state is exactly two history
/// values. Coefficient changes take effect on the next sample with no
/// smoothing.
#[derive(Clone, Debug, Default)]
pub struct BiquadStage {
    coeffs: Coefficients,
    s1: f32,
    s2: f32,
}

impl BiquadStage {
    /// Create a stage with the given taps and a cleared delay line.
    pub fn new(coeffs: Coefficients) -> Self {
        Self {
            coeffs,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Currently active taps.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Replace the active taps. The delay line is kept.
    pub fn set_coefficients(&mut self, coeffs: Coefficients) {
        self.coeffs = coeffs;
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let c = &self.coeffs;
        let out = c.b0 * sample + self.s1;
        let s1 = c.b1 * sample - c.a1 * out + self.s2;
        let s2 = c.b2 * sample - c.a2 * out;
        (self.s1, self.s2) = flush_denormals(s1, s2);
        out
    }

    /// Filter a contiguous run of samples in place.
    pub fn process_buffer(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the delay line.
    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
