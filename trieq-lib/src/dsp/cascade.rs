//! Runtime-configurable chain of up to four biquad sections.
//!
//! The enabled sections always form a contiguous prefix starting at stage 0:
//! there is no API to enable a later stage on its own, so a 36 dB/oct slope
//! can only ever mean stages 0, 1 and 2.

use super::biquad::{BiquadStage, Coefficients};
use super::design::{CascadeCoefficients, DesignError, MAX_STAGES};
use super::response;

#[derive(Clone, Debug)]
pub struct CascadeFilter {
    stages: [BiquadStage; MAX_STAGES],
    enabled: usize,
}

impl Default for CascadeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeFilter {
    /// A single enabled identity stage; the rest bypassed.
    pub fn new() -> Self {
        Self {
            stages: std::array::from_fn(|_| BiquadStage::default()),
            enabled: 1,
        }
    }

    /// Enable the first `order_stages` stages with the given taps and bypass
    /// the rest.
    ///
    /// Stages that were bypassed before this call start from a cleared delay
    /// line so no stale history leaks into the output.
    ///
    /// # Errors
    /// `order_stages` must be in `1..=4` and `coefficients` must hold at
    /// least that many sections. On error nothing is changed.
    pub fn configure(
        &mut self,
        order_stages: usize,
        coefficients: &[Coefficients],
    ) -> Result<(), DesignError> {
        if !(1..=MAX_STAGES).contains(&order_stages) {
            return Err(DesignError::InvalidStageCount(order_stages));
        }
        if coefficients.len() < order_stages {
            return Err(DesignError::MissingSections {
                expected: order_stages,
                provided: coefficients.len(),
            });
        }
        self.apply_sections(&coefficients[..order_stages]);
        Ok(())
    }

    /// Enable one stage per section of `cascade`.
    pub fn apply(&mut self, cascade: &CascadeCoefficients) {
        if cascade.is_empty() {
            self.apply_sections(&[Coefficients::PASSTHROUGH]);
        } else {
            self.apply_sections(cascade.as_slice());
        }
    }

    fn apply_sections(&mut self, sections: &[Coefficients]) {
        for (idx, (stage, coeffs)) in self.stages.iter_mut().zip(sections).enumerate() {
            if idx >= self.enabled {
                stage.reset();
            }
            stage.set_coefficients(*coeffs);
        }
        self.enabled = sections.len();
    }

    /// Number of enabled leading stages.
    pub fn enabled_stages(&self) -> usize {
        self.enabled
    }

    pub fn is_stage_enabled(&self, index: usize) -> bool {
        index < self.enabled
    }

    /// Taps of the enabled stages, in processing order.
    pub fn active_coefficients(&self) -> impl Iterator<Item = Coefficients> + '_ {
        self.stages[..self.enabled]
            .iter()
            .map(BiquadStage::coefficients)
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        self.stages[..self.enabled]
            .iter_mut()
            .fold(sample, |acc, stage| stage.process(acc))
    }

    pub fn process_buffer(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the delay line of every stage, enabled or not.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Linear magnitude of the enabled stages at `freq` Hz.
    pub fn magnitude(&self, freq: f64, sample_rate: f64) -> f64 {
        self.active_coefficients()
            .map(|coeffs| response::magnitude(&coeffs, freq, sample_rate))
            .product()
    }
}
