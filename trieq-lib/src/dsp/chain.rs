//! Per-channel signal path: low cut, then peak, then high cut.

use super::biquad::{BiquadStage, Coefficients};
use super::cascade::CascadeFilter;
use super::design::{CascadeCoefficients, DesignError, MAX_ORDER};

/// Complete set of taps for one channel, produced by coefficient design and
/// applied to every channel identically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainCoefficients {
    pub low_cut: CascadeCoefficients,
    pub peak: Coefficients,
    pub high_cut: CascadeCoefficients,
}

impl Default for ChainCoefficients {
    fn default() -> Self {
        Self {
            low_cut: CascadeCoefficients::passthrough(1),
            peak: Coefficients::PASSTHROUGH,
            high_cut: CascadeCoefficients::passthrough(1),
        }
    }
}

/// One channel's equalizer. Channels never share a chain.
#[derive(Clone, Debug, Default)]
pub struct ChannelChain {
    low_cut: CascadeFilter,
    peak: BiquadStage,
    high_cut: CascadeFilter,
}

impl ChannelChain {
    /// A flat chain: one identity stage per cut band and an identity peak.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure all three bands from explicit filter orders.
    ///
    /// # Arguments
    /// - `low_cut_order`, `high_cut_order`: Butterworth order (2, 4, 6 or 8);
    ///   one stage is enabled per two poles.
    /// - `low_cut`, `high_cut`: Cascade taps holding at least `order / 2`
    ///   sections.
    /// - `peak`: Peak band taps.
    ///
    /// # Errors
    /// Everything is validated before any band is touched, so on error the
    /// chain keeps its previous configuration.
    pub fn configure(
        &mut self,
        low_cut_order: usize,
        low_cut: &CascadeCoefficients,
        peak: Coefficients,
        high_cut_order: usize,
        high_cut: &CascadeCoefficients,
    ) -> Result<(), DesignError> {
        let low_stages = stages_for_order(low_cut_order, low_cut)?;
        let high_stages = stages_for_order(high_cut_order, high_cut)?;

        self.low_cut.configure(low_stages, low_cut.as_slice())?;
        self.peak.set_coefficients(peak);
        self.high_cut.configure(high_stages, high_cut.as_slice())?;
        Ok(())
    }

    /// Apply a designed coefficient set; stage counts follow the cascades.
    pub fn apply(&mut self, coeffs: &ChainCoefficients) {
        self.low_cut.apply(&coeffs.low_cut);
        self.peak.set_coefficients(coeffs.peak);
        self.high_cut.apply(&coeffs.high_cut);
    }

    /// Run the chain over `samples` in place.
    pub fn process(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            let low = self.low_cut.process(*sample);
            let peaked = self.peak.process(low);
            *sample = self.high_cut.process(peaked);
        }
    }

    pub fn reset(&mut self) {
        self.low_cut.reset();
        self.peak.reset();
        self.high_cut.reset();
    }

    pub fn low_cut(&self) -> &CascadeFilter {
        &self.low_cut
    }

    pub fn peak(&self) -> &BiquadStage {
        &self.peak
    }

    pub fn high_cut(&self) -> &CascadeFilter {
        &self.high_cut
    }

    /// Linear magnitude of the whole chain at `freq` Hz.
    pub fn magnitude(&self, freq: f64, sample_rate: f64) -> f64 {
        self.low_cut.magnitude(freq, sample_rate)
            * super::response::magnitude(&self.peak.coefficients(), freq, sample_rate)
            * self.high_cut.magnitude(freq, sample_rate)
    }
}

fn stages_for_order(order: usize, cascade: &CascadeCoefficients) -> Result<usize, DesignError> {
    if !(2..=MAX_ORDER).contains(&order) || order % 2 != 0 {
        return Err(DesignError::InvalidOrder(order));
    }
    let stages = order / 2;
    if cascade.len() < stages {
        return Err(DesignError::MissingSections {
            expected: stages,
            provided: cascade.len(),
        });
    }
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::design::{
        butterworth_highpass_cascade, butterworth_lowpass_cascade, peak_filter,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FS: f64 = 48_000.0;

    fn design(low_order: usize, high_order: usize, gain_db: f64) -> ChainCoefficients {
        ChainCoefficients {
            low_cut: butterworth_highpass_cascade(80.0, FS, low_order).expect("low cut"),
            peak: peak_filter(FS, 1_500.0, 0.7, 10.0_f64.powf(gain_db / 20.0)).expect("peak"),
            high_cut: butterworth_lowpass_cascade(9_000.0, FS, high_order).expect("high cut"),
        }
    }

    fn noise(len: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        (0..len).map(|_| rng.gen_range(-1.0_f32..1.0)).collect()
    }

    #[test]
    fn new_chain_is_flat() {
        let mut chain = ChannelChain::new();
        let input = noise(256);
        let mut output = input.clone();
        chain.process(&mut output);
        assert_eq!(output, input);
    }

    #[test]
    fn configure_twice_matches_configure_once() {
        let coeffs = design(4, 6, 5.0);

        let mut once = ChannelChain::new();
        once.apply(&coeffs);
        let mut twice = ChannelChain::new();
        twice.apply(&coeffs);
        twice.apply(&coeffs);

        let mut a = noise(2_048);
        let mut b = a.clone();
        once.process(&mut a);
        twice.process(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn configure_by_order_twice_matches_once() {
        let low = butterworth_highpass_cascade(80.0, FS, 6).expect("low cut");
        let peak = peak_filter(FS, 1_500.0, 0.7, 10.0_f64.powf(5.0 / 20.0)).expect("peak");
        let high = butterworth_lowpass_cascade(9_000.0, FS, 8).expect("high cut");

        let mut once = ChannelChain::new();
        once.configure(6, &low, peak, 8, &high).expect("configure once");
        let mut twice = ChannelChain::new();
        twice.configure(6, &low, peak, 8, &high).expect("configure first");
        twice.configure(6, &low, peak, 8, &high).expect("configure second");

        let mut a = noise(2_048);
        let mut b = a.clone();
        once.process(&mut a);
        twice.process(&mut b);
        assert_eq!(a, b);
        assert_eq!(twice.low_cut().enabled_stages(), 3);
        assert_eq!(twice.high_cut().enabled_stages(), 4);
    }

    #[test]
    fn reset_reproduces_impulse_response() {
        let mut chain = ChannelChain::new();
        chain.apply(&design(8, 8, -9.0));

        let mut impulse = vec![0.0_f32; 512];
        impulse[0] = 1.0;

        let mut first = impulse.clone();
        chain.process(&mut first);
        chain.reset();
        let mut second = impulse.clone();
        chain.process(&mut second);

        assert_eq!(first, second);
        assert!(first.iter().all(|v| v.is_finite()));
        assert!(first.iter().any(|v| v.abs() > 1e-6));
    }

    #[test]
    fn configure_uses_order_for_stage_counts() {
        let mut chain = ChannelChain::new();
        let low = butterworth_highpass_cascade(80.0, FS, 8).expect("low cut");
        let high = butterworth_lowpass_cascade(9_000.0, FS, 4).expect("high cut");
        chain
            .configure(6, &low, Coefficients::PASSTHROUGH, 4, &high)
            .expect("configure");
        assert_eq!(chain.low_cut().enabled_stages(), 3);
        assert_eq!(chain.high_cut().enabled_stages(), 2);
    }

    #[test]
    fn configure_is_all_or_nothing() {
        let mut chain = ChannelChain::new();
        let coeffs = design(4, 4, 3.0);
        chain.apply(&coeffs);

        let err = chain.configure(
            2,
            &coeffs.low_cut,
            Coefficients::PASSTHROUGH,
            7,
            &coeffs.high_cut,
        );
        assert_eq!(err, Err(DesignError::InvalidOrder(7)));
        assert_eq!(chain.low_cut().enabled_stages(), 2);
        assert_eq!(chain.peak().coefficients(), coeffs.peak);

        let short = butterworth_lowpass_cascade(9_000.0, FS, 2).expect("high cut");
        let err = chain.configure(2, &coeffs.low_cut, Coefficients::PASSTHROUGH, 8, &short);
        assert_eq!(
            err,
            Err(DesignError::MissingSections {
                expected: 4,
                provided: 1
            })
        );
    }

    #[test]
    fn bands_run_in_series() {
        let coeffs = design(2, 2, 6.0);
        let mut chain = ChannelChain::new();
        chain.apply(&coeffs);

        let mut low = BiquadStage::new(coeffs.low_cut.as_slice()[0]);
        let mut peak = BiquadStage::new(coeffs.peak);
        let mut high = BiquadStage::new(coeffs.high_cut.as_slice()[0]);

        let input = noise(300);
        let expected: Vec<f32> = input
            .iter()
            .map(|&x| high.process(peak.process(low.process(x))))
            .collect();

        let mut output = input.clone();
        chain.process(&mut output);
        assert_eq!(output, expected);
    }
}
