//! The equalizer engine: one chain per channel, redesigned from a parameter
//! snapshot at the start of every block.

use log::{debug, warn};

use crate::dsp::response::to_db;
use crate::dsp::ChannelChain;
use crate::params::{FilterParameters, ParameterSource};

mod error;
pub mod layout;
mod resolve;

pub use error::{EngineError, EngineResult};
pub use layout::{is_layout_supported, ChannelLayout};
pub use resolve::{design_chain, ChainDesign, MAX_FREQ_RATIO, MIN_FREQ_HZ};

/// Stereo three-band equalizer: low cut, peak, high cut.
///
/// Call [`prepare`](Self::prepare) before the first block and whenever the
/// sample rate, block size or channel count changes. [`process`](Self::process)
/// never allocates, locks or fails.
#[derive(Debug, Default)]
pub struct EqualizerEngine {
    sample_rate: f64,
    max_block_size: usize,
    chains: Vec<ChannelChain>,
    clamped: bool,
}

impl EqualizerEngine {
    /// An unprepared engine; processing does nothing until `prepare`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate one chain per channel, clear all state and design the
    /// default parameters.
    ///
    /// # Errors
    /// Rejects non-positive or non-finite sample rates, a zero block size and
    /// any channel count other than one or two. The engine is left untouched
    /// on error.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
        channel_count: usize,
    ) -> EngineResult<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 {
            return Err(EngineError::InvalidBlockSize);
        }
        let layout = ChannelLayout::from_channel_count(channel_count).ok_or(
            EngineError::UnsupportedLayout {
                input: channel_count,
                output: channel_count,
            },
        )?;

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.chains = vec![ChannelChain::new(); layout.channel_count()];
        self.clamped = false;
        self.apply_parameters(&FilterParameters::default());

        debug!(
            "equalizer prepared: {} Hz, up to {} samples per block, {:?}",
            sample_rate, max_block_size, layout
        );
        Ok(())
    }

    /// Redesign every band from `params` and push the taps into each chain.
    ///
    /// Out-of-range values are clamped; a warning is logged only when the
    /// engine enters the clamped state. Not for the audio thread: `process`
    /// applies parameters without logging.
    pub fn apply_parameters(&mut self, params: &FilterParameters) {
        if self.update_coefficients(params) {
            warn!(
                "equalizer parameters out of range at {} Hz; clamping: {:?}",
                self.sample_rate, params
            );
        }
    }

    /// Returns true when this update entered the clamped state.
    fn update_coefficients(&mut self, params: &FilterParameters) -> bool {
        if !self.is_prepared() {
            return false;
        }
        let design = design_chain(params, self.sample_rate);
        let entered_clamp = design.clamped && !self.clamped;
        self.clamped = design.clamped;

        for chain in &mut self.chains {
            chain.apply(&design.coefficients);
        }
        entered_clamp
    }

    /// Filter one block in place, one buffer per channel.
    ///
    /// A buffer count or block length that doesn't match `prepare` is a
    /// programming error: it panics in debug builds. Release builds filter
    /// only the channels that were prepared.
    ///
    /// Nothing is logged here; poll [`is_clamped`](Self::is_clamped) from a
    /// non-realtime thread to report clamping.
    pub fn process(&mut self, buffers: &mut [&mut [f32]], params: &FilterParameters) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_buffers(&*buffers) {
            panic!("equalizer {}", err);
        }

        self.update_coefficients(params);
        for (chain, buffer) in self.chains.iter_mut().zip(buffers.iter_mut()) {
            chain.process(buffer);
        }
    }

    /// Snapshot `source` once, then process the block with it.
    pub fn process_from<S: ParameterSource + ?Sized>(
        &mut self,
        buffers: &mut [&mut [f32]],
        source: &S,
    ) {
        let params = source.snapshot();
        self.process(buffers, &params);
    }

    /// Check a block against the prepared configuration.
    ///
    /// # Errors
    /// [`EngineError::ConfigurationMismatch`] when the buffer count differs
    /// from the prepared channel count, [`EngineError::BlockTooLarge`] when a
    /// buffer is longer than the prepared maximum.
    pub fn check_buffers<B: AsRef<[f32]>>(&self, buffers: &[B]) -> EngineResult<()> {
        if buffers.len() != self.chains.len() {
            return Err(EngineError::ConfigurationMismatch {
                expected: self.chains.len(),
                actual: buffers.len(),
            });
        }
        match buffers
            .iter()
            .map(|buffer| buffer.as_ref().len())
            .find(|len| *len > self.max_block_size)
        {
            Some(len) => Err(EngineError::BlockTooLarge {
                len,
                max: self.max_block_size,
            }),
            None => Ok(()),
        }
    }

    /// Clear every filter's history; coefficients stay.
    pub fn reset(&mut self) {
        for chain in &mut self.chains {
            chain.reset();
        }
    }

    pub fn is_prepared(&self) -> bool {
        !self.chains.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn channel_count(&self) -> usize {
        self.chains.len()
    }

    /// True while the last applied parameters needed clamping.
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    pub fn chain(&self, channel: usize) -> Option<&ChannelChain> {
        self.chains.get(channel)
    }

    /// Combined response of the current taps at `freq`, in dB.
    ///
    /// Every channel carries the same taps, so the first one stands for all.
    pub fn magnitude_db(&self, freq: f64) -> Option<f64> {
        self.chains
            .first()
            .map(|chain| to_db(chain.magnitude(freq, self.sample_rate)))
    }
}
