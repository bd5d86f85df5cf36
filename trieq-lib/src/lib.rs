//! # Trieq Library
//!
//! Real-time three-band equalizer: a Butterworth low cut, a parametric peak
//! and a Butterworth high cut, run per channel in that order.
//!
//! The [`engine`] module owns per-channel filter state and redesigns the
//! coefficients from a parameter snapshot each block. [`params`] publishes
//! the parameter layout and the lock-free store the audio thread reads.
//! [`dsp`] holds the filter building blocks and coefficient design.

pub mod dsp;
pub mod engine;
pub mod params;

#[cfg(test)]
mod test_signal;

pub use dsp::{BiquadStage, CascadeFilter, ChannelChain, Coefficients};
pub use engine::{ChannelLayout, EngineError, EqualizerEngine};
pub use params::{FilterParameters, ParameterId, ParameterSource, ParameterStore, Slope};
