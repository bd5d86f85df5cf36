//! DSP components: biquad sections, Butterworth cascades, coefficient design
//! and the per-channel chain.

pub mod biquad;
pub mod cascade;
pub mod chain;
pub mod design;
pub mod level;
pub mod response;

pub use biquad::{BiquadStage, Coefficients};
pub use cascade::CascadeFilter;
pub use chain::{ChainCoefficients, ChannelChain};
pub use design::{CascadeCoefficients, DesignError};
