//! Equalizer parameters: the published layout, the atomic store the audio
//! thread reads from, and the snapshot value handed to the engine.

use thiserror::Error;

mod layout;
mod range;
mod settings;
mod slope;
mod store;

pub use layout::{
    ParameterId, ParameterSpec, DEFAULT_HIGH_CUT_FREQ_HZ, DEFAULT_LOW_CUT_FREQ_HZ,
    DEFAULT_PEAK_FREQ_HZ, DEFAULT_PEAK_GAIN_DB, DEFAULT_PEAK_Q, PARAMETER_COUNT, PARAMETER_LAYOUT,
};
pub use range::NormalisableRange;
pub use settings::FilterParameters;
pub use slope::{Slope, SLOPE_CHOICES};
pub use store::{ParameterSource, ParameterStore};

/// Errors raised while reading or writing parameters.
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("invalid slope {0} db/oct: expected 12, 24, 36 or 48")]
    InvalidSlope(u32),

    #[error("non-finite value for parameter {id}")]
    NonFinite { id: &'static str },

    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}
