//! The per-block parameter snapshot, also used as the settings payload.

use serde::{Deserialize, Serialize};

use super::layout::{
    ParameterId, DEFAULT_HIGH_CUT_FREQ_HZ, DEFAULT_LOW_CUT_FREQ_HZ, DEFAULT_PEAK_FREQ_HZ,
    DEFAULT_PEAK_GAIN_DB, DEFAULT_PEAK_Q,
};
use super::slope::Slope;
use super::ParamsError;
use crate::dsp::level::deserialize_db_gain;

/// Immutable view of every equalizer parameter at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    #[serde(alias = "low_cut", alias = "low_cut_hz")]
    pub low_cut_freq: f32,
    pub low_cut_slope: Slope,
    #[serde(alias = "peak_hz")]
    pub peak_freq: f32,
    #[serde(alias = "peak_gain", deserialize_with = "deserialize_db_gain")]
    pub peak_gain_db: f32,
    #[serde(alias = "q", alias = "peak_quality")]
    pub peak_q: f32,
    #[serde(alias = "high_cut", alias = "high_cut_hz")]
    pub high_cut_freq: f32,
    pub high_cut_slope: Slope,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            low_cut_freq: DEFAULT_LOW_CUT_FREQ_HZ,
            low_cut_slope: Slope::Db12,
            peak_freq: DEFAULT_PEAK_FREQ_HZ,
            peak_gain_db: DEFAULT_PEAK_GAIN_DB,
            peak_q: DEFAULT_PEAK_Q,
            high_cut_freq: DEFAULT_HIGH_CUT_FREQ_HZ,
            high_cut_slope: Slope::Db12,
        }
    }
}

impl FilterParameters {
    /// Parse settings from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`ParamsError::Json`] for malformed JSON or an unknown slope.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ParamsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stored value of one parameter; slopes report their choice index.
    pub fn value(&self, id: ParameterId) -> f32 {
        match id {
            ParameterId::LowCutFreq => self.low_cut_freq,
            ParameterId::LowCutSlope => self.low_cut_slope.index() as f32,
            ParameterId::PeakFreq => self.peak_freq,
            ParameterId::PeakGain => self.peak_gain_db,
            ParameterId::PeakQ => self.peak_q,
            ParameterId::HighCutFreq => self.high_cut_freq,
            ParameterId::HighCutSlope => self.high_cut_slope.index() as f32,
        }
    }
}
