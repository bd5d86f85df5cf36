//! The equalizer's parameter layout: ids, labels, ranges and defaults.

use super::range::NormalisableRange;
use super::slope::SLOPE_CHOICES;

pub const DEFAULT_LOW_CUT_FREQ_HZ: f32 = 20.0;
pub const DEFAULT_PEAK_FREQ_HZ: f32 = 750.0;
pub const DEFAULT_PEAK_GAIN_DB: f32 = 0.0;
pub const DEFAULT_PEAK_Q: f32 = 1.0;
pub const DEFAULT_HIGH_CUT_FREQ_HZ: f32 = 20_000.0;

const CUT_FREQ_RANGE: NormalisableRange = NormalisableRange::new(20.0, 20_000.0, 1.0, 1.0);
const PEAK_FREQ_RANGE: NormalisableRange = NormalisableRange::new(20.0, 20_000.0, 1.0, 0.5);
const PEAK_GAIN_RANGE: NormalisableRange = NormalisableRange::new(-24.0, 24.0, 0.1, 0.25);
const PEAK_Q_RANGE: NormalisableRange = NormalisableRange::new(0.1, 10.0, 0.05, 0.25);
const SLOPE_RANGE: NormalisableRange =
    NormalisableRange::new(0.0, (SLOPE_CHOICES.len() - 1) as f32, 1.0, 1.0);

/// Every automatable parameter of the equalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterId {
    LowCutFreq,
    LowCutSlope,
    PeakFreq,
    PeakGain,
    PeakQ,
    HighCutFreq,
    HighCutSlope,
}

pub const PARAMETER_COUNT: usize = 7;

impl ParameterId {
    pub const ALL: [ParameterId; PARAMETER_COUNT] = [
        ParameterId::LowCutFreq,
        ParameterId::LowCutSlope,
        ParameterId::PeakFreq,
        ParameterId::PeakGain,
        ParameterId::PeakQ,
        ParameterId::HighCutFreq,
        ParameterId::HighCutSlope,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable machine-readable id.
    pub fn id(self) -> &'static str {
        self.spec().id
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn spec(self) -> &'static ParameterSpec {
        &PARAMETER_LAYOUT[self.index()]
    }

    /// Look a parameter up by its id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.id() == id)
    }
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub range: NormalisableRange,
    pub default: f32,
    /// Choice names for discrete parameters; values are stored as the index.
    pub choices: Option<&'static [&'static str]>,
    pub unit: &'static str,
}

impl ParameterSpec {
    pub fn is_choice(&self) -> bool {
        self.choices.is_some()
    }

    /// Human-readable form of a stored value.
    pub fn display_value(&self, value: f32) -> String {
        match self.choices {
            Some(choices) => {
                let index = self.range.snap_to_legal_value(value) as usize;
                choices.get(index).copied().unwrap_or_default().to_string()
            }
            None if self.unit.is_empty() => format!("{:.2}", value),
            None => format!("{:.2} {}", value, self.unit),
        }
    }
}

/// The parameter layout, indexed by [`ParameterId::index`].
pub static PARAMETER_LAYOUT: [ParameterSpec; PARAMETER_COUNT] = [
    ParameterSpec {
        id: "low_cut_freq",
        label: "LowCut Freq",
        range: CUT_FREQ_RANGE,
        default: DEFAULT_LOW_CUT_FREQ_HZ,
        choices: None,
        unit: "Hz",
    },
    ParameterSpec {
        id: "low_cut_slope",
        label: "LowCut Slope",
        range: SLOPE_RANGE,
        default: 0.0,
        choices: Some(&SLOPE_CHOICES),
        unit: "",
    },
    ParameterSpec {
        id: "peak_freq",
        label: "Peak Freq",
        range: PEAK_FREQ_RANGE,
        default: DEFAULT_PEAK_FREQ_HZ,
        choices: None,
        unit: "Hz",
    },
    ParameterSpec {
        id: "peak_gain",
        label: "Peak Gain",
        range: PEAK_GAIN_RANGE,
        default: DEFAULT_PEAK_GAIN_DB,
        choices: None,
        unit: "dB",
    },
    ParameterSpec {
        id: "peak_q",
        label: "Peak Quality",
        range: PEAK_Q_RANGE,
        default: DEFAULT_PEAK_Q,
        choices: None,
        unit: "",
    },
    ParameterSpec {
        id: "high_cut_freq",
        label: "HighCut Freq",
        range: CUT_FREQ_RANGE,
        default: DEFAULT_HIGH_CUT_FREQ_HZ,
        choices: None,
        unit: "Hz",
    },
    ParameterSpec {
        id: "high_cut_slope",
        label: "HighCut Slope",
        range: SLOPE_RANGE,
        default: 0.0,
        choices: Some(&SLOPE_CHOICES),
        unit: "",
    },
];
