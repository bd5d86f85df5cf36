//! Roll-off steepness of the cut bands.

use serde::{Deserialize, Serialize};

use super::ParamsError;

/// Slope choice for the low-cut and high-cut bands.
///
/// Serialized as its dB/oct value (`12`, `24`, `36` or `48`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Slope {
    #[default]
    Db12,
    Db24,
    Db36,
    Db48,
}

impl Slope {
    pub const ALL: [Slope; 4] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Position in the choice list (0 for 12 dB/oct).
    pub fn index(self) -> usize {
        match self {
            Slope::Db12 => 0,
            Slope::Db24 => 1,
            Slope::Db36 => 2,
            Slope::Db48 => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Resolve a stored choice value (the index as a float), rounding and
    /// clamping into the choice list.
    pub fn from_choice_value(value: f32) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let index = value.round().clamp(0.0, (Self::ALL.len() - 1) as f32) as usize;
        Self::ALL[index]
    }

    /// Butterworth order realizing this slope.
    pub fn order(self) -> usize {
        (self.index() + 1) * 2
    }

    /// Number of cascaded biquad sections.
    pub fn stages(self) -> usize {
        self.index() + 1
    }

    pub fn db_per_octave(self) -> u32 {
        (self.index() as u32 + 1) * 12
    }

    pub fn label(self) -> &'static str {
        SLOPE_CHOICES[self.index()]
    }
}

/// Display names of the slope choices, in index order.
pub const SLOPE_CHOICES: [&str; 4] = ["12 db/oct", "24 db/oct", "36 db/oct", "48 db/oct"];

impl TryFrom<u32> for Slope {
    type Error = ParamsError;

    fn try_from(db_per_octave: u32) -> Result<Self, Self::Error> {
        match db_per_octave {
            12 => Ok(Slope::Db12),
            24 => Ok(Slope::Db24),
            36 => Ok(Slope::Db36),
            48 => Ok(Slope::Db48),
            other => Err(ParamsError::InvalidSlope(other)),
        }
    }
}

impl From<Slope> for u32 {
    fn from(slope: Slope) -> Self {
        slope.db_per_octave()
    }
}
