//! Value ranges with an optional step and a skewed normalized mapping.

/// A bounded parameter range.
///
/// `interval` is the step legal values snap to (`0.0` for continuous).
/// `skew` shapes the 0..1 normalized mapping used by automation: values
/// below `1.0` give more of the normalized travel to the low end of the
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalisableRange {
    pub start: f32,
    pub end: f32,
    pub interval: f32,
    pub skew: f32,
}

impl NormalisableRange {
    pub const fn new(start: f32, end: f32, interval: f32, skew: f32) -> Self {
        Self {
            start,
            end,
            interval,
            skew,
        }
    }

    /// Span of the range.
    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Map a plain value to `0..=1`.
    pub fn convert_to_normalized(&self, value: f32) -> f32 {
        let proportion = ((value - self.start) / self.length()).clamp(0.0, 1.0);
        if self.skew == 1.0 {
            proportion
        } else {
            proportion.powf(self.skew)
        }
    }

    /// Map `0..=1` back to a plain value.
    pub fn convert_from_normalized(&self, normalized: f32) -> f32 {
        let mut proportion = normalized.clamp(0.0, 1.0);
        if self.skew != 1.0 && proportion > 0.0 {
            proportion = (proportion.ln() / self.skew).exp();
        }
        self.start + self.length() * proportion
    }

    /// Clamp into the range and snap to the nearest step.
    pub fn snap_to_legal_value(&self, value: f32) -> f32 {
        let snapped = if self.interval > 0.0 {
            self.start + self.interval * ((value - self.start) / self.interval).round()
        } else {
            value
        };
        snapped.clamp(self.start, self.end)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.start && value <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_mapping_round_trips_endpoints() {
        let range = NormalisableRange::new(20.0, 20_000.0, 1.0, 1.0);
        assert_eq!(range.convert_to_normalized(20.0), 0.0);
        assert_eq!(range.convert_to_normalized(20_000.0), 1.0);
        assert_eq!(range.convert_from_normalized(0.0), 20.0);
        assert_eq!(range.convert_from_normalized(1.0), 20_000.0);
    }

    #[test]
    fn skew_favours_the_low_end() {
        let range = NormalisableRange::new(20.0, 20_000.0, 1.0, 0.5);
        let mid = range.convert_from_normalized(0.5);
        assert!((mid - 5_015.0).abs() < 1.0, "mid point {}", mid);
        let back = range.convert_to_normalized(mid);
        assert!((back - 0.5).abs() < 1e-4);
    }

    #[test]
    fn snapping_follows_interval_and_bounds() {
        let gain = NormalisableRange::new(-24.0, 24.0, 0.1, 0.25);
        assert!((gain.snap_to_legal_value(3.14) - 3.1).abs() < 1e-4);
        assert_eq!(gain.snap_to_legal_value(40.0), 24.0);
        assert_eq!(gain.snap_to_legal_value(-40.0), -24.0);

        let q = NormalisableRange::new(0.1, 10.0, 0.05, 0.25);
        assert!((q.snap_to_legal_value(0.72) - 0.7).abs() < 1e-4);

        let continuous = NormalisableRange::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(continuous.snap_to_legal_value(0.123), 0.123);
    }

    #[test]
    fn normalized_input_is_clamped() {
        let range = NormalisableRange::new(0.1, 10.0, 0.05, 0.25);
        assert_eq!(range.convert_from_normalized(-1.0), 0.1);
        assert_eq!(range.convert_from_normalized(2.0), 10.0);
        assert!(range.contains(5.0));
        assert!(!range.contains(10.5));
    }
}
