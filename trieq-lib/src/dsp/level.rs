//! Helpers for converting between linear gain and dB, and for reading dB
//! values out of settings files.

use serde::de::{Error as DeError, Visitor};
use serde::Deserializer;
use std::fmt;

/// Convert a dB value to linear gain.
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert a linear gain to dB.
pub fn linear_to_db(value: f32) -> f32 {
    let v = value.max(f32::MIN_POSITIVE);
    20.0 * v.log10()
}

/// Deserialize a dB gain given either as a number or as a string like
/// `"6db"`, `"-3 dB"` or `"4.5"`.
pub fn deserialize_db_gain<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    struct DbVisitor;

    impl<'de> Visitor<'de> for DbVisitor {
        type Value = f32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string like \"6db\"")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(value as f32)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(value as f32)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(value as f32)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            parse_db_str(value)
                .ok_or_else(|| DeError::custom(format!("invalid gain value \"{}\"", value)))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            self.visit_str(&value)
        }
    }

    deserializer.deserialize_any(DbVisitor)
}

fn parse_db_str(value: &str) -> Option<f32> {
    let lower = value.trim().to_ascii_lowercase();
    let number = lower.strip_suffix("db").unwrap_or(&lower).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_linear_conversions() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-4);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
        assert!(linear_to_db(0.0).is_finite());
    }

    #[test]
    fn parses_db_strings() {
        assert_eq!(parse_db_str("6db"), Some(6.0));
        assert_eq!(parse_db_str(" -3 dB "), Some(-3.0));
        assert_eq!(parse_db_str("4.5"), Some(4.5));
        assert_eq!(parse_db_str("db"), None);
        assert_eq!(parse_db_str("loud"), None);
    }
}
