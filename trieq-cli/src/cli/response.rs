//! Print the magnitude response of the configured equalizer.

use clap::ArgMatches;
use serde_json::json;
use trieq_lib::engine::MAX_FREQ_RATIO;
use trieq_lib::EqualizerEngine;

use super::settings;
use crate::error::RunError;

const LOWEST_FREQ_HZ: f64 = 20.0;
const HIGHEST_FREQ_HZ: f64 = 20_000.0;

pub fn run(args: &ArgMatches) -> Result<i32, RunError> {
    let params = settings::resolve(args)?;
    let sample_rate = args
        .get_one::<f64>("sample-rate")
        .copied()
        .ok_or(RunError::MissingArgument("sample-rate"))?;
    let points = args
        .get_one::<usize>("points")
        .copied()
        .ok_or(RunError::MissingArgument("points"))?;

    let mut engine = EqualizerEngine::new();
    engine.prepare(sample_rate, 1, 1)?;
    engine.apply_parameters(&params);

    let highest = HIGHEST_FREQ_HZ.min(MAX_FREQ_RATIO * sample_rate);
    let response: Vec<_> = log_frequencies(LOWEST_FREQ_HZ, highest, points)
        .into_iter()
        .map(|freq| {
            json!({
                "freq_hz": freq,
                "magnitude_db": engine.magnitude_db(freq).unwrap_or(0.0),
            })
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "sample_rate": sample_rate,
            "settings": params,
            "response": response,
        }))?
    );
    Ok(0)
}

/// `points` frequencies spaced evenly on a log scale from `low` to `high`.
pub fn log_frequencies(low: f64, high: f64, points: usize) -> Vec<f64> {
    if points <= 1 || high <= low {
        return vec![low];
    }
    let ratio = (high / low).ln() / (points - 1) as f64;
    (0..points)
        .map(|idx| low * (ratio * idx as f64).exp())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_are_log_spaced() {
        let freqs = log_frequencies(20.0, 20_000.0, 4);
        let expected = [20.0, 200.0, 2_000.0, 20_000.0];
        for (freq, expected) in freqs.iter().zip(expected) {
            assert!((freq - expected).abs() < 1e-6 * expected, "{} != {}", freq, expected);
        }
    }

    #[test]
    fn degenerate_ranges_give_one_point() {
        assert_eq!(log_frequencies(20.0, 20_000.0, 1), vec![20.0]);
        assert_eq!(log_frequencies(20.0, 10.0, 8), vec![20.0]);
    }
}
