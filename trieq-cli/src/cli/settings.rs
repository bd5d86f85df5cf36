//! Resolve equalizer settings from a JSON file and command line flags.

use std::fs;

use clap::ArgMatches;
use trieq_lib::params::{FilterParameters, Slope};

use crate::error::RunError;

/// Start from `--settings` (or the defaults) and apply any flag on top.
pub fn resolve(args: &ArgMatches) -> Result<FilterParameters, RunError> {
    let mut params = match args.get_one::<String>("settings") {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| RunError::Io {
                path: path.clone(),
                source,
            })?;
            FilterParameters::from_json(&json)?
        }
        None => FilterParameters::default(),
    };

    if let Some(freq) = args.get_one::<f32>("low-cut") {
        params.low_cut_freq = *freq;
    }
    if let Some(slope) = slope_arg(args, "low-cut-slope")? {
        params.low_cut_slope = slope;
    }
    if let Some(freq) = args.get_one::<f32>("peak-freq") {
        params.peak_freq = *freq;
    }
    if let Some(gain) = args.get_one::<f32>("peak-gain") {
        params.peak_gain_db = *gain;
    }
    if let Some(q) = args.get_one::<f32>("peak-q") {
        params.peak_q = *q;
    }
    if let Some(freq) = args.get_one::<f32>("high-cut") {
        params.high_cut_freq = *freq;
    }
    if let Some(slope) = slope_arg(args, "high-cut-slope")? {
        params.high_cut_slope = slope;
    }

    Ok(params)
}

fn slope_arg(args: &ArgMatches, name: &str) -> Result<Option<Slope>, RunError> {
    let Some(value) = args.get_one::<String>(name) else {
        return Ok(None);
    };
    let db_per_octave = value
        .parse::<u32>()
        .map_err(|_| RunError::InvalidValue {
            name: name.to_string(),
            value: value.clone(),
        })?;
    Ok(Some(Slope::try_from(db_per_octave)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::build_cli;
    use std::io::Write;

    fn response_matches(extra: &[&str]) -> ArgMatches {
        let mut argv = vec!["trieq", "response"];
        argv.extend_from_slice(extra);
        let matches = build_cli().try_get_matches_from(argv).expect("parse");
        matches
            .subcommand_matches("response")
            .cloned()
            .expect("response subcommand")
    }

    #[test]
    fn no_flags_gives_defaults() {
        let params = resolve(&response_matches(&[])).expect("resolve");
        assert_eq!(params, FilterParameters::default());
    }

    #[test]
    fn flags_override_settings_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"low_cut": 80, "peak_gain": "3db", "high_cut_slope": 24}}"#)
            .expect("write settings");
        let path = file.path().to_string_lossy().to_string();

        let params = resolve(&response_matches(&[
            "--settings",
            &path,
            "--peak-gain",
            "-9",
            "--low-cut-slope",
            "48",
        ]))
        .expect("resolve");
        assert_eq!(params.low_cut_freq, 80.0);
        assert_eq!(params.low_cut_slope, Slope::Db48);
        assert_eq!(params.peak_gain_db, -9.0);
        assert_eq!(params.high_cut_slope, Slope::Db24);
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let err = resolve(&response_matches(&["--settings", "/nonexistent/trieq.json"]));
        assert!(matches!(err, Err(RunError::Io { .. })));
    }
}
