//! CLI argument definitions for `trieq`.

use clap::{value_parser, Arg, ArgAction, Command};

pub const DEFAULT_BLOCK_SIZE: &str = "512";
pub const DEFAULT_SAMPLE_RATE: &str = "48000";
pub const DEFAULT_RESPONSE_POINTS: &str = "32";

const SLOPE_VALUES: [&str; 4] = ["12", "24", "36", "48"];

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("trieq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run audio through a three-band equalizer")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
        .subcommand(
            Command::new("render")
                .about("Filter a mono or stereo WAV file and write a 32-bit float WAV")
                .arg(
                    Arg::new("INPUT")
                        .help("The input WAV file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("OUTPUT")
                        .help("The output WAV file")
                        .required(true)
                        .index(2),
                )
                .args(filter_args())
                .arg(
                    Arg::new("block-size")
                        .long("block-size")
                        .value_name("SAMPLES")
                        .value_parser(value_parser!(usize))
                        .default_value(DEFAULT_BLOCK_SIZE)
                        .help("Samples per processing block"),
                ),
        )
        .subcommand(
            Command::new("response")
                .about("Print the magnitude response of the configured filters as JSON")
                .args(filter_args())
                .arg(
                    Arg::new("sample-rate")
                        .long("sample-rate")
                        .short('r')
                        .value_name("HZ")
                        .value_parser(value_parser!(f64))
                        .default_value(DEFAULT_SAMPLE_RATE)
                        .help("Sample rate the filters are designed for"),
                )
                .arg(
                    Arg::new("points")
                        .long("points")
                        .short('n')
                        .value_name("COUNT")
                        .value_parser(value_parser!(usize))
                        .default_value(DEFAULT_RESPONSE_POINTS)
                        .help("Number of log-spaced frequencies between 20 Hz and 20 kHz"),
                ),
        )
        .subcommand(Command::new("params").about("Print the parameter layout"))
        .subcommand(
            Command::new("create")
                .about("Emit default JSON payloads")
                .subcommand_required(true)
                .subcommand(
                    Command::new("settings-json")
                        .about("Print the default equalizer settings as JSON"),
                ),
        )
}

/// Arguments shared by every command that designs filters. Flags override
/// values loaded from `--settings`.
fn filter_args() -> Vec<Arg> {
    vec![
        Arg::new("settings")
            .long("settings")
            .short('S')
            .value_name("PATH")
            .help("Path to a JSON settings file"),
        Arg::new("low-cut")
            .long("low-cut")
            .value_name("HZ")
            .value_parser(value_parser!(f32))
            .help("Low cut frequency"),
        Arg::new("low-cut-slope")
            .long("low-cut-slope")
            .value_name("DB")
            .value_parser(SLOPE_VALUES)
            .help("Low cut slope in db/oct"),
        Arg::new("peak-freq")
            .long("peak-freq")
            .value_name("HZ")
            .value_parser(value_parser!(f32))
            .help("Peak center frequency"),
        Arg::new("peak-gain")
            .long("peak-gain")
            .value_name("DB")
            .value_parser(value_parser!(f32))
            .allow_negative_numbers(true)
            .help("Peak gain in dB"),
        Arg::new("peak-q")
            .long("peak-q")
            .value_name("Q")
            .value_parser(value_parser!(f32))
            .help("Peak quality"),
        Arg::new("high-cut")
            .long("high-cut")
            .value_name("HZ")
            .value_parser(value_parser!(f32))
            .help("High cut frequency"),
        Arg::new("high-cut-slope")
            .long("high-cut-slope")
            .value_name("DB")
            .value_parser(SLOPE_VALUES)
            .help("High cut slope in db/oct"),
    ]
}
