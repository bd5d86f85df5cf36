use clap::ArgMatches;
use log::info;
use trieq_lib::params::{FilterParameters, PARAMETER_LAYOUT};

use crate::cli;
use crate::error::RunError;

pub fn run(args: &ArgMatches) -> Result<i32, RunError> {
    match args.subcommand() {
        Some(("render", sub)) => {
            info!("Starting trieq render");
            cli::render::run(sub)
        }
        Some(("response", sub)) => cli::response::run(sub),
        Some(("params", _)) => {
            print_params();
            Ok(0)
        }
        Some(("create", sub)) => match sub.subcommand() {
            Some(("settings-json", _)) => {
                println!("{}", FilterParameters::default().to_json_pretty()?);
                Ok(0)
            }
            _ => Err(RunError::MissingArgument("create subcommand")),
        },
        _ => Err(RunError::MissingArgument("subcommand")),
    }
}

fn print_params() {
    println!(
        "{:<16} {:<14} {:>10} {:>10} {:>14}",
        "id", "label", "min", "max", "default"
    );
    for spec in PARAMETER_LAYOUT.iter() {
        let (min, max) = match spec.choices {
            Some(choices) => (
                choices.first().copied().unwrap_or_default().to_string(),
                choices.last().copied().unwrap_or_default().to_string(),
            ),
            None => (spec.display_value(spec.range.start), spec.display_value(spec.range.end)),
        };
        println!(
            "{:<16} {:<14} {:>10} {:>10} {:>14}",
            spec.id,
            spec.label,
            min,
            max,
            spec.display_value(spec.default)
        );
    }
}
