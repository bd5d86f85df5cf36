//! # Trieq
//!
//! A command-line front end for the trieq three-band equalizer.

use log::error;

mod cli;
mod error;
mod logging;
mod runner;

fn main() {
    dotenv::dotenv().ok();

    let args = cli::args::build_cli().get_matches();
    logging::init(args.get_flag("quiet"));

    let code = match runner::run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err.to_string().to_lowercase());
            1
        }
    };

    std::process::exit(code)
}
