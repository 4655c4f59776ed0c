//! extrema - mark local minima or maxima of a grayscale image
//!
//! ```text
//! extrema minima input.pgm minima.png --radius 3 --shape ball
//! extrema maxima input.png maxima.pgm --threshold 200 --no-flat -v
//! ```

mod args;
mod run;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level();
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialize logger: {e}");
    }
    info!("Log level: {}", level);

    match run::run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
