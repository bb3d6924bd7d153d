//! Binary entry point for the `sdflate` filter.
//!
//! Parses arguments, sets the display level and logger, applies the
//! environment overrides and dispatches to [`run`]. Exits with 1 on failure
//! after printing the error chain at display level 1.

use clap::Parser;

use streamdeflate::cli::args::Args;
use streamdeflate::cli::constants::{display_level, log_filter_for, set_display_level};
use streamdeflate::cli::run::run;
use streamdeflate::config::CodecConfig;
use streamdeflate::displaylevel;

fn main() {
    let args = Args::parse();
    set_display_level(args.display_level());

    env_logger::Builder::new()
        .filter_level(log_filter_for(display_level()))
        .parse_default_env()
        .format_timestamp(None)
        .init();

    displaylevel!(
        4,
        "*** {} v{} ***\n",
        streamdeflate::cli::constants::PROGRAM_NAME,
        streamdeflate::VERSION_STRING
    );

    if let Err(e) = run(&args, CodecConfig::from_env()) {
        displaylevel!(1, "Error : {e:#}\n");
        std::process::exit(1);
    }
}
