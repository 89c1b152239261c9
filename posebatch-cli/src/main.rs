// posebatch-cli/src/main.rs
//
// Entry point of the `posebatch` binary.
//
// Prints a start banner, parses arguments and runs the requested command,
// then always prints the run status, an end banner and the wall-clock
// execution time. Any error makes the process exit with status 1.

use clap::Parser;
use posebatch_cli::{Cli, dispatch, terminal};
use posebatch_core::utils::{format_banner_time, format_elapsed};

use std::process;
use std::time::Instant;

fn main() {
    let start_time = Instant::now();
    println!(
        "Program started at {}",
        format_banner_time(&chrono::Local::now())
    );

    // Usage errors exit here, after the start banner
    let cli = Cli::parse();
    let result = dispatch(cli);

    let run_result = match &result {
        Ok(()) => "Program completed successfully!".to_string(),
        Err(e) => {
            // The logger may not be installed if setup itself failed
            if log::max_level() == log::LevelFilter::Off {
                eprintln!("{e}");
            } else {
                terminal::print_error(e);
            }
            format!("Error: {e}")
        }
    };

    println!("{run_result}");
    println!(
        "Program ended at {}",
        format_banner_time(&chrono::Local::now())
    );
    println!("Execution time: {}", format_elapsed(start_time.elapsed()));

    if result.is_err() {
        process::exit(1);
    }
}
