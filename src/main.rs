use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use subnet_planner::cli::{run, Cli};
use subnet_planner::logging::init_logging;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = init_logging() {
        eprintln!("{} {e}", "WARN".on_yellow());
    }
    log::info!("#Start main()");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", "ERROR".on_red());
            ExitCode::FAILURE
        }
    }
}
