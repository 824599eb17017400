//! ptrack - single-project tracker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = project_tracker::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
