//! Binary entrypoint for the `fileshell` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match fileshell::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
