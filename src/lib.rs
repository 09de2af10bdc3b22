//! Core library entry for the `fileshell` interactive file manager.

pub mod adapters;
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod render;
pub mod session;
pub mod tree;

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;

pub use command::Command;
pub use config::Config;
pub use context::ServiceContext;
pub use error::{Result, ShellError};
pub use session::Session;

/// Run the shell on standard input and output.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration or startup fails,
/// or the terminal becomes unusable.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let stdin = std::io::stdin();
    run_with_io(args, stdin.lock(), std::io::stdout())
}

/// Run the shell reading commands from `input` and printing to `output`.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration or startup fails,
/// or reading/writing fails.
pub fn run_with_io<I, T, R, W>(args: I, input: R, mut output: W) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    R: BufRead,
    W: Write,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(output, "{err}")?;
            return Ok(());
        }
        Err(err) => return Err(ShellError::Startup(err.to_string())),
    };
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_filter);

    let start = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| ShellError::Startup(format!("cannot determine working directory: {e}")))?,
    };
    let mut session = Session::new(ServiceContext::live(), config, &start)?;
    session.run(input, output)
}
