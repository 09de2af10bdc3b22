//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `fileshell`.
#[derive(Debug, Parser)]
#[command(name = "fileshell", version, about = "Interactive file manager shell")]
pub struct Cli {
    /// Directory to start in (defaults to the working directory).
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
