//! Error types for shell commands and tree operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every failure a command can surface to the user.
///
/// Variants that concern the filesystem carry the offending path so the
/// rendered message always names it.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The path does not resolve to an existing entry.
    ///
    /// An entry that never existed and one removed concurrently mid-walk
    /// both land here.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A directory was required but something else was found (or vice versa).
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// Path of the offending entry.
        path: PathBuf,
    },

    /// A file was required but a directory was found.
    #[error("is a directory: {}", path.display())]
    IsADirectory {
        /// Path of the offending entry.
        path: PathBuf,
    },

    /// Source and destination name the same entry.
    #[error("source and destination are the same entry: {}", path.display())]
    SameEntry {
        /// The shared path.
        path: PathBuf,
    },

    /// A traversal reached its configured depth limit below this directory.
    #[error("depth limit {limit} reached at {}", path.display())]
    DepthLimit {
        /// Directory that was not descended into.
        path: PathBuf,
        /// Configured limit.
        limit: usize,
    },

    /// An entry with that name is already present.
    #[error("already exists: {}", path.display())]
    AlreadyExists {
        /// Path that collided.
        path: PathBuf,
    },

    /// A filesystem call failed for a reason outside our control.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path the failing call was made on.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Argument count or shape does not match the command grammar.
    #[error("malformed command `{command}`: {reason}")]
    Malformed {
        /// Command word as typed.
        command: String,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// The first word of the line is not a known command.
    #[error("unknown command `{input}`: type `help` for the list of commands")]
    UnknownCommand {
        /// The unrecognised word.
        input: String,
    },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Reading commands or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    /// The session could not be started.
    #[error("startup failed: {0}")]
    Startup(String),
}

impl ShellError {
    /// Classifies an I/O error raised while operating on `path`.
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::IsADirectory => Self::IsADirectory { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Builds a malformed-command error.
    pub fn malformed(command: &str, reason: impl Into<String>) -> Self {
        Self::Malformed { command: command.to_string(), reason: reason.into() }
    }
}

/// Result type alias for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
