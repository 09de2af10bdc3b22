//! Parsing a command line into a typed [`Command`].

use crate::error::{Result, ShellError};

/// Token that names the cursor's parent directory.
pub const PARENT_DIR: &str = "..";

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ls` / `ls -l`
    List {
        /// Include size and modification time.
        long: bool,
    },
    /// `cd <path|..>`
    ChangeDir(String),
    /// `mkdir <name>`
    MakeDir(String),
    /// `rm <path>`
    Remove(String),
    /// `mv <source> <dest-dir>`
    Move {
        /// Entry to move.
        source: String,
        /// Directory to move it into.
        destination: String,
    },
    /// `cp <source> <dest-dir>`
    Copy {
        /// File to copy.
        source: String,
        /// Directory to copy it into.
        destination: String,
    },
    /// `finfo <path>`
    Info(String),
    /// `find <name>`
    Find(String),
    /// `help`
    Help,
    /// `exit`
    Exit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parses one input line.
    ///
    /// The first whitespace-delimited word selects the command; it must match
    /// exactly. Single-argument commands take the rest of the line verbatim
    /// (trimmed), so names may contain spaces.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownCommand`] for an unrecognised word and
    /// [`ShellError::Malformed`] when the arguments don't fit the grammar.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "ls" => match rest {
                "" => Ok(Self::List { long: false }),
                "-l" => Ok(Self::List { long: true }),
                other => {
                    Err(ShellError::malformed(word, format!("unsupported argument `{other}`")))
                }
            },
            "cd" => single(word, rest).map(Self::ChangeDir),
            "mkdir" => single(word, rest).map(Self::MakeDir),
            "rm" => single(word, rest).map(Self::Remove),
            "finfo" => single(word, rest).map(Self::Info),
            "find" => single(word, rest).map(Self::Find),
            "mv" => pair(word, rest).map(|(source, destination)| Self::Move {
                source,
                destination,
            }),
            "cp" => pair(word, rest).map(|(source, destination)| Self::Copy {
                source,
                destination,
            }),
            "help" => no_args(word, rest, Self::Help),
            "exit" => no_args(word, rest, Self::Exit),
            _ => Err(ShellError::UnknownCommand { input: word.to_string() }),
        }
    }
}

fn single(word: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        Err(ShellError::malformed(word, "expected one argument"))
    } else {
        Ok(rest.to_string())
    }
}

fn pair(word: &str, rest: &str) -> Result<(String, String)> {
    match rest.split_once(char::is_whitespace) {
        Some((source, destination)) if !destination.trim().is_empty() => {
            Ok((source.to_string(), destination.trim().to_string()))
        }
        _ => Err(ShellError::malformed(word, "expected <source> <destination>")),
    }
}

fn no_args(word: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ShellError::malformed(word, "takes no arguments"))
    }
}
