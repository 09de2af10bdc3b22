//! The interactive session: cursor ownership and command dispatch.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::command::{Command, PARENT_DIR};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Result, ShellError};
use crate::ports::EntryKind;
use crate::render;
use crate::tree;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop the session.
    Exit,
}

/// Result of one successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Lines to show the user.
    pub lines: Vec<String>,
    /// What the loop does next.
    pub flow: Flow,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, flow: Flow::Continue }
    }

    fn line(line: String) -> Self {
        Self::lines(vec![line])
    }

    fn quiet() -> Self {
        Self::lines(Vec::new())
    }
}

/// A file manager session.
///
/// The cursor is the only state carried between commands. It is changed by
/// `cd` alone and only after the new directory has been validated.
pub struct Session {
    ctx: ServiceContext,
    config: Config,
    cursor: PathBuf,
}

impl Session {
    /// Starts a session with the cursor at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Startup`] if `start` is not an existing directory.
    pub fn new(ctx: ServiceContext, config: Config, start: &Path) -> Result<Self> {
        let cursor = ctx.fs.canonicalize(start).map_err(|e| {
            ShellError::Startup(format!("cannot resolve {}: {e}", start.display()))
        })?;
        let meta = ctx.fs.symlink_metadata(&cursor).map_err(|e| {
            ShellError::Startup(format!("cannot inspect {}: {e}", cursor.display()))
        })?;
        if meta.kind != EntryKind::Directory {
            return Err(ShellError::Startup(format!("not a directory: {}", cursor.display())));
        }
        info!(cursor = %cursor.display(), "session started");
        Ok(Self { ctx, config, cursor })
    }

    /// Current directory.
    #[must_use]
    pub fn cursor(&self) -> &Path {
        &self.cursor
    }

    /// Resolves a user-supplied path against the cursor.
    ///
    /// `..` names the cursor's parent (the cursor itself at a root); an
    /// absolute path is taken as is. Trailing separators are dropped so that
    /// `link/` names the link itself rather than its target.
    #[must_use]
    pub fn resolve(&self, arg: &str) -> PathBuf {
        if arg == PARENT_DIR {
            self.cursor.parent().unwrap_or(&self.cursor).to_path_buf()
        } else {
            self.cursor.join(arg).components().collect()
        }
    }

    /// Parses and executes one input line.
    ///
    /// # Errors
    ///
    /// Returns the parse error or the error of the executed command.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let command = Command::parse(line)?;
        self.execute(&command)
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending path when the command fails
    /// outright. Recursive commands report per-entry failures in their
    /// output instead.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome> {
        debug!(?command, cursor = %self.cursor.display(), "dispatching");
        let fs = self.ctx.fs.as_ref();
        match command {
            Command::List { long } => {
                let nodes = tree::list(fs, &self.cursor, self.config.sort_listing);
                Ok(Outcome::lines(render::listing(&nodes, *long, &self.config.date_format)))
            }
            Command::ChangeDir(arg) => {
                self.change_dir(arg)?;
                Ok(Outcome::line(format!("current directory: {}", self.cursor.display())))
            }
            Command::MakeDir(name) => {
                let path = tree::make_dir(fs, &self.resolve(name))?;
                Ok(Outcome::line(format!("created directory: {}", path.display())))
            }
            Command::Remove(arg) => {
                let path = self.resolve(arg);
                tree::stat(fs, &path)?;
                let report = tree::remove_tree(fs, &path, self.config.max_depth);
                Ok(Outcome::lines(render::delete_report(&report)))
            }
            Command::Move { source, destination } => {
                let target =
                    tree::move_entry(fs, &self.resolve(source), &self.resolve(destination))?;
                Ok(Outcome::line(format!("moved to: {}", target.display())))
            }
            Command::Copy { source, destination } => {
                let target =
                    tree::copy_file(fs, &self.resolve(source), &self.resolve(destination))?;
                Ok(Outcome::line(format!("copied to: {}", target.display())))
            }
            Command::Info(arg) => {
                let node = tree::stat(fs, &self.resolve(arg))?;
                Ok(Outcome::line(render::long_entry(&node, &self.config.date_format)))
            }
            Command::Find(name) => {
                let report = tree::find(fs, &self.cursor, name, self.config.max_depth);
                Ok(Outcome::lines(render::search_report(&report, name)))
            }
            Command::Help => Ok(Outcome::lines(render::help())),
            Command::Exit => Ok(Outcome { lines: Vec::new(), flow: Flow::Exit }),
            Command::Empty => Ok(Outcome::quiet()),
        }
    }

    fn change_dir(&mut self, arg: &str) -> Result<()> {
        if arg == PARENT_DIR {
            if let Some(parent) = self.cursor.parent() {
                self.cursor = parent.to_path_buf();
            }
            return Ok(());
        }

        let requested = self.cursor.join(arg);
        let resolved = self
            .ctx
            .fs
            .canonicalize(&requested)
            .map_err(|e| ShellError::from_io(&requested, e))?;
        let meta = self
            .ctx
            .fs
            .symlink_metadata(&resolved)
            .map_err(|e| ShellError::from_io(&requested, e))?;
        if meta.kind != EntryKind::Directory {
            return Err(ShellError::NotADirectory { path: requested });
        }
        self.cursor = resolved;
        Ok(())
    }

    /// Runs the read-eval loop until `exit` or end of input.
    ///
    /// Command errors are printed and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Input that is not valid UTF-8 is decoded lossily, not rejected.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}> ", self.cursor.display())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out)?;
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            match self.execute_line(&line) {
                Ok(outcome) => {
                    for text in &outcome.lines {
                        writeln!(out, "{text}")?;
                    }
                    if outcome.flow == Flow::Exit {
                        break;
                    }
                }
                Err(err) => {
                    debug!(%err, "command failed");
                    writeln!(out, "error: {err}")?;
                }
            }
        }
        info!("session ended");
        Ok(())
    }
}
