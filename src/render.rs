//! Human-readable rendering of command results.

use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::ports::EntryKind;
use crate::tree::{DeleteReport, FileNode, SearchReport};

/// One row per command of the grammar.
pub const HELP: &[(&str, &str)] = &[
    ("ls", "list entries in the current directory"),
    ("ls -l", "list entries with size and modification time"),
    ("cd <path|..>", "change the current directory"),
    ("mkdir <name>", "create a directory in the current directory"),
    ("rm <path>", "delete a file, or a directory and everything in it"),
    ("mv <source> <dest-dir>", "move an entry into a directory, overwriting"),
    ("cp <source> <dest-dir>", "copy a file into a directory, overwriting"),
    ("finfo <path>", "show size and modification time of one entry"),
    ("find <name>", "search the current directory tree for an exact name"),
    ("help", "show this summary"),
    ("exit", "leave the file manager"),
];

/// Formats a modification time with a `chrono` format string, in local time.
///
/// Falls back to RFC 3339 when `format` is not a valid format string.
#[must_use]
pub fn timestamp(time: Option<SystemTime>, format: &str) -> String {
    let Some(time) = time else {
        return "-".to_string();
    };
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// `<name> - <size> bytes - <date>`
#[must_use]
pub fn long_entry(node: &FileNode, date_format: &str) -> String {
    format!(
        "{} - {} bytes - {}",
        node.name,
        node.size,
        timestamp(node.modified, date_format)
    )
}

/// Lines for `ls` / `ls -l`.
#[must_use]
pub fn listing(nodes: &[FileNode], long: bool, date_format: &str) -> Vec<String> {
    nodes
        .iter()
        .map(|node| if long { long_entry(node, date_format) } else { node.name.clone() })
        .collect()
}

/// Lines for `rm`: removed entries first, then what remains.
#[must_use]
pub fn delete_report(report: &DeleteReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .removed
        .iter()
        .map(|entry| {
            let what = if entry.kind == EntryKind::Directory { "directory" } else { "file" };
            format!("removed {what}: {}", entry.path.display())
        })
        .collect();
    lines.extend(
        report.failures.iter().map(|failure| format!("failed: {}", failure.error)),
    );
    if !report.failures.is_empty() {
        lines.push(format!(
            "{} removed, {} left in place",
            report.removed.len(),
            report.failures.len()
        ));
    }
    lines
}

/// Lines for `find`.
#[must_use]
pub fn search_report(report: &SearchReport, name: &str) -> Vec<String> {
    let mut lines: Vec<String> =
        report.matches.iter().map(|path| format!("found: {}", path.display())).collect();
    lines.extend(report.empty_levels.iter().map(|dir| format!("no match in: {}", dir.display())));
    lines.extend(report.failures.iter().map(|failure| format!("skipped: {}", failure.error)));
    match report.matches.len() {
        0 => lines.push(format!("not found: {name}")),
        1 => lines.push("1 match".to_string()),
        n => lines.push(format!("{n} matches")),
    }
    lines
}

/// Lines for `help`.
#[must_use]
pub fn help() -> Vec<String> {
    let width = HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    let mut lines = vec!["Commands:".to_string()];
    lines.extend(HELP.iter().map(|(usage, about)| format!("  {usage:<width$}  {about}")));
    lines
}
