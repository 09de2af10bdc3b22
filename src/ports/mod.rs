//! Port traits defining external boundaries.
//!
//! The only boundary the shell crosses is the filesystem. Implementations
//! live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{EntryKind, EntryMeta, FileSystem};
