//! Service context bundling the port trait objects.

use crate::adapters::live::LiveFileSystem;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects a session works through.
///
/// Constructors wire up different adapter implementations (live, or a
/// caller-supplied one for tests).
pub struct ServiceContext {
    /// Filesystem for listing, inspecting and mutating entries.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the real filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem) }
    }

    /// Creates a context around an arbitrary filesystem adapter.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::live()
    }
}
