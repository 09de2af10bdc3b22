//! Live adapters for real external interactions.

pub mod filesystem;

pub use filesystem::LiveFileSystem;
