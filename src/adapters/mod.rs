//! Adapter implementations of the port traits.

pub mod faulty;
pub mod live;
