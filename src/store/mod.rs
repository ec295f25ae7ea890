//! On-disk storage for remote responses.

pub mod disk;

pub use disk::DiskCache;

/// Cache namespace used by the application.
pub const NAMESPACE: &str = "kurse";
