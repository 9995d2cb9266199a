//! Shared error types and protocol constants for zosfiles.

pub mod constants;
pub mod errors;

pub use errors::{ZosFilesError, ZosFilesResult};
