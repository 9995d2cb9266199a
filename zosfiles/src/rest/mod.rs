//! REST transport for zosfiles.
//!
//! Provides a reqwest-based `RequestHandler` that sends request descriptors
//! to a z/OSMF server and maps its responses.
//!
//! Enabled with the `rest` feature flag (on by default).

mod client;
pub(crate) mod error;
pub mod options;
mod types;

pub use client::RestClient;
pub use options::ZosmfConnection;
