//! Client for the z/OSMF REST files API.
//!
//! Exposes USS file, dataset, and zFS operations as async methods on
//! [`Files`]. Each call validates its options, builds a
//! [`RequestDescriptor`], and hands it to a [`RequestHandler`].
//!
//! ```rust,no_run
//! use zosfiles::{Files, ZosmfConnection};
//! use zosfiles::options::DefaultDatasetProfile;
//!
//! # async fn run() -> zosfiles::ZosFilesResult<()> {
//! let conn = ZosmfConnection::from_env()?;
//! let files = Files::new(&conn)?;
//! files
//!     .create_default_data_set("IBMUSER.SOURCE", DefaultDatasetProfile::Partitioned)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod files;
pub mod handler;
pub mod options;
pub mod request;

#[cfg(feature = "rest")]
pub mod rest;

pub use files::Files;
pub use handler::{ByteStream, RequestHandler, ResponseBody};
pub use request::{HttpMethod, RequestBody, RequestBuilder, RequestDescriptor};
pub use zosfiles_shared::constants;
pub use zosfiles_shared::{ZosFilesError, ZosFilesResult};

#[cfg(feature = "rest")]
pub use rest::{RestClient, ZosmfConnection};
