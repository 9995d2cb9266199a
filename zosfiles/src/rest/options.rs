//! Configuration for connecting to a z/OSMF server.

use zosfiles_shared::constants::envs;
use zosfiles_shared::{ZosFilesError, ZosFilesResult};

/// Configuration for connecting to a z/OSMF REST files server.
///
/// # Examples
///
/// ```rust,no_run
/// use zosfiles::ZosmfConnection;
///
/// // Minimal: just a URL
/// let conn = ZosmfConnection::new("https://zosmf.example.com:443");
///
/// // With basic credentials
/// let conn = ZosmfConnection::new("https://zosmf.example.com:443")
///     .with_credentials("IBMUSER".into(), "secret".into());
///
/// // From environment variables
/// let conn = ZosmfConnection::from_env().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct ZosmfConnection {
    /// z/OSMF base URL (scheme, host, port).
    pub url: String,

    pub user: Option<String>,

    pub password: Option<String>,

    /// Headers added to every request on top of the REST files defaults.
    pub headers: Vec<(String, String)>,
}

impl ZosmfConnection {
    /// Create config with just a URL. No credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            headers: Vec::new(),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `ZOSFILES_URL` (required)
    /// - `ZOSFILES_USER` (optional)
    /// - `ZOSFILES_PASSWORD` (optional)
    pub fn from_env() -> ZosFilesResult<Self> {
        let url = std::env::var(envs::ZOSFILES_URL)
            .map_err(|_| ZosFilesError::Config(format!("{} not set", envs::ZOSFILES_URL)))?;
        Ok(Self {
            url,
            user: std::env::var(envs::ZOSFILES_USER).ok(),
            password: std::env::var(envs::ZOSFILES_PASSWORD).ok(),
            headers: Vec::new(),
        })
    }

    /// Builder-style: add basic-auth credentials.
    pub fn with_credentials(mut self, user: String, password: String) -> Self {
        self.user = Some(user);
        self.password = Some(password);
        self
    }

    /// Builder-style: add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Reject configurations the transport cannot use.
    pub(crate) fn validate(&self) -> ZosFilesResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ZosFilesError::Config(format!(
                "z/OSMF URL must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        if self.password.is_some() && self.user.is_none() {
            return Err(ZosFilesError::Config(
                "password given without a user".to_string(),
            ));
        }
        Ok(())
    }
}
