//! Request descriptors: everything the transport needs to issue one call.

mod body;
mod builder;

pub use body::{ActionBody, DatasetRef, FileRef, HsmBody, MountBody, UssCreateBody};
pub use builder::RequestBuilder;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use serde_json::Value;

/// Status codes each operation class accepts as success.
pub mod expect {
    pub const READ: &[u16] = &[200];
    pub const CREATE: &[u16] = &[201];
    pub const USS_DELETE: &[u16] = &[204];
    pub const DATASET_DELETE: &[u16] = &[200, 202, 204];
    pub const WRITE: &[u16] = &[204, 201];
    pub const MOUNT: &[u16] = &[204];
    /// Migrate, recall, delete-migrated, rename, copy.
    pub const ACTION: &[u16] = &[200];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn header_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(Value),
    Bytes(Bytes),
    /// Local file streamed as the body; opened by the transport.
    File(PathBuf),
}

/// One fully-described HTTP request.
///
/// Built by [`RequestBuilder`], handed to a
/// [`RequestHandler`](crate::RequestHandler), and not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Header names are stored lowercase, so setting a header twice with
    /// different casing replaces it.
    pub headers: BTreeMap<String, String>,
    /// Query parameters, in order; only present values are included.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Status codes that count as success.
    pub expected: &'static [u16],
    /// USS path addressed by this request, if any. A 404 on such a request
    /// means the path does not exist.
    pub uss_path: Option<String>,
}

impl RequestDescriptor {
    pub(crate) fn new(method: HttpMethod, url: String, headers: BTreeMap<String, String>) -> Self {
        Self {
            method,
            url,
            headers,
            query: Vec::new(),
            body: RequestBody::None,
            expected: expect::READ,
            uss_path: None,
        }
    }

    pub(crate) fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(header_key(name), value.into());
        self
    }

    pub(crate) fn with_query(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub(crate) fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub(crate) fn with_expected(mut self, expected: &'static [u16]) -> Self {
        self.expected = expected;
        self
    }

    pub(crate) fn with_uss_path(mut self, path: &str) -> Self {
        self.uss_path = Some(path.to_string());
        self
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&header_key(name)).map(String::as_str)
    }

    /// JSON body, if the request carries one.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Query value by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn expects(&self, status: u16) -> bool {
        self.expected.contains(&status)
    }
}
