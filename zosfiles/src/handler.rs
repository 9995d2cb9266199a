//! The request handler trait: the seam between request building and transport.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde_json::Value;

use zosfiles_shared::ZosFilesResult;

use crate::request::RequestDescriptor;

/// Live response body. Dropping it releases the underlying connection.
pub type ByteStream = Pin<Box<dyn Stream<Item = ZosFilesResult<Bytes>> + Send>>;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No content (typical for 204).
    Empty,
    Json(Value),
    Text(String),
    /// Raw bytes, returned when the request asked for `application/octet-stream`.
    Bytes(Bytes),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Body as bytes, whatever form it was decoded into.
    pub fn into_bytes(self) -> Bytes {
        match self {
            ResponseBody::Empty => Bytes::new(),
            ResponseBody::Json(value) => Bytes::from(value.to_string()),
            ResponseBody::Text(text) => Bytes::from(text),
            ResponseBody::Bytes(bytes) => bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

/// Executes request descriptors.
///
/// Implementations must fail with
/// [`UnexpectedStatus`](zosfiles_shared::ZosFilesError::UnexpectedStatus)
/// when the response status is not in `request.expected`, and may report a
/// 404 on a request with `uss_path` set as
/// [`RemoteResourceNotFound`](zosfiles_shared::ZosFilesError::RemoteResourceNotFound).
///
/// The REST implementation is [`RestClient`](crate::rest::RestClient);
/// tests substitute their own.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Send the request and decode the full response body.
    async fn perform_request(&self, request: RequestDescriptor) -> ZosFilesResult<ResponseBody>;

    /// Send the request and hand back the unconsumed body.
    async fn perform_streamed_request(
        &self,
        request: RequestDescriptor,
    ) -> ZosFilesResult<ByteStream>;
}
