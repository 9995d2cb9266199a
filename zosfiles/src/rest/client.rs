//! `RestClient`: a RequestHandler on top of reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tokio_util::io::ReaderStream;

use zosfiles_shared::constants::headers;
use zosfiles_shared::{ZosFilesError, ZosFilesResult};

use super::error::{map_http_status, map_transport};
use super::options::ZosmfConnection;
use crate::handler::{ByteStream, RequestHandler, ResponseBody};
use crate::request::{HttpMethod, RequestBody, RequestDescriptor};

/// reqwest-backed request handler.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    user: Option<String>,
    password: Option<String>,
}

impl RestClient {
    pub fn new(config: &ZosmfConnection) -> ZosFilesResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder().build().map_err(map_transport)?;
        Ok(Self {
            http,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// Send the request and check its status against `request.expected`.
    async fn send(&self, request: &RequestDescriptor) -> ZosFilesResult<reqwest::Response> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, &request.url)
            .headers(header_map(request)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(user) = &self.user {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(value)?),
            RequestBody::Bytes(bytes) => builder.body(bytes.clone()),
            RequestBody::File(path) => {
                let file = tokio::fs::File::open(path).await?;
                builder.body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            }
        };

        tracing::debug!(method = %request.method, url = %request.url, "Sending z/OSMF request");

        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status();
        if request.expects(status.as_u16()) {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            "z/OSMF request failed"
        );
        Err(map_http_status(status, request, &text))
    }
}

#[async_trait]
impl RequestHandler for RestClient {
    async fn perform_request(&self, request: RequestDescriptor) -> ZosFilesResult<ResponseBody> {
        let response = self.send(&request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await.map_err(map_transport)?;
        Ok(decode_body(
            request.header(headers::ACCEPT),
            &content_type,
            bytes,
        ))
    }

    async fn perform_streamed_request(
        &self,
        request: RequestDescriptor,
    ) -> ZosFilesResult<ByteStream> {
        let response = self.send(&request).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_transport))
            .boxed())
    }
}

/// One entry per header name; a later value replaces an earlier one.
fn header_map(request: &RequestDescriptor) -> ZosFilesResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ZosFilesError::Config(format!("invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ZosFilesError::Config(format!("invalid value for header '{name}': {e}"))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Pick a body representation from the negotiated content types.
///
/// An explicit octet-stream `Accept` wins over whatever the server labels
/// the response; JSON that fails to parse falls back to text.
pub(crate) fn decode_body(accept: Option<&str>, content_type: &str, bytes: Bytes) -> ResponseBody {
    if bytes.is_empty() {
        return ResponseBody::Empty;
    }
    if accept == Some(headers::OCTET_STREAM) {
        return ResponseBody::Bytes(bytes);
    }
    if content_type.starts_with(headers::JSON)
        && let Ok(value) = serde_json::from_slice(&bytes)
    {
        return ResponseBody::Json(value);
    }
    ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned())
}
