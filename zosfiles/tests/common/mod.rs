//! Shared fixtures for zosfiles integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use zosfiles::{
    ByteStream, Files, RequestBuilder, RequestDescriptor, RequestHandler, ResponseBody,
    ZosFilesError, ZosFilesResult,
};

pub const BASE_URL: &str = "https://zosmf.example.com:443";

static TRACING: Once = Once::new();

/// Route library logs to the test harness output (`RUST_LOG=debug`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// What the recording handler answers with.
pub enum Reply {
    Body(ResponseBody),
    Chunks(Vec<&'static [u8]>),
    /// Streams the chunks, then fails as if the connection dropped.
    BrokenStream(Vec<&'static [u8]>),
    Status { status: u16, message: String },
}

/// Records every descriptor it is given and answers with a canned reply.
pub struct RecordingHandler {
    requests: Mutex<Vec<RequestDescriptor>>,
    reply: Mutex<Reply>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Mutex::new(Reply::Body(ResponseBody::Empty)),
        }
    }

    pub fn reply_with(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestDescriptor {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    fn record(&self, request: &RequestDescriptor) -> ZosFilesResult<()> {
        self.requests.lock().unwrap().push(request.clone());
        match &*self.reply.lock().unwrap() {
            Reply::Status { status, message } => Err(ZosFilesError::UnexpectedStatus {
                status: *status,
                expected: request.expected.to_vec(),
                message: message.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RequestHandler for RecordingHandler {
    async fn perform_request(&self, request: RequestDescriptor) -> ZosFilesResult<ResponseBody> {
        self.record(&request)?;
        match &*self.reply.lock().unwrap() {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Chunks(chunks) => Ok(ResponseBody::Bytes(Bytes::from(chunks.concat()))),
            Reply::BrokenStream(_) => Err(ZosFilesError::Transport("connection reset".into())),
            Reply::Status { .. } => unreachable!("handled in record"),
        }
    }

    async fn perform_streamed_request(
        &self,
        request: RequestDescriptor,
    ) -> ZosFilesResult<ByteStream> {
        self.record(&request)?;
        let chunks: Vec<ZosFilesResult<Bytes>> = match &*self.reply.lock().unwrap() {
            Reply::Chunks(chunks) => chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(c)))
                .collect(),
            Reply::BrokenStream(chunks) => chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(c)))
                .chain([Err(ZosFilesError::Transport("connection reset".into()))])
                .collect(),
            Reply::Body(body) => vec![Ok(body.clone().into_bytes())],
            Reply::Status { .. } => unreachable!("handled in record"),
        };
        Ok(Box::pin(stream::iter(chunks)))
    }
}

/// Test context with a `Files` wired to a recording handler.
pub struct TestContext {
    pub files: Files,
    pub handler: Arc<RecordingHandler>,
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        let handler = Arc::new(RecordingHandler::new());
        let files = Files::with_handler(RequestBuilder::new(BASE_URL), handler.clone());
        Self { files, handler }
    }

    pub fn url(&self, resource: &str) -> String {
        format!("{BASE_URL}/zosmf/restfiles/{resource}")
    }

    /// Nothing reached the handler.
    pub fn assert_nothing_sent(&self) {
        assert!(
            self.handler.requests().is_empty(),
            "expected no request, got {:?}",
            self.handler.requests()
        );
    }
}
