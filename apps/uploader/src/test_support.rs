//! Shared fixtures: a stub HTTP server and a scripted parse client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;

use crate::client::ParseClient;
use crate::errors::UploadError;
use crate::models::SelectedFile;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Clone)]
pub enum Reply {
    Body(Value),
    Server { status: u16, detail: String },
}

#[derive(Default)]
struct Recorded {
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, Vec<String>)>>,
}

/// Parse client that answers every call with the same scripted reply.
#[derive(Clone)]
pub struct MockParseClient {
    reply: Reply,
    recorded: Arc<Recorded>,
}

impl MockParseClient {
    pub fn replying(reply: Reply) -> Self {
        Self {
            reply,
            recorded: Arc::new(Recorded::default()),
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self::replying(Reply::Body(body))
    }

    pub fn calls(&self) -> usize {
        self.recorded.calls.load(Ordering::SeqCst)
    }

    /// File name and options of the most recent call.
    pub fn last_request(&self) -> Option<(String, Vec<String>)> {
        self.recorded.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParseClient for MockParseClient {
    async fn parse_resume(
        &self,
        file: &SelectedFile,
        options: &[String],
    ) -> Result<Value, UploadError> {
        self.recorded.calls.fetch_add(1, Ordering::SeqCst);
        *self.recorded.last_request.lock().unwrap() = Some((file.name.clone(), options.to_vec()));
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Server { status, detail } => Err(UploadError::Server {
                status: *status,
                message: detail.clone(),
            }),
        }
    }
}
