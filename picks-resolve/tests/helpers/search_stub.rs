//! In-memory search API counting its network calls

use async_trait::async_trait;
use picks_resolve::services::SearchApi;
use picks_resolve::{ResolveError, ResolveResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::responses::search_response;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

/// Search API double
///
/// Unknown queries answer with an empty result list. Clones share the
/// call counter, so a test can keep one handle after moving the stub
/// into a gateway.
#[derive(Clone, Default)]
pub struct StubSearchApi {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    calls: Arc<AtomicUsize>,
}

impl StubSearchApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `body`
    pub fn with_body(self, query: &str, body: String) -> Self {
        self.replies.lock().unwrap().insert(query.to_string(), Reply::Body(body));
        self
    }

    /// Answer `query` with a non-success HTTP status
    pub fn with_status(self, query: &str, status: u16) -> Self {
        self.replies.lock().unwrap().insert(query.to_string(), Reply::Status(status));
        self
    }

    /// Number of searches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchApi for StubSearchApi {
    async fn search(&self, query: &str) -> ResolveResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = self.replies.lock().unwrap().get(query).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(ResolveError::Gateway {
                query: query.to_string(),
                status,
                body: "stubbed failure".to_string(),
            }),
            None => Ok(search_response(&[])),
        }
    }
}
