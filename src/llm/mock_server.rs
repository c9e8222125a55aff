//! Local HTTP stand-in for completion providers, used by client tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct MockProvider {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockProvider {
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Answer every request with `status` and `response_body` on an ephemeral local port.
pub async fn spawn(status: StatusCode, response_body: &'static str) -> MockProvider {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, raw: String| {
        let captured = Arc::clone(&captured);
        async move {
            let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
            captured
                .lock()
                .unwrap()
                .push(CapturedRequest { path: uri.path().to_string(), headers, body });
            (status, [(header::CONTENT_TYPE, "application/json")], response_body)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProvider { base_url: format!("http://{addr}"), requests }
}

/// Base URL of a port nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
