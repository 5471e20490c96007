//! In-process backend double: an axum server that records every request and
//! answers from a fixed script.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use wasatext_client::{ApiClient, ClientConfig};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Scripted {
    method: Option<&'static str>,
    path: Option<&'static str>,
    status: u16,
    body: String,
}

/// Answer every request with `status` and `body`.
pub fn any(status: u16, body: &str) -> Scripted {
    Scripted {
        method: None,
        path: None,
        status,
        body: body.to_string(),
    }
}

pub fn route(method: &'static str, path: &'static str, status: u16, body: &str) -> Scripted {
    Scripted {
        method: Some(method),
        path: Some(path),
        status,
        body: body.to_string(),
    }
}

struct MockState {
    script: Vec<Scripted>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    /// Scripted entries are tried in order; unmatched requests get a 404.
    pub async fn start(script: Vec<Scripted>) -> Self {
        let state = Arc::new(MockState {
            script,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub async fn reply(status: u16, body: &str) -> Self {
        Self::start(vec![any(status, body)]).await
    }

    pub fn client(&self, token: &str) -> ApiClient {
        ApiClient::with_token(ClientConfig::new(&self.base_url).unwrap(), token).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handle(State(state): State<Arc<MockState>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers: parts.headers,
        body,
    });

    let hit = state.script.iter().find(|s| {
        s.method.is_none_or(|m| m == method) && s.path.is_none_or(|p| p == path)
    });

    let Some(scripted) = hit else {
        return (StatusCode::NOT_FOUND, "no route").into_response();
    };

    let status = StatusCode::from_u16(scripted.status).unwrap();
    if scripted.body.is_empty() {
        return status.into_response();
    }

    let content_type = if serde_json::from_str::<serde_json::Value>(&scripted.body).is_ok() {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };

    (status, [(header::CONTENT_TYPE, content_type)], scripted.body.clone()).into_response()
}

/// Base URL of a port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
