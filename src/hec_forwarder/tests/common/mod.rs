use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use hec_forwarder::constants::MAX_ATTEMPTS;
use hec_forwarder::exporters::hec_forward::{HecForward, HecForwardConfig};

pub const TEST_TOKEN: &str = "11111111-2222-3333-4444-555555555555";
pub const SUCCESS_BODY: &str = r#"{"text":"Success","code":0}"#;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct CollectorState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    script: Arc<Mutex<VecDeque<(u16, String)>>>,
    fallback: (u16, String),
}

/// In-process stand-in for an HTTP Event Collector.
///
/// Answers with the scripted responses in order, then repeats the last one.
pub struct FakeCollector {
    addr: SocketAddr,
    state: CollectorState,
    handle: JoinHandle<()>,
}

impl FakeCollector {
    pub async fn start(script: &[(u16, &str)]) -> Self {
        let script: VecDeque<(u16, String)> = script
            .iter()
            .map(|(status, body)| (*status, body.to_string()))
            .collect();
        let fallback = script
            .back()
            .cloned()
            .unwrap_or((200, SUCCESS_BODY.to_string()));

        let state = CollectorState {
            requests: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(script)),
            fallback,
        };

        let app = Router::new().fallback(collect).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap(); // 0: port picked by the OS
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn forwarder(&self) -> HecForward {
        forwarder_for(&self.url())
    }
}

impl Drop for FakeCollector {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn forwarder_for(url: &str) -> HecForward {
    HecForward::new(HecForwardConfig {
        url: url.to_string(),
        token: TEST_TOKEN.to_string(),
        max_attempts: MAX_ATTEMPTS,
        retry_delay: Duration::ZERO,
    })
}

async fn collect(
    State(state): State<CollectorState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let (status, body) = state
        .script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| state.fallback.clone());

    (StatusCode::from_u16(status).unwrap(), body)
}
