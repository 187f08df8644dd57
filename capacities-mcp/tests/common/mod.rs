//! Mock Capacities API shared by the integration tests

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the mock saw for one request
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path_and_query: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<Captured>>>,
}

/// Start a server answering every request with `status` and `body`.
///
/// Returns the base URL and the log of received requests. The server lives
/// until the test runtime shuts down.
pub async fn spawn_upstream(status: u16, body: &str) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = Upstream {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        seen: seen.clone(),
    };

    let app = Router::new().fallback(handle).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

async fn handle(
    State(state): State<Upstream>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.seen.lock().unwrap().push(Captured {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    });
    (state.status, state.body.clone())
}

/// Point the library at `base_url` and set the API key
pub fn configure_env(base_url: &str, api_key: Option<&str>) {
    std::env::set_var("CAPACITIES_API_BASE_URL", base_url);
    match api_key {
        Some(key) => std::env::set_var("CAPACITIES_API_KEY", key),
        None => std::env::remove_var("CAPACITIES_API_KEY"),
    }
}

/// Undo [`configure_env`]
pub fn clear_env() {
    std::env::remove_var("CAPACITIES_API_BASE_URL");
    std::env::remove_var("CAPACITIES_API_KEY");
}

pub fn arguments(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
