//! Shared helpers: an in-process stand-in for the REST backend and an app
//! state wired to it.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;

use backstage::api::ApiClient;
use backstage::config::Config;
use backstage::session::SessionStore;
use backstage::state::AppState;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self::status(StatusCode::OK, value)
    }

    pub fn status(status: StatusCode, value: Value) -> Self {
        Self {
            status,
            body: value.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

#[derive(Clone)]
struct Mock {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Responder,
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn start(responder: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mock = Mock {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(mock);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

async fn record(
    State(mock): State<Mock>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request = Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };
    mock.requests.lock().unwrap().push(request.clone());

    let reply = (mock.responder)(&request);
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

pub struct Harness {
    pub dir: TempDir,
    pub backend: MockBackend,
    pub state: AppState,
}

impl Harness {
    pub async fn start(responder: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let backend = MockBackend::start(responder).await;
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.api.base_url = backend.base_url.clone();
        config.api.timeout_secs = 5;
        config.session.path = Some(dir.path().join("session.json"));

        let session = Arc::new(SessionStore::open(config.session_path()).unwrap());
        let api = ApiClient::new(&config.api, session.clone()).unwrap();
        let state = AppState::new(config, session, api);

        Self {
            dir,
            backend,
            state,
        }
    }

    pub fn log_in(&self, username: &str) {
        self.state.session.set("test-token", username).unwrap();
    }
}

// --- Fixtures ---

pub fn user(id: i64, username: &str) -> Value {
    json!({ "id": id, "username": username, "nickname": null })
}

pub fn post(id: i64, title: &str, author: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "What did the last scene mean?",
        "postType": "DISCUSSION",
        "isSpoiler": false,
        "likeCount": 1,
        "dislikeCount": 0,
        "viewCount": 10,
        "commentCount": 0,
        "user": user(7, author),
        "createdAt": "2024-03-01T19:30:00"
    })
}

pub fn performance(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "genre": "Musical",
        "venue": "Arts Center",
        "startDate": "2024-05-01",
        "endDate": "2024-06-30",
        "status": "ONGOING",
        "posterImage": null
    })
}

pub fn comment(id: i64, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "isSpoiler": false,
        "depth": 0,
        "user": user(8, "lee"),
        "createdAt": "2024-03-02T10:00:00",
        "replies": []
    })
}

pub fn page(content: Vec<Value>, total_pages: u32) -> Value {
    json!({ "content": content, "totalPages": total_pages, "number": 0 })
}
