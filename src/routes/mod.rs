pub mod assets;
pub mod auth;
pub mod home;
pub mod performances;
pub mod posts;

use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::session::SessionStore;
use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// Session-dependent part of every page's header.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    pub authenticated: bool,
    pub username: String,
}

impl NavBar {
    pub fn from_session(session: &SessionStore) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            username: session.username().unwrap_or_default(),
        }
    }
}

/// Chip label plus colour class, precomputed for templates.
#[derive(Debug, Clone)]
pub struct Chip {
    pub label: String,
    pub tone: &'static str,
}

/// One `<option>` of a filter select.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/assets/{*path}", get(assets::serve))
        .merge(home::router())
        .merge(auth::router())
        .merge(performances::router())
        .merge(posts::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
