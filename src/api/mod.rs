//! Client for the Backstage Stories REST backend.
//!
//! Every call is one-shot: no retry, no backoff, no cancellation. The bearer
//! token is read from the session store on each request and attached when
//! present; endpoints that need authentication are left to reject anonymous
//! calls server-side.

pub mod endpoints;
pub mod error;
pub mod models;

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::session::SessionStore;

pub use endpoints::Target;
pub use error::ApiError;
use models::{
    Comment, CreateCommentRequest, LoginRequest, LoginResponse, Page, Performance, Post,
    ServerMessage, SignUpRequest, User, VoteRequest, VoteResponse,
};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        url::Url::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, target: &Target) -> ApiResult<RequestBuilder> {
        let url = target.resolve(&self.base_url)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    pub async fn get<T: DeserializeOwned>(&self, target: &Target) -> ApiResult<T> {
        let response = self.request(Method::GET, target)?.send().await?;
        decode(read_body(response).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        target: &Target,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.request(Method::POST, target)?.json(body).send().await?;
        decode(read_body(response).await?)
    }

    /// POST whose success response may legitimately carry no body.
    pub async fn post_optional<B: Serialize, T: DeserializeOwned>(
        &self,
        target: &Target,
        body: &B,
    ) -> ApiResult<Option<T>> {
        let response = self.request(Method::POST, target)?.json(body).send().await?;
        let bytes = read_body(response).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(bytes).map(Some)
    }

    pub async fn delete(&self, target: &Target) -> ApiResult<()> {
        let response = self.request(Method::DELETE, target)?.send().await?;
        read_body(response).await?;
        Ok(())
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post(&endpoints::login(), request).await
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<User> {
        self.post(&endpoints::sign_up(), request).await
    }

    pub async fn performances(&self, target: &Target) -> ApiResult<Page<Performance>> {
        self.get(target).await
    }

    pub async fn performance(&self, id: i64) -> ApiResult<Performance> {
        self.get(&endpoints::performance(id)).await
    }

    pub async fn posts(&self, target: &Target) -> ApiResult<Page<Post>> {
        self.get(target).await
    }

    pub async fn post_by_id(&self, id: i64) -> ApiResult<Post> {
        self.get(&endpoints::post(id)).await
    }

    pub async fn delete_post(&self, id: i64, author_id: i64) -> ApiResult<()> {
        self.delete(&endpoints::delete_post(id, author_id)).await
    }

    pub async fn comments(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        self.get(&endpoints::comments_for_post(post_id)).await
    }

    pub async fn create_comment(&self, request: &CreateCommentRequest) -> ApiResult<Comment> {
        self.post(&endpoints::comments(), request).await
    }

    /// Returns `None` when the backend toggled an identical earlier vote off.
    pub async fn vote(&self, request: &VoteRequest) -> ApiResult<Option<VoteResponse>> {
        self.post_optional(&endpoints::votes(), request).await
    }
}

async fn read_body(response: Response) -> ApiResult<Bytes> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ServerMessage>(&bytes)
            .ok()
            .and_then(|body| body.message);
        tracing::warn!(
            "Backend returned {} ({})",
            status,
            message.as_deref().unwrap_or("no message")
        );
        return Err(ApiError::Status { status, message });
    }

    Ok(bytes)
}

fn decode<T: DeserializeOwned>(bytes: Bytes) -> ApiResult<T> {
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::warn!("Could not decode backend response: {}", e);
        ApiError::Decode(e)
    })
}
