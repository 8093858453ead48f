use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::models::{format_timestamp, Comment, Post, PostType, VoteType};
use crate::error::{AppError, AppResult};
use crate::messages::{Locale, Message};
use crate::pages::pagination::Pagination;
use crate::pages::post_detail::PostDetailView;
use crate::pages::post_list::PostFilters;
use crate::pages::Outcome;
use crate::routes::{Chip, FilterOption, Html, NavBar};
use crate::state::AppState;

// --- View structs ---

pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub kind: Chip,
    pub spoiler: bool,
    pub author: String,
    pub created_at: String,
    pub view_count: u32,
    pub like_count: u32,
    pub comment_count: u32,
}

impl PostCard {
    fn new(post: &Post, locale: Locale) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: excerpt(&post.content, 120),
            kind: type_chip(&post.post_type, locale),
            spoiler: post.is_spoiler,
            author: post.user.display_name().to_string(),
            created_at: format_timestamp(post.created_at),
            view_count: post.view_count,
            like_count: post.like_count,
            comment_count: post.comment_count,
        }
    }
}

pub struct PostBody {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub kind: Chip,
    pub spoiler: bool,
    pub performance_title: String,
    pub author: String,
    pub author_initial: String,
    pub created_at: String,
    pub like_count: u32,
    pub dislike_count: u32,
    pub liked: bool,
    pub disliked: bool,
    pub can_delete: bool,
}

pub struct CommentRow {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub author_initial: String,
    pub created_at: String,
    pub spoiler: bool,
    pub replies: Vec<CommentRow>,
}

impl CommentRow {
    /// Replies are rendered one level deep.
    fn new(comment: &Comment, nested: bool) -> Self {
        let replies = if nested {
            Vec::new()
        } else {
            comment
                .replies()
                .iter()
                .map(|reply| CommentRow::new(reply, true))
                .collect()
        };
        Self {
            id: comment.id,
            content: comment.content.clone(),
            author: comment.user.display_name().to_string(),
            author_initial: comment.user.initial(),
            created_at: format_timestamp(comment.created_at),
            spoiler: comment.is_spoiler,
            replies,
        }
    }
}

fn type_chip(post_type: &PostType, locale: Locale) -> Chip {
    Chip {
        label: post_type.label(locale).to_string(),
        tone: post_type.tone(),
    }
}

fn excerpt(content: &str, limit: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

// --- Templates ---

#[derive(Template)]
#[template(path = "pages/post_list.html")]
pub struct PostListTemplate {
    pub nav: NavBar,
    pub keyword: String,
    pub performance_id: String,
    pub types: Vec<FilterOption>,
    pub spoilers: Vec<FilterOption>,
    pub cards: Vec<PostCard>,
    pub spoiler_text: &'static str,
    pub loading: bool,
    pub loading_text: &'static str,
    pub error: Option<String>,
    pub pagination: Pagination,
}

#[derive(Template)]
#[template(path = "pages/post_detail.html")]
pub struct PostDetailTemplate {
    pub nav: NavBar,
    pub loading: bool,
    pub loading_text: &'static str,
    pub error: Option<String>,
    pub not_found: bool,
    pub not_found_text: &'static str,
    pub spoiler_text: &'static str,
    pub post: Option<PostBody>,
    pub comments: Vec<CommentRow>,
    pub comment_total: usize,
    pub compose: String,
    pub reply_id: String,
    pub reply_author: Option<String>,
}

impl PostDetailTemplate {
    fn new(state: &AppState, view: PostDetailView) -> Self {
        let locale = state.config.ui.locale;
        let nav = NavBar::from_session(&state.session);
        let can_delete = view.is_author(state.session.username().as_deref());

        let post = view.post.as_ref().map(|post| PostBody {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            kind: type_chip(&post.post_type, locale),
            spoiler: post.is_spoiler,
            performance_title: post
                .performance
                .as_ref()
                .map(|p| p.title.clone())
                .unwrap_or_default(),
            author: post.user.display_name().to_string(),
            author_initial: post.user.initial(),
            created_at: format_timestamp(post.created_at),
            like_count: post.like_count,
            dislike_count: post.dislike_count,
            liked: view.user_vote == Some(VoteType::Like),
            disliked: view.user_vote == Some(VoteType::Dislike),
            can_delete,
        });
        let comments: Vec<CommentRow> = view
            .comments
            .iter()
            .map(|comment| CommentRow::new(comment, false))
            .collect();

        Self {
            nav,
            loading: view.loading,
            loading_text: Message::Loading.text(locale),
            not_found: view.not_found(),
            not_found_text: Message::PostNotFound.text(locale),
            spoiler_text: Message::Spoiler.text(locale),
            error: view.error,
            post,
            comment_total: comments.len(),
            comments,
            compose: view.compose,
            reply_id: view
                .reply_to
                .as_ref()
                .map(|target| target.id.to_string())
                .unwrap_or_default(),
            reply_author: view.reply_to.map(|target| target.author),
        }
    }
}

// --- Queries & forms ---

#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub spoiler: Option<String>,
    #[serde(rename = "performanceId")]
    pub performance_id: Option<String>,
    pub page: Option<u32>,
}

impl PostQuery {
    /// Values outside the listed options, including "ALL", mean no filter.
    pub fn filters(&self) -> PostFilters {
        PostFilters {
            keyword: self.keyword.trim().to_string(),
            post_type: self.post_type.as_deref().and_then(PostType::parse),
            spoiler: self.spoiler.as_deref().and_then(parse_spoiler),
            performance_id: self
                .performance_id
                .as_deref()
                .and_then(|s| s.trim().parse().ok()),
            page: self.page.unwrap_or(1),
        }
    }
}

fn parse_spoiler(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub reply_to: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub vote_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list))
        .route("/posts/{id}", get(detail))
        .route("/posts/{id}/vote", post(vote))
        .route("/posts/{id}/comments", post(create_comment))
        .route("/posts/{id}/delete", post(delete_post))
}

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}

// --- Handlers ---

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Html<PostListTemplate> {
    let locale = state.config.ui.locale;
    let view = state.pages.post_list.load(query.filters()).await;
    let filters = &view.filters;

    let mut types = vec![FilterOption {
        value: "ALL".to_string(),
        label: Message::AnyOption.text(locale).to_string(),
        selected: filters.post_type.is_none(),
    }];
    types.extend(PostType::ALL.iter().map(|post_type| FilterOption {
        value: post_type.as_str().to_string(),
        label: post_type.label(locale).to_string(),
        selected: filters.post_type.as_ref() == Some(post_type),
    }));

    let spoilers = [
        ("ALL", Message::AnyOption, None),
        ("false", Message::SpoilerFree, Some(false)),
        ("true", Message::SpoilersOnly, Some(true)),
    ]
    .into_iter()
    .map(|(value, label, spoiler)| FilterOption {
        value: value.to_string(),
        label: label.text(locale).to_string(),
        selected: filters.spoiler == spoiler,
    })
    .collect();

    let pagination = Pagination::new(filters.page, view.total_pages, |n| filters.href(n));
    let cards = view
        .posts
        .iter()
        .map(|post| PostCard::new(post, locale))
        .collect();

    Html(PostListTemplate {
        nav: NavBar::from_session(&state.session),
        keyword: filters.keyword.clone(),
        performance_id: filters
            .performance_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        types,
        spoilers,
        cards,
        spoiler_text: Message::Spoiler.text(locale),
        loading: view.loading,
        loading_text: Message::Loading.text(locale),
        error: view.error.clone(),
        pagination,
    })
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Html<PostDetailTemplate>> {
    let id = parse_id(&id)?;
    let page = &state.pages.post_detail;
    let mut view = page.load(id).await;

    match query.reply_to {
        Some(comment_id) => {
            page.reply_to(comment_id);
            if !view.select_reply(comment_id) {
                tracing::debug!("No comment {} on post {}", comment_id, id);
            }
        }
        None => {
            page.cancel_reply();
            view.reply_to = None;
        }
    }

    Ok(Html(PostDetailTemplate::new(&state, view)))
}

async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<VoteForm>,
) -> AppResult<Html<PostDetailTemplate>> {
    let id = parse_id(&id)?;
    let vote_type = VoteType::parse(&form.vote_type)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown vote type: {}", form.vote_type)))?;

    let page = &state.pages.post_detail;
    page.focus(id).await;
    let view = page.vote(vote_type).await;
    Ok(Html(PostDetailTemplate::new(&state, view)))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> AppResult<Html<PostDetailTemplate>> {
    let id = parse_id(&id)?;
    let page = &state.pages.post_detail;
    page.focus(id).await;

    match form.parent_id.trim().parse::<i64>() {
        Ok(parent_id) => {
            if !page.reply_to(parent_id) {
                tracing::debug!("Reply target {} is gone; posting top-level", parent_id);
            }
        }
        Err(_) => page.cancel_reply(),
    }

    let view = page.submit_comment(form.content).await;
    Ok(Html(PostDetailTemplate::new(&state, view)))
}

async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let page = &state.pages.post_detail;
    page.focus(id).await;

    Ok(match page.delete_post().await {
        Outcome::Navigate(to) => Redirect::to(&to).into_response(),
        Outcome::Render(view) => Html(PostDetailTemplate::new(&state, view)).into_response(),
    })
}
