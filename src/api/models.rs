//! Wire records exchanged with the backend.
//!
//! Records are passed through to the views as received; nothing here
//! validates or reconciles them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::messages::Locale;

/// Paginated list envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => &self.username,
        }
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PerformanceStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
    Other(String),
}

impl PerformanceStatus {
    /// One of the listed statuses, case-insensitively; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match Self::from(raw.trim().to_string()) {
            PerformanceStatus::Other(_) => None,
            status => Some(status),
        }
    }

    pub const ALL: [PerformanceStatus; 4] = [
        PerformanceStatus::Upcoming,
        PerformanceStatus::Ongoing,
        PerformanceStatus::Completed,
        PerformanceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PerformanceStatus::Upcoming => "UPCOMING",
            PerformanceStatus::Ongoing => "ONGOING",
            PerformanceStatus::Completed => "COMPLETED",
            PerformanceStatus::Cancelled => "CANCELLED",
            PerformanceStatus::Other(raw) => raw,
        }
    }

    pub fn label(&self, locale: Locale) -> &str {
        match (self, locale) {
            (PerformanceStatus::Upcoming, Locale::Ko) => "예정",
            (PerformanceStatus::Ongoing, Locale::Ko) => "진행중",
            (PerformanceStatus::Completed, Locale::Ko) => "종료",
            (PerformanceStatus::Cancelled, Locale::Ko) => "취소",
            (PerformanceStatus::Upcoming, Locale::En) => "Upcoming",
            (PerformanceStatus::Ongoing, Locale::En) => "On stage",
            (PerformanceStatus::Completed, Locale::En) => "Closed",
            (PerformanceStatus::Cancelled, Locale::En) => "Cancelled",
            (PerformanceStatus::Other(raw), _) => raw,
        }
    }

    /// Chip colour class.
    pub fn tone(&self) -> &'static str {
        match self {
            PerformanceStatus::Upcoming => "primary",
            PerformanceStatus::Ongoing => "success",
            PerformanceStatus::Cancelled => "error",
            PerformanceStatus::Completed | PerformanceStatus::Other(_) => "default",
        }
    }
}

impl From<String> for PerformanceStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "UPCOMING" => PerformanceStatus::Upcoming,
            "ONGOING" => PerformanceStatus::Ongoing,
            "COMPLETED" => PerformanceStatus::Completed,
            "CANCELLED" => PerformanceStatus::Cancelled,
            _ => PerformanceStatus::Other(raw),
        }
    }
}

impl From<PerformanceStatus> for String {
    fn from(status: PerformanceStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostType {
    Review,
    Discussion,
    Question,
    News,
    General,
    Other(String),
}

impl PostType {
    pub fn parse(raw: &str) -> Option<Self> {
        match Self::from(raw.trim().to_string()) {
            PostType::Other(_) => None,
            post_type => Some(post_type),
        }
    }

    pub const ALL: [PostType; 5] = [
        PostType::Review,
        PostType::Discussion,
        PostType::Question,
        PostType::News,
        PostType::General,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PostType::Review => "REVIEW",
            PostType::Discussion => "DISCUSSION",
            PostType::Question => "QUESTION",
            PostType::News => "NEWS",
            PostType::General => "GENERAL",
            PostType::Other(raw) => raw,
        }
    }

    pub fn label(&self, locale: Locale) -> &str {
        match (self, locale) {
            (PostType::Review, Locale::Ko) => "후기",
            (PostType::Discussion, Locale::Ko) => "토론",
            (PostType::Question, Locale::Ko) => "질문",
            (PostType::News, Locale::Ko) => "소식",
            (PostType::General, Locale::Ko) => "일반",
            (PostType::Review, Locale::En) => "Review",
            (PostType::Discussion, Locale::En) => "Discussion",
            (PostType::Question, Locale::En) => "Question",
            (PostType::News, Locale::En) => "News",
            (PostType::General, Locale::En) => "General",
            (PostType::Other(raw), _) => raw,
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            PostType::Review => "primary",
            PostType::Discussion => "secondary",
            PostType::Question => "warning",
            PostType::News => "info",
            PostType::General | PostType::Other(_) => "default",
        }
    }
}

impl From<String> for PostType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "REVIEW" => PostType::Review,
            "DISCUSSION" => PostType::Discussion,
            "QUESTION" => PostType::Question,
            "NEWS" => PostType::News,
            "GENERAL" => PostType::General,
            _ => PostType::Other(raw),
        }
    }
}

impl From<PostType> for String {
    fn from(post_type: PostType) -> Self {
        post_type.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteType {
    Like,
    Dislike,
    Agree,
    Disagree,
}

impl VoteType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "LIKE" => Some(VoteType::Like),
            "DISLIKE" => Some(VoteType::Dislike),
            "AGREE" => Some(VoteType::Agree),
            "DISAGREE" => Some(VoteType::Disagree),
            _ => None,
        }
    }
}

/// Full record on the detail endpoint; list endpoints omit `description`
/// and `runningTime`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_image: Option<String>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub running_time: Option<u32>,
    pub status: PerformanceStatus,
}

impl Performance {
    pub fn schedule(&self) -> String {
        let fmt = |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_default();
        format!("{} ~ {}", fmt(self.start_date), fmt(self.end_date))
    }

    pub fn poster_or_default(&self) -> &str {
        match self.poster_image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => "/assets/default-poster.svg",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub post_type: PostType,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub dislike_count: u32,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    pub user: User,
    #[serde(default)]
    pub performance: Option<Performance>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub depth: u32,
    pub user: User,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub replies: Option<Vec<Comment>>,
}

impl Comment {
    pub fn replies(&self) -> &[Comment] {
        self.replies.as_deref().unwrap_or_default()
    }
}

pub fn format_timestamp(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub is_spoiler: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub post_id: i64,
    pub vote_type: VoteType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: i64,
    pub vote_type: VoteType,
    #[serde(default)]
    pub post_id: Option<i64>,
}

/// Error body shape; only `message` is ever shown to the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}
