//! Fixed user-facing strings.
//!
//! Anything shown to the user that does not come verbatim from the backend
//! lives here, keyed by [`Message`] and rendered for the configured
//! [`Locale`].

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Loading,
    LoginFailed,
    SignUpFailed,
    LoginRequired,
    VoteFailed,
    CommentFailed,
    DeleteFailed,
    PerformancesLoadFailed,
    PerformanceLoadFailed,
    PerformanceNotFound,
    PostsLoadFailed,
    PostLoadFailed,
    PostNotFound,
    CommentsLoadFailed,
    RequiredField,
    AnyOption,
    Spoiler,
    SpoilerFree,
    SpoilersOnly,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ko => self.ko(),
            Locale::En => self.en(),
        }
    }

    fn ko(self) -> &'static str {
        match self {
            Message::Loading => "로딩 중...",
            Message::LoginFailed => "로그인에 실패했습니다. 다시 시도해주세요.",
            Message::SignUpFailed => "회원가입에 실패했습니다. 다시 시도해주세요.",
            Message::LoginRequired => "로그인이 필요합니다.",
            Message::VoteFailed => "투표에 실패했습니다.",
            Message::CommentFailed => "댓글 작성에 실패했습니다.",
            Message::DeleteFailed => "게시글 삭제에 실패했습니다.",
            Message::PerformancesLoadFailed => "공연 목록을 불러오는데 실패했습니다.",
            Message::PerformanceLoadFailed => "공연 정보를 불러오는데 실패했습니다.",
            Message::PerformanceNotFound => "공연을 찾을 수 없습니다.",
            Message::PostsLoadFailed => "게시글 목록을 불러오는데 실패했습니다.",
            Message::PostLoadFailed => "게시글을 불러오는데 실패했습니다.",
            Message::PostNotFound => "게시글을 찾을 수 없습니다.",
            Message::CommentsLoadFailed => "댓글을 불러오는데 실패했습니다.",
            Message::RequiredField => "필수 항목을 입력해주세요.",
            Message::AnyOption => "전체",
            Message::Spoiler => "스포일러",
            Message::SpoilerFree => "스포일러 없음",
            Message::SpoilersOnly => "스포일러 있음",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Message::Loading => "Loading...",
            Message::LoginFailed => "Login failed. Please try again.",
            Message::SignUpFailed => "Sign up failed. Please try again.",
            Message::LoginRequired => "You need to log in first.",
            Message::VoteFailed => "Voting failed.",
            Message::CommentFailed => "Could not post your comment.",
            Message::DeleteFailed => "Could not delete the post.",
            Message::PerformancesLoadFailed => "Could not load performances.",
            Message::PerformanceLoadFailed => "Could not load the performance.",
            Message::PerformanceNotFound => "Performance not found.",
            Message::PostsLoadFailed => "Could not load posts.",
            Message::PostLoadFailed => "Could not load the post.",
            Message::PostNotFound => "Post not found.",
            Message::CommentsLoadFailed => "Could not load comments.",
            Message::RequiredField => "Please fill in all required fields.",
            Message::AnyOption => "All",
            Message::Spoiler => "Spoiler",
            Message::SpoilerFree => "No spoilers",
            Message::SpoilersOnly => "Spoilers",
        }
    }
}
