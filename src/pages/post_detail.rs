use crate::api::models::{Comment, CreateCommentRequest, Post, VoteRequest, VoteType};
use crate::api::ApiClient;
use crate::messages::{Locale, Message};
use crate::pages::{Outcome, Sequencer, ViewCell};

/// Parent comment chosen for the next submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub id: i64,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct PostDetailView {
    pub post_id: Option<i64>,
    pub post: Option<Post>,
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub error: Option<String>,
    pub compose: String,
    pub reply_to: Option<ReplyTarget>,
    pub user_vote: Option<VoteType>,
}

impl Default for PostDetailView {
    fn default() -> Self {
        Self {
            post_id: None,
            post: None,
            comments: Vec::new(),
            loading: true,
            error: None,
            compose: String::new(),
            reply_to: None,
            user_vote: None,
        }
    }
}

impl PostDetailView {
    pub fn not_found(&self) -> bool {
        !self.loading && self.post.is_none()
    }

    /// Point the reply target at `comment_id`; false (and no target) when it
    /// is not among the loaded comments.
    pub fn select_reply(&mut self, comment_id: i64) -> bool {
        self.reply_to = find_comment(&self.comments, comment_id).map(|comment| ReplyTarget {
            id: comment.id,
            author: comment.user.display_name().to_string(),
        });
        self.reply_to.is_some()
    }

    pub fn is_author(&self, username: Option<&str>) -> bool {
        match (&self.post, username) {
            (Some(post), Some(username)) => post.user.username == username,
            _ => false,
        }
    }
}

/// Looks through top-level comments and their replies.
pub fn find_comment(comments: &[Comment], id: i64) -> Option<&Comment> {
    comments.iter().find_map(|comment| {
        if comment.id == id {
            Some(comment)
        } else {
            comment.replies().iter().find(|reply| reply.id == id)
        }
    })
}

pub struct PostDetail {
    api: ApiClient,
    locale: Locale,
    post_seq: Sequencer,
    comments_seq: Sequencer,
    cell: ViewCell<PostDetailView>,
}

impl PostDetail {
    pub fn new(api: ApiClient, locale: Locale) -> Self {
        Self {
            api,
            locale,
            post_seq: Sequencer::default(),
            comments_seq: Sequencer::default(),
            cell: ViewCell::new(PostDetailView::default()),
        }
    }

    pub fn view(&self) -> PostDetailView {
        self.cell.snapshot()
    }

    fn fail(&self, message: Message) -> PostDetailView {
        self.cell.update(|view| {
            view.error = Some(message.text(self.locale).to_string());
            view.clone()
        })
    }

    /// Fetch the post and its comments concurrently. Compose text, reply
    /// target and vote survive a reload of the same post.
    pub async fn load(&self, id: i64) -> PostDetailView {
        let (pending, comments_ticket) = self.cell.begin(&self.post_seq, |view| {
            if view.post_id != Some(id) {
                *view = PostDetailView {
                    post_id: Some(id),
                    ..PostDetailView::default()
                };
            }
            view.loading = true;
            view.error = None;
            self.comments_seq.issue()
        });

        let (post, comments) = tokio::join!(self.api.post_by_id(id), self.api.comments(id));

        self.cell.update(|view| {
            // A refresh can supersede one half; a newer load supersedes both.
            let post_current = self.post_seq.is_current(pending.ticket);
            let comments_current = self.comments_seq.is_current(comments_ticket);
            let superseded = !post_current && !comments_current;

            let mut own = pending.view;
            let target = if superseded {
                tracing::debug!("Superseded load of post {} kept out of shared state", id);
                &mut own
            } else {
                view
            };
            target.loading = false;

            if superseded || post_current {
                match post {
                    Ok(post) => target.post = Some(post),
                    Err(e) => {
                        tracing::warn!("Loading post {} failed: {}", id, e);
                        target.post = None;
                        target.error = Some(e.user_message(Message::PostLoadFailed, self.locale));
                    }
                }
            }
            if superseded || comments_current {
                match comments {
                    Ok(comments) => target.comments = comments,
                    Err(e) => {
                        tracing::warn!("Loading comments for post {} failed: {}", id, e);
                        target.comments.clear();
                        if target.error.is_none() {
                            target.error =
                                Some(e.user_message(Message::CommentsLoadFailed, self.locale));
                        }
                    }
                }
            }
            target.clone()
        })
    }

    /// Load `id` unless it is already the post on display.
    pub async fn focus(&self, id: i64) -> PostDetailView {
        let view = self.view();
        if view.post_id == Some(id) && view.post.is_some() {
            return view;
        }
        self.load(id).await
    }

    pub async fn refresh_post(&self) -> PostDetailView {
        let (pending, id) = self.cell.begin(&self.post_seq, |view| view.post_id);
        let Some(id) = id else {
            return self.view();
        };

        let result = self.api.post_by_id(id).await;

        self.cell.finish(&self.post_seq, pending, |view| match result {
            Ok(post) => view.post = Some(post),
            Err(e) => {
                tracing::warn!("Refreshing post {} failed: {}", id, e);
                view.error = Some(e.user_message(Message::PostLoadFailed, self.locale));
            }
        })
    }

    pub async fn refresh_comments(&self) -> PostDetailView {
        let (pending, id) = self.cell.begin(&self.comments_seq, |view| view.post_id);
        let Some(id) = id else {
            return self.view();
        };

        let result = self.api.comments(id).await;

        self.cell.finish(&self.comments_seq, pending, |view| match result {
            Ok(comments) => view.comments = comments,
            Err(e) => {
                tracing::warn!("Refreshing comments for post {} failed: {}", id, e);
                view.comments.clear();
                view.error = Some(e.user_message(Message::CommentsLoadFailed, self.locale));
            }
        })
    }

    /// Anonymous votes never reach the backend.
    pub async fn vote(&self, vote_type: VoteType) -> PostDetailView {
        let Some(post_id) = self.cell.update(|view| view.post_id) else {
            return self.view();
        };
        if !self.api.session().is_authenticated() {
            return self.fail(Message::LoginRequired);
        }

        let request = VoteRequest { post_id, vote_type };
        match self.api.vote(&request).await {
            Ok(vote) => {
                self.cell.update(|view| {
                    if view.post_id == Some(post_id) {
                        view.user_vote = vote.map(|v| v.vote_type);
                        view.error = None;
                    }
                });
                self.refresh_post().await
            }
            Err(e) => {
                tracing::warn!("Vote on post {} failed: {}", post_id, e);
                self.cell.update(|view| {
                    view.error = Some(e.user_message(Message::VoteFailed, self.locale));
                    view.clone()
                })
            }
        }
    }

    /// Returns false when `comment_id` is not among the loaded comments.
    pub fn reply_to(&self, comment_id: i64) -> bool {
        self.cell.update(|view| view.select_reply(comment_id))
    }

    pub fn cancel_reply(&self) {
        self.cell.update(|view| view.reply_to = None);
    }

    pub async fn submit_comment(&self, content: String) -> PostDetailView {
        let (post_id, parent_id) = self.cell.update(|view| {
            view.compose = content.clone();
            (view.post_id, view.reply_to.as_ref().map(|target| target.id))
        });
        let Some(post_id) = post_id else {
            return self.view();
        };
        if !self.api.session().is_authenticated() {
            return self.fail(Message::LoginRequired);
        }
        if content.trim().is_empty() {
            return self.fail(Message::RequiredField);
        }

        let request = CreateCommentRequest {
            content,
            post_id,
            parent_id,
            is_spoiler: false,
        };
        match self.api.create_comment(&request).await {
            Ok(comment) => {
                tracing::debug!("Created comment {} on post {}", comment.id, post_id);
                self.cell.update(|view| {
                    view.compose.clear();
                    view.reply_to = None;
                    view.error = None;
                });
                self.refresh_comments().await
            }
            Err(e) => {
                tracing::warn!("Comment on post {} failed: {}", post_id, e);
                self.cell.update(|view| {
                    view.error = Some(e.user_message(Message::CommentFailed, self.locale));
                    view.clone()
                })
            }
        }
    }

    /// Only the author may delete; the backend checks the same `userId`.
    pub async fn delete_post(&self) -> Outcome<PostDetailView> {
        let Some(post) = self.cell.update(|view| view.post.clone()) else {
            return Outcome::Render(self.view());
        };
        let session = self.api.session();
        if !session.is_authenticated() {
            return Outcome::Render(self.fail(Message::LoginRequired));
        }
        if session.username().as_deref() != Some(post.user.username.as_str()) {
            tracing::warn!("Refusing to delete post {} for a non-author", post.id);
            return Outcome::Render(self.fail(Message::DeleteFailed));
        }

        match self.api.delete_post(post.id, post.user.id).await {
            Ok(()) => {
                tracing::info!("Deleted post {}", post.id);
                self.cell.update(|view| *view = PostDetailView::default());
                Outcome::Navigate("/posts".to_string())
            }
            Err(e) => {
                tracing::warn!("Deleting post {} failed: {}", post.id, e);
                Outcome::Render(self.cell.update(|view| {
                    view.error = Some(e.user_message(Message::DeleteFailed, self.locale));
                    view.clone()
                }))
            }
        }
    }
}
