use url::form_urlencoded;

use crate::api::models::{Post, PostType};
use crate::api::{ApiClient, Target};
use crate::messages::{Locale, Message};
use crate::pages::{Sequencer, ViewCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilters {
    pub keyword: String,
    /// `None` is the "ALL" option.
    pub post_type: Option<PostType>,
    /// `None` is the "ALL" option.
    pub spoiler: Option<bool>,
    pub performance_id: Option<i64>,
    /// One-based.
    pub page: u32,
}

impl Default for PostFilters {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            post_type: None,
            spoiler: None,
            performance_id: None,
            page: 1,
        }
    }
}

impl PostFilters {
    /// Keyword search > spoiler filter > type filter > performance-scoped
    /// listing > plain listing. Filtered paths name the performance, or
    /// `all` when unscoped.
    pub fn target(&self, size: u32) -> Target {
        let scope = self
            .performance_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "all".to_string());
        let scoped = Target::new("/api/posts/performance").segment(scope);

        let keyword = self.keyword.trim();
        let target = if !keyword.is_empty() {
            Target::new("/api/posts/search").param("keyword", keyword)
        } else if let Some(spoiler) = self.spoiler {
            scoped.segment("spoiler").segment(spoiler)
        } else if let Some(post_type) = &self.post_type {
            scoped
                .segment("type")
                .segment(post_type.as_str().to_ascii_lowercase())
        } else if let Some(id) = self.performance_id {
            Target::new("/api/posts/performance").segment(id)
        } else {
            Target::new("/api/posts")
        };

        target.paged(self.page, size)
    }

    pub fn href(&self, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.keyword.trim().is_empty() {
            query.append_pair("keyword", self.keyword.trim());
        }
        if let Some(post_type) = &self.post_type {
            query.append_pair("type", post_type.as_str());
        }
        if let Some(spoiler) = self.spoiler {
            query.append_pair("spoiler", if spoiler { "true" } else { "false" });
        }
        if let Some(id) = self.performance_id {
            query.append_pair("performanceId", &id.to_string());
        }
        query.append_pair("page", &page.to_string());
        format!("/posts?{}", query.finish())
    }
}

#[derive(Debug, Clone)]
pub struct PostListView {
    pub filters: PostFilters,
    pub posts: Vec<Post>,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for PostListView {
    fn default() -> Self {
        Self {
            filters: PostFilters::default(),
            posts: Vec::new(),
            total_pages: 1,
            loading: true,
            error: None,
        }
    }
}

pub struct PostList {
    api: ApiClient,
    locale: Locale,
    page_size: u32,
    seq: Sequencer,
    cell: ViewCell<PostListView>,
}

impl PostList {
    pub fn new(api: ApiClient, page_size: u32, locale: Locale) -> Self {
        Self {
            api,
            locale,
            page_size,
            seq: Sequencer::default(),
            cell: ViewCell::new(PostListView::default()),
        }
    }

    pub fn view(&self) -> PostListView {
        self.cell.snapshot()
    }

    /// A keyword that differs from the current one is a new search and
    /// restarts at page 1.
    pub async fn load(&self, filters: PostFilters) -> PostListView {
        let (pending, target) = self.cell.begin(&self.seq, |view| {
            let mut filters = filters;
            if filters.keyword.trim() != view.filters.keyword.trim() {
                filters.page = 1;
            }
            filters.page = filters.page.max(1);

            let target = filters.target(self.page_size);
            view.filters = filters;
            view.loading = true;
            view.error = None;
            target
        });

        let result = self.api.posts(&target).await;

        self.cell.finish(&self.seq, pending, |view| {
            view.loading = false;
            match result {
                Ok(page) => {
                    view.posts = page.content;
                    view.total_pages = page.total_pages;
                }
                Err(e) => {
                    tracing::warn!("Loading posts failed: {}", e);
                    view.posts.clear();
                    view.total_pages = 0;
                    view.error = Some(e.user_message(Message::PostsLoadFailed, self.locale));
                }
            }
        })
    }
}
