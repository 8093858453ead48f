use url::form_urlencoded;

use crate::api::models::{Performance, PerformanceStatus};
use crate::api::{ApiClient, Target};
use crate::messages::{Locale, Message};
use crate::pages::{Sequencer, ViewCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceFilters {
    pub keyword: String,
    /// `None` is the "ALL" option.
    pub status: Option<PerformanceStatus>,
    /// One-based.
    pub page: u32,
}

impl Default for PerformanceFilters {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            status: None,
            page: 1,
        }
    }
}

impl PerformanceFilters {
    /// Keyword search wins over the status filter, which wins over the
    /// plain listing.
    pub fn target(&self, size: u32) -> Target {
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            return Target::new("/api/performances/search")
                .param("keyword", keyword)
                .paged(self.page, size);
        }
        if let Some(status) = &self.status {
            return Target::new("/api/performances/status")
                .segment(status.as_str().to_ascii_lowercase())
                .paged(self.page, size);
        }
        Target::new("/api/performances").paged(self.page, size)
    }

    /// Shell link that reproduces these filters on `page`.
    pub fn href(&self, page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.keyword.trim().is_empty() {
            query.append_pair("keyword", self.keyword.trim());
        }
        if let Some(status) = &self.status {
            query.append_pair("status", status.as_str());
        }
        query.append_pair("page", &page.to_string());
        format!("/performances?{}", query.finish())
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceListView {
    pub filters: PerformanceFilters,
    pub performances: Vec<Performance>,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for PerformanceListView {
    fn default() -> Self {
        Self {
            filters: PerformanceFilters::default(),
            performances: Vec::new(),
            total_pages: 1,
            loading: true,
            error: None,
        }
    }
}

pub struct PerformanceList {
    api: ApiClient,
    locale: Locale,
    page_size: u32,
    seq: Sequencer,
    cell: ViewCell<PerformanceListView>,
}

impl PerformanceList {
    pub fn new(api: ApiClient, page_size: u32, locale: Locale) -> Self {
        Self {
            api,
            locale,
            page_size,
            seq: Sequencer::default(),
            cell: ViewCell::new(PerformanceListView::default()),
        }
    }

    pub fn view(&self) -> PerformanceListView {
        self.cell.snapshot()
    }

    /// Re-enter the load sequence for `filters`. A keyword that differs from
    /// the current one is a new search and restarts at page 1.
    pub async fn load(&self, filters: PerformanceFilters) -> PerformanceListView {
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

        let result = self.api.performances(&target).await;

        self.cell.finish(&self.seq, pending, |view| {
            view.loading = false;
            match result {
                Ok(page) => {
                    view.performances = page.content;
                    view.total_pages = page.total_pages;
                }
                Err(e) => {
                    tracing::warn!("Loading performances failed: {}", e);
                    view.performances.clear();
                    view.total_pages = 0;
                    view.error = Some(e.user_message(Message::PerformancesLoadFailed, self.locale));
                }
            }
        })
    }
}
