use askama::Template;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::api::models::{Performance, PerformanceStatus};
use crate::error::{AppError, AppResult};
use crate::messages::{Locale, Message};
use crate::pages::pagination::Pagination;
use crate::pages::performance_list::PerformanceFilters;
use crate::routes::{Chip, FilterOption, Html, NavBar};
use crate::state::AppState;

// --- View structs ---

pub struct PerformanceCard {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub venue: String,
    pub schedule: String,
    pub poster: String,
    pub status: Chip,
}

impl PerformanceCard {
    fn new(performance: &Performance, locale: Locale) -> Self {
        Self {
            id: performance.id,
            title: performance.title.clone(),
            genre: performance.genre.clone(),
            venue: performance.venue.clone(),
            schedule: performance.schedule(),
            poster: performance.poster_or_default().to_string(),
            status: status_chip(&performance.status, locale),
        }
    }
}

pub struct PerformanceInfo {
    pub card: PerformanceCard,
    pub description: String,
    pub running_time: String,
}

fn status_chip(status: &PerformanceStatus, locale: Locale) -> Chip {
    Chip {
        label: status.label(locale).to_string(),
        tone: status.tone(),
    }
}

// --- Templates ---

#[derive(Template)]
#[template(path = "pages/performance_list.html")]
pub struct PerformanceListTemplate {
    pub nav: NavBar,
    pub keyword: String,
    pub statuses: Vec<FilterOption>,
    pub cards: Vec<PerformanceCard>,
    pub loading: bool,
    pub loading_text: &'static str,
    pub error: Option<String>,
    pub pagination: Pagination,
}

#[derive(Template)]
#[template(path = "pages/performance_detail.html")]
pub struct PerformanceDetailTemplate {
    pub nav: NavBar,
    pub loading: bool,
    pub loading_text: &'static str,
    pub error: Option<String>,
    pub not_found: bool,
    pub not_found_text: &'static str,
    pub info: Option<PerformanceInfo>,
    pub posts_href: String,
}

// --- Queries ---

#[derive(Debug, Default, Deserialize)]
pub struct PerformanceQuery {
    #[serde(default)]
    pub keyword: String,
    pub status: Option<String>,
    pub page: Option<u32>,
}

impl PerformanceQuery {
    pub fn filters(&self) -> PerformanceFilters {
        PerformanceFilters {
            keyword: self.keyword.trim().to_string(),
            status: self.status.as_deref().and_then(PerformanceStatus::parse),
            page: self.page.unwrap_or(1),
        }
    }
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/performances", get(list))
        .route("/performances/{id}", get(detail))
}

// --- Handlers ---

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> Html<PerformanceListTemplate> {
    let locale = state.config.ui.locale;
    let view = state.pages.performance_list.load(query.filters()).await;

    let filters = &view.filters;
    let mut statuses = vec![FilterOption {
        value: "ALL".to_string(),
        label: Message::AnyOption.text(locale).to_string(),
        selected: filters.status.is_none(),
    }];
    statuses.extend(PerformanceStatus::ALL.iter().map(|status| FilterOption {
        value: status.as_str().to_string(),
        label: status.label(locale).to_string(),
        selected: filters.status.as_ref() == Some(status),
    }));

    let pagination = Pagination::new(filters.page, view.total_pages, |n| filters.href(n));
    let cards = view
        .performances
        .iter()
        .map(|performance| PerformanceCard::new(performance, locale))
        .collect();

    Html(PerformanceListTemplate {
        nav: NavBar::from_session(&state.session),
        keyword: filters.keyword.clone(),
        statuses,
        cards,
        loading: view.loading,
        loading_text: Message::Loading.text(locale),
        error: view.error.clone(),
        pagination,
    })
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<PerformanceDetailTemplate>> {
    let id: i64 = id.parse().map_err(|_| AppError::NotFound)?;
    let locale = state.config.ui.locale;
    let view = state.pages.performance_detail.load(id).await;

    let info = view.performance.as_ref().map(|performance| PerformanceInfo {
        card: PerformanceCard::new(performance, locale),
        description: performance.description.clone().unwrap_or_default(),
        running_time: performance
            .running_time
            .map(|minutes| format!("{}분", minutes))
            .unwrap_or_default(),
    });

    Ok(Html(PerformanceDetailTemplate {
        nav: NavBar::from_session(&state.session),
        loading: view.loading,
        loading_text: Message::Loading.text(locale),
        not_found: view.not_found(),
        not_found_text: Message::PerformanceNotFound.text(locale),
        error: view.error.clone(),
        info,
        posts_href: view.posts_href().unwrap_or_else(|| "/posts".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_status_means_no_filter() {
        let query = PerformanceQuery {
            status: Some("ALL".into()),
            ..Default::default()
        };
        assert_eq!(query.filters().status, None);
        assert_eq!(query.filters().page, 1);
    }

    #[test]
    fn status_is_parsed_case_insensitively() {
        let query = PerformanceQuery {
            keyword: "  hamlet ".into(),
            status: Some("ongoing".into()),
            page: Some(2),
        };
        let filters = query.filters();
        assert_eq!(filters.status, Some(PerformanceStatus::Ongoing));
        assert_eq!(filters.keyword, "hamlet");
        assert_eq!(filters.page, 2);
    }

    #[test]
    fn unlisted_status_means_unfiltered() {
        let query = PerformanceQuery {
            status: Some("postponed/../../x".into()),
            ..Default::default()
        };
        assert_eq!(query.filters().status, None);
    }
}
