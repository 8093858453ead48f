use crate::api::models::Performance;
use crate::api::ApiClient;
use crate::messages::{Locale, Message};
use crate::pages::{Sequencer, ViewCell};

#[derive(Debug, Clone)]
pub struct PerformanceDetailView {
    pub id: Option<i64>,
    pub performance: Option<Performance>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for PerformanceDetailView {
    fn default() -> Self {
        Self {
            id: None,
            performance: None,
            loading: true,
            error: None,
        }
    }
}

impl PerformanceDetailView {
    pub fn not_found(&self) -> bool {
        !self.loading && self.performance.is_none()
    }

    pub fn posts_href(&self) -> Option<String> {
        self.id.map(|id| format!("/posts?performanceId={}", id))
    }
}

pub struct PerformanceDetail {
    api: ApiClient,
    locale: Locale,
    seq: Sequencer,
    cell: ViewCell<PerformanceDetailView>,
}

impl PerformanceDetail {
    pub fn new(api: ApiClient, locale: Locale) -> Self {
        Self {
            api,
            locale,
            seq: Sequencer::default(),
            cell: ViewCell::new(PerformanceDetailView::default()),
        }
    }

    pub fn view(&self) -> PerformanceDetailView {
        self.cell.snapshot()
    }

    pub async fn load(&self, id: i64) -> PerformanceDetailView {
        let (pending, ()) = self.cell.begin(&self.seq, |view| {
            *view = PerformanceDetailView {
                id: Some(id),
                ..PerformanceDetailView::default()
            };
        });

        let result = self.api.performance(id).await;

        self.cell.finish(&self.seq, pending, |view| {
            view.loading = false;
            match result {
                Ok(performance) => view.performance = Some(performance),
                Err(e) => {
                    tracing::warn!("Loading performance {} failed: {}", id, e);
                    view.error = Some(e.user_message(Message::PerformanceLoadFailed, self.locale));
                }
            }
        })
    }
}
