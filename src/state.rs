use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::pages::{PerformanceDetail, PerformanceList, PostDetail, PostList};
use crate::session::SessionStore;

/// Page controllers whose view state outlives a single request.
pub struct Pages {
    pub performance_list: PerformanceList,
    pub performance_detail: PerformanceDetail,
    pub post_list: PostList,
    pub post_detail: PostDetail,
}

impl Pages {
    pub fn new(api: &ApiClient, config: &Config) -> Self {
        let locale = config.ui.locale;
        let page_size = config.api.page_size;
        Self {
            performance_list: PerformanceList::new(api.clone(), page_size, locale),
            performance_detail: PerformanceDetail::new(api.clone(), locale),
            post_list: PostList::new(api.clone(), page_size, locale),
            post_detail: PostDetail::new(api.clone(), locale),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(config: Config, session: Arc<SessionStore>, api: ApiClient) -> Self {
        let pages = Arc::new(Pages::new(&api, &config));
        Self {
            config,
            session,
            api,
            pages,
        }
    }
}
