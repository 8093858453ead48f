use askama::Template;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::pages::home::HomeView;
use crate::pages::Home;
use crate::routes::{Html, NavBar};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav: NavBar,
    pub page: HomeView,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Html<HomeTemplate> {
    Html(HomeTemplate {
        nav: NavBar::from_session(&state.session),
        page: Home::view(),
    })
}
