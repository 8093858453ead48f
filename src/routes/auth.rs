use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::error::AppResult;
use crate::pages::login::{LoginForm, LoginView};
use crate::pages::signup::{SignUpForm, SignUpView};
use crate::pages::{Login, Outcome, SignUp};
use crate::routes::{Html, NavBar};
use crate::state::AppState;

// --- Templates ---

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav: NavBar,
    pub view: LoginView,
}

#[derive(Template)]
#[template(path = "pages/signup.html")]
pub struct SignUpTemplate {
    pub nav: NavBar,
    pub view: SignUpView,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}

// --- Handlers ---

async fn login_page(State(state): State<AppState>) -> Html<LoginTemplate> {
    Html(LoginTemplate {
        nav: NavBar::from_session(&state.session),
        view: LoginView::default(),
    })
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let mut page = Login::new(state.api.clone(), state.config.ui.locale);
    match page.submit(form).await {
        Outcome::Navigate(to) => {
            tracing::info!("Logged in as {}", state.session.username().unwrap_or_default());
            Redirect::to(&to).into_response()
        }
        Outcome::Render(view) => Html(LoginTemplate {
            nav: NavBar::from_session(&state.session),
            view,
        })
        .into_response(),
    }
}

async fn signup_page(State(state): State<AppState>) -> Html<SignUpTemplate> {
    Html(SignUpTemplate {
        nav: NavBar::from_session(&state.session),
        view: SignUpView::default(),
    })
}

async fn signup(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> Response {
    let mut page = SignUp::new(state.api.clone(), state.config.ui.locale);
    match page.submit(form).await {
        Outcome::Navigate(to) => Redirect::to(&to).into_response(),
        Outcome::Render(view) => Html(SignUpTemplate {
            nav: NavBar::from_session(&state.session),
            view,
        })
        .into_response(),
    }
}

async fn logout(State(state): State<AppState>) -> AppResult<Redirect> {
    state.session.clear()?;
    tracing::info!("Logged out");
    Ok(Redirect::to("/"))
}
