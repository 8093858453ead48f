use serde::Deserialize;

use crate::api::models::SignUpRequest;
use crate::api::ApiClient;
use crate::messages::{Locale, Message};
use crate::pages::Outcome;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpView {
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct SignUp {
    api: ApiClient,
    locale: Locale,
    view: SignUpView,
}

impl SignUp {
    pub fn new(api: ApiClient, locale: Locale) -> Self {
        Self {
            api,
            locale,
            view: SignUpView::default(),
        }
    }

    pub fn view(&self) -> &SignUpView {
        &self.view
    }

    pub async fn submit(&mut self, form: SignUpForm) -> Outcome<SignUpView> {
        self.view.username = form.username.clone();
        self.view.email = form.email.clone();
        self.view.nickname = form.nickname.clone();
        self.view.error = None;

        let missing = [&form.username, &form.email, &form.password]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            self.view.error = Some(Message::RequiredField.text(self.locale).to_string());
            return Outcome::Render(self.view.clone());
        }

        self.view.loading = true;
        let nickname = form.nickname.trim();
        let request = SignUpRequest {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password,
            nickname: (!nickname.is_empty()).then(|| nickname.to_string()),
        };
        let result = self.api.sign_up(&request).await;
        self.view.loading = false;

        match result {
            Ok(user) => {
                tracing::info!("Signed up {} (id {})", user.username, user.id);
                Outcome::Navigate("/login".to_string())
            }
            Err(e) => {
                tracing::warn!("Sign up failed for {}: {}", request.username, e);
                self.view.error = Some(e.user_message(Message::SignUpFailed, self.locale));
                Outcome::Render(self.view.clone())
            }
        }
    }
}
