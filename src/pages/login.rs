use serde::Deserialize;

use crate::api::models::LoginRequest;
use crate::api::ApiClient;
use crate::messages::{Locale, Message};
use crate::pages::Outcome;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The password is never echoed back into the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginView {
    pub username: String,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct Login {
    api: ApiClient,
    locale: Locale,
    view: LoginView,
}

impl Login {
    pub fn new(api: ApiClient, locale: Locale) -> Self {
        Self {
            api,
            locale,
            view: LoginView::default(),
        }
    }

    pub fn view(&self) -> &LoginView {
        &self.view
    }

    /// On success the token and username land in the session store and the
    /// shell navigates home.
    pub async fn submit(&mut self, form: LoginForm) -> Outcome<LoginView> {
        self.view.username = form.username.clone();
        self.view.error = None;

        if form.username.trim().is_empty() || form.password.is_empty() {
            self.view.error = Some(Message::RequiredField.text(self.locale).to_string());
            return Outcome::Render(self.view.clone());
        }

        self.view.loading = true;
        let request = LoginRequest {
            username: form.username,
            password: form.password,
        };
        let result = self.api.login(&request).await;
        self.view.loading = false;

        match result {
            Ok(response) => match self.api.session().set(&response.token, &response.username) {
                Ok(()) => Outcome::Navigate("/".to_string()),
                Err(e) => {
                    tracing::error!("Could not persist session: {}", e);
                    self.view.error = Some(Message::LoginFailed.text(self.locale).to_string());
                    Outcome::Render(self.view.clone())
                }
            },
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", request.username, e);
                self.view.error = Some(e.user_message(Message::LoginFailed, self.locale));
                Outcome::Render(self.view.clone())
            }
        }
    }
}
