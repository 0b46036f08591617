use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::StateCell;
use crate::services::TicketApi;
use crate::session_store::AuthSession;
use crate::validation::{FieldErrors, LoginForm};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Loading,
    Success(AuthSession),
    Failed(String),
}

/// Экран входа. Сохранять полученную сессию - забота вызывающего.
pub struct LoginScreen {
    api: Arc<dyn TicketApi>,
    form: LoginForm,
    errors: FieldErrors,
    state: StateCell<LoginState>,
}

impl LoginScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            form: LoginForm::default(),
            errors: FieldErrors::new(),
            state: StateCell::new(LoginState::Idle),
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
        self.errors.remove("username");
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.errors.remove("password");
    }

    pub fn username_error(&self) -> Option<&str> {
        self.errors.get("username").map(String::as_str)
    }

    pub fn password_error(&self) -> Option<&str> {
        self.errors.get("password").map(String::as_str)
    }

    pub fn state(&self) -> LoginState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub fn reset(&mut self) {
        self.state.set(LoginState::Idle);
    }

    pub async fn submit(&mut self) -> LoginState {
        if let Err(errors) = self.form.check() {
            self.errors = errors;
            return self.state.get();
        }

        let username = self.form.username.trim().to_string();
        self.state.set(LoginState::Loading);

        let next = match self.api.authenticate(&username, &self.form.password).await {
            Ok(response) if response.is_authenticated() => {
                info!("User {} logged in", username);
                let username = if response.username.is_empty() {
                    username
                } else {
                    response.username
                };
                LoginState::Success(AuthSession {
                    token: response.token,
                    username,
                })
            }
            Ok(response) => {
                warn!("Login rejected for {}: {}", username, response.message);
                LoginState::Failed(response.message)
            }
            Err(e) => LoginState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }
}
