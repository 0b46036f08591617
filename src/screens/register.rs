use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::StateCell;
use crate::models::Registration;
use crate::services::TicketApi;
use crate::session_store::AuthSession;
use crate::validation::{FieldErrors, RegistrationForm};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegisterState {
    #[default]
    Idle,
    Loading,
    Success(AuthSession),
    Failed(String),
}

pub struct RegisterScreen {
    api: Arc<dyn TicketApi>,
    form: RegistrationForm,
    errors: FieldErrors,
    state: StateCell<RegisterState>,
}

impl RegisterScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            form: RegistrationForm::default(),
            errors: FieldErrors::new(),
            state: StateCell::new(RegisterState::Idle),
        }
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.form.username = value.into();
        self.errors.remove("username");
    }

    // Смена пароля сбрасывает и ошибку подтверждения.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.form.password = value.into();
        self.errors.remove("password");
        self.errors.remove("confirm_password");
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.form.confirm_password = value.into();
        self.errors.remove("confirm_password");
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.form.first_name = value.into();
        self.errors.remove("first_name");
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.form.last_name = value.into();
        self.errors.remove("last_name");
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.form.email = value.into();
        self.errors.remove("email");
    }

    /// Ошибка поля по имени (`username`, `password`, `confirm_password`,
    /// `first_name`, `last_name`, `email`).
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> RegisterState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<RegisterState> {
        self.state.subscribe()
    }

    pub fn reset(&mut self) {
        self.state.set(RegisterState::Idle);
    }

    pub async fn submit(&mut self) -> RegisterState {
        if let Err(errors) = self.form.check() {
            self.errors = errors;
            return self.state.get();
        }

        let registration = Registration {
            username: self.form.username.trim().to_string(),
            password: self.form.password.clone(),
            first_name: self.form.first_name.trim().to_string(),
            last_name: self.form.last_name.trim().to_string(),
            email: self.form.email.trim().to_string(),
        };
        self.state.set(RegisterState::Loading);

        let next = match self.api.register(&registration).await {
            Ok(response) if response.is_authenticated() => {
                info!("User {} registered", registration.username);
                let username = if response.username.is_empty() {
                    registration.username
                } else {
                    response.username
                };
                RegisterState::Success(AuthSession {
                    token: response.token,
                    username,
                })
            }
            Ok(response) => {
                warn!(
                    "Registration rejected for {}: {}",
                    registration.username, response.message
                );
                RegisterState::Failed(response.message)
            }
            Err(e) => RegisterState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }
}
