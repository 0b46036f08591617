pub mod config;
pub mod error;
pub mod models;
pub mod screens;
pub mod seating;
pub mod services;
pub mod session_store;
pub mod validation;

use std::sync::Arc;

use tracing::info;

use crate::error::ClientResult;
use crate::services::{BackendClient, TicketApi};
use crate::session_store::{AuthSession, SessionStore};

// Общее состояние клиента: настройки, HTTP-клиент и текущая авторизация
#[derive(Debug)]
pub struct App {
    pub config: config::Config,
    pub backend: BackendClient,
    pub session: SessionStore,
}

impl App {
    pub fn new(config: config::Config) -> ClientResult<Self> {
        let backend = BackendClient::from_config(&config.backend)?;
        info!("Backend client configured for {}", backend.base_url());
        Ok(Self {
            config,
            backend,
            session: SessionStore::new(),
        })
    }

    /// API с токеном текущего пользователя, если он вошёл.
    pub fn api(&self) -> Arc<dyn TicketApi> {
        Arc::new(self.backend.authorized(&self.session))
    }

    pub fn sign_in(&mut self, session: AuthSession) {
        self.session.save(session);
    }

    pub fn sign_out(&mut self) {
        self.session.clear();
    }

    pub fn max_seats(&self) -> usize {
        self.config.purchase.max_seats
    }
}
