use tokio::sync::watch;
use tracing::info;

/// Токен и имя пользователя после успешного входа.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

/// Хранилище текущей авторизации на время жизни процесса.
///
/// Не глобальное: создаётся владельцем приложения и передаётся явно туда,
/// где собирается авторизованный клиент.
#[derive(Debug)]
pub struct SessionStore {
    current: Option<AuthSession>,
    authenticated: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (authenticated, _) = watch::channel(false);
        Self {
            current: None,
            authenticated,
        }
    }

    pub fn save(&mut self, session: AuthSession) {
        info!("Session saved for user {}", session.username);
        self.current = Some(session);
        self.authenticated.send_replace(true);
    }

    pub fn clear(&mut self) {
        if let Some(session) = self.current.take() {
            info!("Session cleared for user {}", session.username);
        }
        self.authenticated.send_replace(false);
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.username.as_str())
    }

    pub fn has_active_session(&self) -> bool {
        self.current.is_some()
    }

    /// Наблюдаемый флаг "пользователь вошёл".
    pub fn authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
