//! backend.rs
//!
//! HTTP-клиент бэкенда продажи билетов.
//!
//! Ключевые моменты:
//! 1.  **Токен передаётся явно**: клиент не читает глобальное состояние, токен
//!     кладётся в копию клиента через [`BackendClient::authorized`] или
//!     [`BackendClient::with_token`]. Все запросы, кроме входа и регистрации,
//!     отправляют `Authorization: Bearer <token>`, если токен есть.
//! 2.  **Логические отказы приходят с 4xx**: бэкенд на ошибку отвечает 400/401
//!     с обычной записью (`exito: false`, пустой `token`). Поэтому тело всегда
//!     разбирается как ожидаемая запись, а ошибка статуса возвращается только
//!     когда тело не разобралось.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    config::BackendConfig,
    error::{ClientError, ClientResult},
    models::{
        auth::LoginRequest,
        sale::{AssignAttendeesRequest, SelectSeatsRequest},
        session::StartSessionRequest,
        ActionResult, AuthResponse, EventDetail, EventSummary, Registration, SaleResult, Seat,
        SessionSnapshot,
    },
    services::TicketApi,
    session_store::SessionStore,
};

/// Клиент для взаимодействия с API бэкенда.
///
/// Дёшево клонируется: `reqwest::Client` внутри уже разделяемый.
#[derive(Clone)]
pub struct BackendClient {
    /// Базовый URL бэкенда без завершающего `/`.
    base_url: String,
    /// Асинхронный HTTP-клиент.
    http_client: reqwest::Client,
    /// JWT текущего пользователя, если он вошёл.
    token: Option<String>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("authorized", &self.token.is_some())
            .finish()
    }
}

impl BackendClient {
    /// Создает клиент на основе настроек приложения.
    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            token: None,
        })
    }

    /// Копия клиента с заданным токеном (или без токена).
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            ..self.clone()
        }
    }

    /// Копия клиента с токеном из хранилища сессии.
    pub fn authorized(&self, store: &SessionStore) -> Self {
        self.with_token(store.token())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Запрос без авторизации (вход, регистрация).
    fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.http_client.request(method, self.url(path))
    }

    /// Запрос с Bearer-токеном, если он есть.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.public_request(method, path);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(path, self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(path, self.request(Method::POST, path).json(body))
            .await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(path, self.request(Method::POST, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> ClientResult<T> {
        let result = async {
            let response = builder.send().await?;
            decode_response(response).await
        }
        .await;

        if let Err(e) = &result {
            error!("Backend request {} failed: {}", path, e);
        }
        result
    }
}

/// Разбирает тело как `T` независимо от статуса; статус важен только если
/// разобрать не получилось.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<T>(&body) {
        Ok(value) => {
            if !status.is_success() {
                warn!("Backend answered {} with a decodable body", status);
            }
            Ok(value)
        }
        Err(e) if status.is_success() => Err(ClientError::Decode(e)),
        Err(_) => Err(ClientError::Status { status, body }),
    }
}

#[async_trait]
impl TicketApi for BackendClient {
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let path = "/api/auth/login";
        let builder = self
            .public_request(Method::POST, path)
            .json(&LoginRequest { username, password });
        self.send(path, builder).await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        let path = "/api/auth/registro";
        let builder = self.public_request(Method::POST, path).json(registration);
        self.send(path, builder).await
    }

    async fn list_events(&self) -> ClientResult<Vec<EventSummary>> {
        self.get("/api/eventos").await
    }

    async fn event_detail(&self, event_id: i64) -> ClientResult<EventDetail> {
        self.get(&format!("/api/eventos/{}", event_id)).await
    }

    async fn seat_occupancy(&self, event_id: i64) -> ClientResult<Vec<Seat>> {
        self.get(&format!("/api/eventos/{}/asientos", event_id)).await
    }

    async fn current_session(&self) -> ClientResult<SessionSnapshot> {
        self.get("/api/sesion").await
    }

    async fn start_session(&self, event_id: i64) -> ClientResult<SessionSnapshot> {
        self.post("/api/sesion/iniciar", &StartSessionRequest { event_id })
            .await
    }

    async fn end_session(&self) -> ClientResult<SessionSnapshot> {
        self.post_empty("/api/sesion/finalizar").await
    }

    async fn select_seats(&self, event_id: i64, seats: &[Seat]) -> ClientResult<ActionResult> {
        self.post("/api/ventas/seleccionar", &SelectSeatsRequest { event_id, seats })
            .await
    }

    async fn lock_seats(&self) -> ClientResult<ActionResult> {
        self.post_empty("/api/ventas/bloquear").await
    }

    async fn assign_attendees(&self, seats: &[Seat]) -> ClientResult<ActionResult> {
        self.post("/api/ventas/asignar-personas", &AssignAttendeesRequest { seats })
            .await
    }

    async fn confirm_sale(&self) -> ClientResult<SaleResult> {
        self.post_empty("/api/ventas/confirmar").await
    }

    async fn cancel_process(&self) -> ClientResult<ActionResult> {
        self.post_empty("/api/ventas/cancelar").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            base_url: url.to_string(),
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = BackendClient::from_config(&config("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/eventos"), "http://localhost:8080/api/eventos");
    }

    #[test]
    fn authorized_copies_token_from_store() {
        let client = BackendClient::from_config(&config("http://localhost:8080")).unwrap();
        let mut store = SessionStore::new();
        assert!(!client.authorized(&store).is_authorized());

        store.save(crate::session_store::AuthSession {
            token: "abc".to_string(),
            username: "pedro".to_string(),
        });
        let authed = client.authorized(&store);
        assert!(authed.is_authorized());
        assert!(!client.is_authorized());
    }
}
