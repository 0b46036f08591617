//! Доступ к удалённому бэкенду продажи билетов.
//!
//! Экраны работают через трейт [`TicketApi`], чтобы их можно было гонять
//! в тестах без сети. Боевая реализация - [`backend::BackendClient`].

pub mod backend;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{
    ActionResult, AuthResponse, EventDetail, EventSummary, Registration, SaleResult, Seat,
    SessionSnapshot,
};

pub use backend::BackendClient;

#[async_trait]
pub trait TicketApi: Send + Sync {
    // === Авторизация (без токена) ===
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<AuthResponse>;
    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse>;

    // === События ===
    async fn list_events(&self) -> ClientResult<Vec<EventSummary>>;
    async fn event_detail(&self, event_id: i64) -> ClientResult<EventDetail>;
    async fn seat_occupancy(&self, event_id: i64) -> ClientResult<Vec<Seat>>;

    // === Сессия покупки ===
    async fn current_session(&self) -> ClientResult<SessionSnapshot>;
    async fn start_session(&self, event_id: i64) -> ClientResult<SessionSnapshot>;
    async fn end_session(&self) -> ClientResult<SessionSnapshot>;

    // === Продажа ===
    async fn select_seats(&self, event_id: i64, seats: &[Seat]) -> ClientResult<ActionResult>;
    async fn lock_seats(&self) -> ClientResult<ActionResult>;
    async fn assign_attendees(&self, seats: &[Seat]) -> ClientResult<ActionResult>;
    async fn confirm_sale(&self) -> ClientResult<SaleResult>;
    async fn cancel_process(&self) -> ClientResult<ActionResult>;
}
