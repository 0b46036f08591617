//! Экран выбора мест.
//!
//! Жизненный цикл привязан к удалённой сессии покупки:
//! `Loading -> Ready -> Confirmed`, либо `Loading -> Failed`. Загрузка
//! последовательно получает детали события, занятость мест и открывает
//! сессию; при отправке выбор сначала передаётся бэкенду, затем блокируется.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::StateCell;
use crate::error::{ClientError, ClientResult};
use crate::models::{EventDetail, Seat};
use crate::seating::{SeatPosition, SeatSelectionReconciler, SelectionSnapshot, ToggleOutcome, VenueLayout};
use crate::services::TicketApi;

pub const NOTICE_EMPTY_SELECTION: &str = "select at least one seat";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeatSelectionState {
    #[default]
    Loading,
    Ready {
        /// Последнее сообщение для пользователя (пустой выбор, отказ бэкенда).
        notice: Option<String>,
        submitting: bool,
    },
    /// Места выбраны и заблокированы за пользователем.
    Confirmed,
    Failed(String),
}

impl SeatSelectionState {
    fn ready(notice: Option<String>) -> Self {
        SeatSelectionState::Ready {
            notice,
            submitting: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SeatSelectionState::Ready { .. })
    }
}

pub struct SeatSelectionScreen {
    api: Arc<dyn TicketApi>,
    event_id: Option<i64>,
    event: Option<EventDetail>,
    reconciler: SeatSelectionReconciler,
    state: StateCell<SeatSelectionState>,
}

impl SeatSelectionScreen {
    pub fn new(api: Arc<dyn TicketApi>, max_seats: usize) -> Self {
        Self {
            api,
            event_id: None,
            event: None,
            reconciler: SeatSelectionReconciler::new(max_seats),
            state: StateCell::new(SeatSelectionState::Loading),
        }
    }

    pub fn event(&self) -> Option<&EventDetail> {
        self.event.as_ref()
    }

    pub fn state(&self) -> SeatSelectionState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<SeatSelectionState> {
        self.state.subscribe()
    }

    /// Текущая сетка и выбор.
    pub fn grid(&self) -> Arc<SelectionSnapshot> {
        self.reconciler.snapshot()
    }

    pub fn subscribe_grid(&self) -> watch::Receiver<Arc<SelectionSnapshot>> {
        self.reconciler.subscribe()
    }

    pub async fn load(&mut self, event_id: i64) -> SeatSelectionState {
        // до успешной загрузки экран не привязан ни к какому событию
        self.event_id = None;
        self.event = None;
        self.state.set(SeatSelectionState::Loading);

        let next = match self.prepare(event_id).await {
            Ok((detail, layout, occupancy)) => {
                self.reconciler.reset(layout, &occupancy);
                self.event = Some(detail);
                self.event_id = Some(event_id);
                info!("Seat selection ready for event {}", event_id);
                SeatSelectionState::ready(None)
            }
            Err(e) => {
                warn!("Seat selection for event {} failed to load: {}", event_id, e);
                SeatSelectionState::Failed(e.to_string())
            }
        };
        self.state.set(next.clone());
        next
    }

    // Размер зала проверяется до открытия удалённой сессии.
    async fn prepare(&self, event_id: i64) -> ClientResult<(EventDetail, VenueLayout, Vec<Seat>)> {
        let detail = self.api.event_detail(event_id).await?;
        let layout = VenueLayout::from_event(&detail)?;
        let occupancy = self.api.seat_occupancy(event_id).await?;
        self.api.start_session(event_id).await?.ensure_started()?;
        Ok((detail, layout, occupancy))
    }

    /// `None`, если экран не в состоянии `Ready`.
    pub fn toggle(&mut self, row: u32, column: u32) -> Option<ToggleOutcome> {
        if !self.state.get().is_ready() {
            return None;
        }
        Some(self.reconciler.toggle(SeatPosition::new(row, column)))
    }

    /// Подтягивает свежую занятость, не сбрасывая сессию.
    pub async fn refresh_occupancy(&mut self) -> ClientResult<()> {
        let event_id = self.loaded_event()?;
        if !self.state.get().is_ready() {
            return Err(ClientError::Invalid("seats are not loaded".to_string()));
        }
        let occupancy = self.api.seat_occupancy(event_id).await?;
        self.reconciler.merge_occupancy(&occupancy);
        Ok(())
    }

    pub async fn submit(&mut self) -> ClientResult<()> {
        let event_id = self.loaded_event()?;
        if !self.state.get().is_ready() {
            return Err(ClientError::Invalid("seats are not loaded".to_string()));
        }

        let seats = self.reconciler.snapshot().selected_seats();
        if seats.is_empty() {
            self.state
                .set(SeatSelectionState::ready(Some(NOTICE_EMPTY_SELECTION.to_string())));
            return Err(ClientError::Invalid(NOTICE_EMPTY_SELECTION.to_string()));
        }

        self.state.set(SeatSelectionState::Ready {
            notice: None,
            submitting: true,
        });

        match self.select_and_lock(event_id, &seats).await {
            Ok(()) => {
                info!("Locked {} seats for event {}", seats.len(), event_id);
                self.state.set(SeatSelectionState::Confirmed);
                Ok(())
            }
            Err(e) => {
                warn!("Seat submission for event {} failed: {}", event_id, e);
                self.state.set(SeatSelectionState::ready(Some(e.to_string())));
                Err(e)
            }
        }
    }

    // Блокировка не отправляется, если выбор отклонён.
    async fn select_and_lock(&self, event_id: i64, seats: &[Seat]) -> ClientResult<()> {
        self.api
            .select_seats(event_id, seats)
            .await?
            .into_result()?;
        self.api.lock_seats().await?.into_result()?;
        Ok(())
    }

    /// Уход с экрана: закрыть удалённую сессию и забыть выбор.
    pub async fn abandon(&mut self) {
        if let Err(e) = self.api.end_session().await {
            warn!("Failed to end purchase session: {}", e);
        }
        self.reconciler.clear_selection();
        self.state.set(SeatSelectionState::Loading);
    }

    fn loaded_event(&self) -> ClientResult<i64> {
        self.event_id
            .ok_or_else(|| ClientError::Invalid("no event loaded".to_string()))
    }
}
