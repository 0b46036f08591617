use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::StateCell;
use crate::error::{ClientError, ClientResult};
use crate::models::Seat;
use crate::seating::SeatPosition;
use crate::services::TicketApi;
use crate::validation::{message_of, validate_attendee_name};

pub const NO_SEATS_SELECTED: &str = "no seats selected";
pub const FIX_NAMES: &str = "fix the highlighted names";

/// Имя зрителя для одного выбранного места.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeEntry {
    pub position: SeatPosition,
    pub name: String,
    pub error: Option<String>,
}

impl AttendeeEntry {
    fn check(&mut self) -> bool {
        self.error = validate_attendee_name(&self.name)
            .err()
            .map(|e| message_of(&e));
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttendeeState {
    #[default]
    Loading,
    Ready(Vec<AttendeeEntry>),
    Failed(String),
}

pub struct AttendeeScreen {
    api: Arc<dyn TicketApi>,
    state: StateCell<AttendeeState>,
}

impl AttendeeScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            state: StateCell::new(AttendeeState::Loading),
        }
    }

    pub fn state(&self) -> AttendeeState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<AttendeeState> {
        self.state.subscribe()
    }

    pub async fn load(&mut self) -> AttendeeState {
        self.state.set(AttendeeState::Loading);
        let next = match self.api.current_session().await {
            Ok(session) => {
                // места с неверными координатами пропускаются
                let entries: Vec<AttendeeEntry> = session
                    .selected_seats()
                    .iter()
                    .filter_map(|seat| {
                        SeatPosition::from_seat(seat).map(|position| AttendeeEntry {
                            position,
                            name: seat.attendee.clone().unwrap_or_default(),
                            error: None,
                        })
                    })
                    .collect();
                if entries.is_empty() {
                    AttendeeState::Failed(NO_SEATS_SELECTED.to_string())
                } else {
                    AttendeeState::Ready(entries)
                }
            }
            Err(e) => AttendeeState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }

    /// Меняет имя на месте и сбрасывает его ошибку.
    pub fn set_name(&mut self, row: u32, column: u32, name: impl Into<String>) {
        let position = SeatPosition::new(row, column);
        let name = name.into();
        self.state.update(|state| {
            if let AttendeeState::Ready(entries) = state {
                if let Some(entry) = entries.iter_mut().find(|e| e.position == position) {
                    entry.name = name;
                    entry.error = None;
                }
            }
        });
    }

    pub async fn submit(&mut self) -> ClientResult<String> {
        let mut entries = match self.state.get() {
            AttendeeState::Ready(entries) if !entries.is_empty() => entries,
            _ => return Err(ClientError::Invalid(NO_SEATS_SELECTED.to_string())),
        };

        // все записи проверяются, чтобы подсветить каждую ошибку
        let valid = entries
            .iter_mut()
            .fold(true, |valid, entry| entry.check() && valid);
        if !valid {
            self.state.set(AttendeeState::Ready(entries));
            return Err(ClientError::Invalid(FIX_NAMES.to_string()));
        }
        self.state.set(AttendeeState::Ready(entries.clone()));

        let seats: Vec<Seat> = entries
            .iter()
            .map(|entry| entry.position.to_seat().with_attendee(entry.name.trim()))
            .collect();
        let message = self.api.assign_attendees(&seats).await?.into_result()?;
        info!("Assigned attendees to {} seats", seats.len());
        Ok(message)
    }
}
