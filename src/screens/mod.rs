//! Состояние экранов приложения.
//!
//! Каждый экран владеет `Arc<dyn TicketApi>` и публикует своё состояние
//! через `tokio::sync::watch`: наблюдатели получают только целые снимки.

pub mod attendees;
pub mod confirmation;
pub mod event_detail;
pub mod events;
pub mod login;
pub mod register;
pub mod seat_selection;

use tokio::sync::watch;

pub use attendees::{AttendeeEntry, AttendeeScreen, AttendeeState};
pub use confirmation::{ConfirmationScreen, ConfirmationState, PurchaseSummary};
pub use event_detail::{EventDetailScreen, EventDetailState};
pub use events::{EventListScreen, EventListState};
pub use login::{LoginScreen, LoginState};
pub use register::{RegisterScreen, RegisterState};
pub use seat_selection::{SeatSelectionScreen, SeatSelectionState};

/// Наблюдаемое значение с единственным владельцем-писателем.
#[derive(Debug)]
pub struct StateCell<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    pub fn set(&self, state: S) {
        self.tx.send_replace(state);
    }

    pub fn update(&self, modify: impl FnOnce(&mut S)) {
        self.tx.send_modify(modify);
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}
