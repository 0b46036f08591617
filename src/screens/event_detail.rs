use std::sync::Arc;

use tokio::sync::watch;

use super::StateCell;
use crate::models::EventDetail;
use crate::services::TicketApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventDetailState {
    #[default]
    Loading,
    Ready(EventDetail),
    Failed(String),
}

pub struct EventDetailScreen {
    api: Arc<dyn TicketApi>,
    state: StateCell<EventDetailState>,
}

impl EventDetailScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            state: StateCell::new(EventDetailState::Loading),
        }
    }

    pub fn state(&self) -> EventDetailState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<EventDetailState> {
        self.state.subscribe()
    }

    pub async fn load(&mut self, event_id: i64) -> EventDetailState {
        self.state.set(EventDetailState::Loading);
        let next = match self.api.event_detail(event_id).await {
            Ok(detail) => EventDetailState::Ready(detail),
            Err(e) => EventDetailState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }
}
