use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::StateCell;
use crate::models::EventSummary;
use crate::services::TicketApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventListState {
    #[default]
    Loading,
    Ready(Vec<EventSummary>),
    Failed(String),
}

pub struct EventListScreen {
    api: Arc<dyn TicketApi>,
    state: StateCell<EventListState>,
}

impl EventListScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            state: StateCell::new(EventListState::Loading),
        }
    }

    pub fn state(&self) -> EventListState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<EventListState> {
        self.state.subscribe()
    }

    pub async fn load(&mut self) -> EventListState {
        self.state.set(EventListState::Loading);
        let next = match self.api.list_events().await {
            Ok(events) => {
                info!("Loaded {} events", events.len());
                EventListState::Ready(events)
            }
            Err(e) => EventListState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }

    pub async fn refresh(&mut self) -> EventListState {
        self.load().await
    }
}
