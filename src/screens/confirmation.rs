use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::StateCell;
use crate::error::{ClientError, ClientResult};
use crate::models::{EventDetail, SaleResult, Seat};
use crate::services::TicketApi;

pub const NO_PURCHASE_DATA: &str = "no purchase data";
pub const PURCHASE_COMPLETED: &str = "purchase completed successfully";
const PURCHASE_FAILED: &str = "the purchase could not be completed";

/// Итог покупки перед подтверждением.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSummary {
    pub event: EventDetail,
    pub seats: Vec<Seat>,
    pub unit_price: f64,
    pub total_price: f64,
}

impl PurchaseSummary {
    /// Цена за место - цена входа события или 0, итог - цена на число мест.
    pub fn new(event: EventDetail, seats: Vec<Seat>) -> Self {
        let unit_price = event.ticket_price.unwrap_or(0.0);
        let total_price = unit_price * seats.len() as f64;
        Self {
            event,
            seats,
            unit_price,
            total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfirmationState {
    #[default]
    Loading,
    Ready(PurchaseSummary),
    Processing,
    Completed(String),
    Failed(String),
}

pub struct ConfirmationScreen {
    api: Arc<dyn TicketApi>,
    state: StateCell<ConfirmationState>,
}

impl ConfirmationScreen {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            state: StateCell::new(ConfirmationState::Loading),
        }
    }

    pub fn state(&self) -> ConfirmationState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConfirmationState> {
        self.state.subscribe()
    }

    pub async fn load(&mut self) -> ConfirmationState {
        self.state.set(ConfirmationState::Loading);
        let next = match self.summary().await {
            Ok(summary) => ConfirmationState::Ready(summary),
            Err(e) => ConfirmationState::Failed(e.to_string()),
        };
        self.state.set(next.clone());
        next
    }

    async fn summary(&self) -> ClientResult<PurchaseSummary> {
        let session = self.api.current_session().await?;
        let event_id = match session.event_id {
            Some(id) if !session.selected_seats().is_empty() => id,
            _ => return Err(ClientError::Invalid(NO_PURCHASE_DATA.to_string())),
        };
        let event = self.api.event_detail(event_id).await?;
        Ok(PurchaseSummary::new(event, session.selected_seats().to_vec()))
    }

    pub async fn confirm(&mut self) -> ClientResult<SaleResult> {
        self.state.set(ConfirmationState::Processing);

        let result = self.api.confirm_sale().await.and_then(|sale| {
            if sale.is_success() {
                Ok(sale)
            } else {
                Err(ClientError::Rejected(
                    sale.description
                        .unwrap_or_else(|| PURCHASE_FAILED.to_string()),
                ))
            }
        });

        match &result {
            Ok(sale) => {
                info!("Sale {:?} confirmed", sale.id);
                self.state
                    .set(ConfirmationState::Completed(PURCHASE_COMPLETED.to_string()));
            }
            Err(e) => {
                warn!("Sale confirmation failed: {}", e);
                self.state.set(ConfirmationState::Failed(e.to_string()));
            }
        }
        result
    }

    /// Отмена покупки. Ошибки только логируются.
    pub async fn cancel(&mut self) {
        match self.api.cancel_process().await {
            Ok(result) if !result.success => {
                warn!("Backend refused to cancel the purchase: {}", result.message)
            }
            Ok(_) => info!("Purchase cancelled"),
            Err(e) => warn!("Failed to cancel the purchase: {}", e),
        }
    }
}
