use serde::{Deserialize, Serialize};

use super::Seat;
use crate::error::{ClientError, ClientResult};

/// Ответ на шаги продажи: выбор, блокировка, назначение зрителей, отмена.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(rename = "exito")]
    pub success: bool,
    #[serde(rename = "mensaje", default, deserialize_with = "super::null_as_empty")]
    pub message: String,
}

impl ActionResult {
    /// Логическая неудача превращается в `ClientError::Rejected` с текстом бэкенда.
    pub fn into_result(self) -> ClientResult<String> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ClientError::Rejected(self.message))
        }
    }
}

/// Итог подтверждения продажи.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "eventoId", default)]
    pub event_id: Option<i64>,
    #[serde(rename = "fechaVenta", default)]
    pub sold_at: Option<String>,
    #[serde(rename = "precioVenta", default)]
    pub total_price: Option<f64>,
    #[serde(rename = "resultado", default)]
    pub success: Option<bool>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "asientos", default)]
    pub seats: Option<Vec<Seat>>,
}

impl SaleResult {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SelectSeatsRequest<'a> {
    #[serde(rename = "eventoId")]
    pub event_id: i64,
    #[serde(rename = "asientos")]
    pub seats: &'a [Seat],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AssignAttendeesRequest<'a> {
    #[serde(rename = "asientos")]
    pub seats: &'a [Seat],
}
