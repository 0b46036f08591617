use serde::{Deserialize, Serialize};

use super::Seat;
use crate::error::{ClientError, ClientResult};

const STATUS_ERROR: &str = "ERROR";

/// Состояние сессии покупки на бэкенде.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "eventoId", default)]
    pub event_id: Option<i64>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "asientosSeleccionados", default)]
    pub selected_seats: Option<Vec<Seat>>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

impl SessionSnapshot {
    pub fn selected_seats(&self) -> &[Seat] {
        self.selected_seats.as_deref().unwrap_or_default()
    }

    /// Бэкенд отвечает на неудачный старт сессии записью со статусом `ERROR`.
    pub fn ensure_started(self) -> ClientResult<Self> {
        let failed = self
            .status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case(STATUS_ERROR));
        if failed {
            return Err(ClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "could not start the purchase session".to_string()),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StartSessionRequest {
    #[serde(rename = "eventoId")]
    pub event_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_rejects_start() {
        let snapshot: SessionSnapshot = serde_json::from_str(
            r#"{"estado": "ERROR", "asientosSeleccionados": [], "mensaje": "Evento no encontrado"}"#,
        )
        .unwrap();
        match snapshot.ensure_started() {
            Err(ClientError::Rejected(msg)) => assert_eq!(msg, "Evento no encontrado"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_session_has_no_seats() {
        let snapshot: SessionSnapshot =
            serde_json::from_str(r#"{"estado": "SIN_SESION", "mensaje": "No hay sesion activa"}"#).unwrap();
        assert!(snapshot.selected_seats().is_empty());
        assert!(snapshot.ensure_started().is_ok());
    }
}
