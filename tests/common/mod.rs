#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use ticket_client::error::{ClientError, ClientResult};
use ticket_client::models::{
    ActionResult, AuthResponse, EventDetail, EventSummary, Registration, SaleResult, Seat,
    SessionSnapshot,
};
use ticket_client::services::TicketApi;

/// Бэкенд в памяти: отвечает заготовленными записями и пишет журнал вызовов.
pub struct FakeApi {
    pub event: EventDetail,
    pub occupancy: Mutex<Vec<Seat>>,
    pub session_status: String,
    pub select_result: ActionResult,
    pub lock_result: ActionResult,
    pub assign_result: ActionResult,
    pub sale: SaleResult,
    pub fail_cancel: bool,
    /// Места, которые "бэкенд" держит в текущей сессии.
    pub session_seats: Mutex<Vec<Seat>>,
    pub calls: Mutex<Vec<String>>,
}

pub fn ok(message: &str) -> ActionResult {
    ActionResult {
        success: true,
        message: message.to_string(),
    }
}

pub fn rejected(message: &str) -> ActionResult {
    ActionResult {
        success: false,
        message: message.to_string(),
    }
}

pub fn event(id: i64, rows: i32, columns: i32, price: Option<f64>) -> EventDetail {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "titulo": "Noche de Jazz",
        "filaAsientos": rows,
        "columnaAsientos": columns,
        "precioEntrada": price,
    }))
    .unwrap()
}

impl FakeApi {
    pub fn new(event: EventDetail, occupancy: Vec<Seat>) -> Self {
        Self {
            event,
            occupancy: Mutex::new(occupancy),
            session_status: "ACTIVA".to_string(),
            select_result: ok("Asientos seleccionados"),
            lock_result: ok("Asientos bloqueados"),
            assign_result: ok("Personas asignadas"),
            sale: SaleResult {
                id: Some(77),
                success: Some(true),
                ..SaleResult::default()
            },
            fail_cancel: false,
            session_seats: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn report_occupancy(&self, seats: Vec<Seat>) {
        *self.occupancy.lock().unwrap() = seats;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn snapshot(&self, status: &str) -> SessionSnapshot {
        SessionSnapshot {
            id: Some(1),
            event_id: Some(self.event.id),
            status: Some(status.to_string()),
            selected_seats: Some(self.session_seats.lock().unwrap().clone()),
            message: None,
        }
    }
}

#[async_trait]
impl TicketApi for FakeApi {
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        self.record("authenticate");
        let token = if password == "secret" { "jwt-token" } else { "" };
        Ok(AuthResponse {
            token: token.to_string(),
            username: username.to_string(),
            message: if token.is_empty() {
                "Credenciales invalidas".to_string()
            } else {
                String::new()
            },
        })
    }

    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        self.record("register");
        Ok(AuthResponse {
            token: "jwt-new".to_string(),
            username: registration.username.clone(),
            message: String::new(),
        })
    }

    async fn list_events(&self) -> ClientResult<Vec<EventSummary>> {
        self.record("list_events");
        Ok(vec![serde_json::from_value(serde_json::json!({
            "id": self.event.id,
            "titulo": self.event.title,
        }))?])
    }

    async fn event_detail(&self, event_id: i64) -> ClientResult<EventDetail> {
        self.record("event_detail");
        if event_id != self.event.id {
            return Err(ClientError::Rejected("Evento no encontrado".to_string()));
        }
        Ok(self.event.clone())
    }

    async fn seat_occupancy(&self, _event_id: i64) -> ClientResult<Vec<Seat>> {
        self.record("seat_occupancy");
        Ok(self.occupancy.lock().unwrap().clone())
    }

    async fn current_session(&self) -> ClientResult<SessionSnapshot> {
        self.record("current_session");
        Ok(self.snapshot("ACTIVA"))
    }

    async fn start_session(&self, _event_id: i64) -> ClientResult<SessionSnapshot> {
        self.record("start_session");
        let mut snapshot = self.snapshot(&self.session_status);
        if self.session_status == "ERROR" {
            snapshot.message = Some("Ya existe una sesion activa".to_string());
        }
        Ok(snapshot)
    }

    async fn end_session(&self) -> ClientResult<SessionSnapshot> {
        self.record("end_session");
        Err(ClientError::Rejected("sesion ya finalizada".to_string()))
    }

    async fn select_seats(&self, _event_id: i64, seats: &[Seat]) -> ClientResult<ActionResult> {
        self.record("select_seats");
        if self.select_result.success {
            *self.session_seats.lock().unwrap() = seats.to_vec();
        }
        Ok(self.select_result.clone())
    }

    async fn lock_seats(&self) -> ClientResult<ActionResult> {
        self.record("lock_seats");
        Ok(self.lock_result.clone())
    }

    async fn assign_attendees(&self, seats: &[Seat]) -> ClientResult<ActionResult> {
        self.record("assign_attendees");
        if self.assign_result.success {
            *self.session_seats.lock().unwrap() = seats.to_vec();
        }
        Ok(self.assign_result.clone())
    }

    async fn confirm_sale(&self) -> ClientResult<SaleResult> {
        self.record("confirm_sale");
        Ok(self.sale.clone())
    }

    async fn cancel_process(&self) -> ClientResult<ActionResult> {
        self.record("cancel_process");
        if self.fail_cancel {
            return Err(ClientError::Rejected("no hay proceso".to_string()));
        }
        Ok(ok("Proceso cancelado"))
    }
}
