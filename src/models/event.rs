use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Краткая карточка события для списка.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "resumen", default)]
    pub summary: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "precioEntrada", default)]
    pub ticket_price: Option<f64>,
    #[serde(rename = "tipoEvento", default)]
    pub event_type: Option<String>,
}

impl EventSummary {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(self.date.as_deref())
    }
}

/// Полное описание события, включая размеры зала.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "resumen", default)]
    pub summary: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "filaAsientos", default)]
    pub seat_rows: Option<i32>,
    #[serde(rename = "columnaAsientos", default)]
    pub seat_columns: Option<i32>,
    #[serde(rename = "precioEntrada", default)]
    pub ticket_price: Option<f64>,
    #[serde(rename = "tipoEvento", default)]
    pub event_type: Option<String>,
    #[serde(rename = "integrantes", default)]
    pub presenters: Option<Vec<Presenter>>,
}

impl EventDetail {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(self.date.as_deref())
    }

    pub fn presenters(&self) -> &[Presenter] {
        self.presenters.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presenter {
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(rename = "identificacion", default)]
    pub identification: Option<String>,
}

impl Presenter {
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Бэкенд отдаёт Instant в ISO-8601; если формат другой - просто None
fn parse_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
