use serde::{Deserialize, Serialize};

/// Место в том виде, в котором его отдаёт и принимает бэкенд.
///
/// `estado` приходит только в ответах об занятости, `persona` - только
/// после назначения зрителя. Пустые поля не сериализуются.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(rename = "fila")]
    pub row: i32,
    #[serde(rename = "columna")]
    pub column: i32,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "persona", default, skip_serializing_if = "Option::is_none")]
    pub attendee: Option<String>,
}

impl Seat {
    pub fn at(row: i32, column: i32) -> Self {
        Self {
            row,
            column,
            status: None,
            attendee: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_attendee(mut self, attendee: impl Into<String>) -> Self {
        self.attendee = Some(attendee.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_seat_serializes_only_coordinates() {
        let value = serde_json::to_value(Seat::at(2, 5)).unwrap();
        assert_eq!(value, json!({"fila": 2, "columna": 5}));
    }

    #[test]
    fn attendee_is_sent_as_persona() {
        let value = serde_json::to_value(Seat::at(1, 1).with_attendee("Lucia Gomez")).unwrap();
        assert_eq!(value, json!({"fila": 1, "columna": 1, "persona": "Lucia Gomez"}));
    }
}
