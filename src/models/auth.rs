use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Данные для регистрации нового пользователя.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
}

/// Ответ на вход и регистрацию. Пустой `token` означает отказ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub token: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub username: String,
    #[serde(rename = "mensaje", default, deserialize_with = "super::null_as_empty")]
    pub message: String,
}

impl AuthResponse {
    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
