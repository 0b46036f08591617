use reqwest::StatusCode;
use thiserror::Error;

/// Ошибки клиента бэкенда.
///
/// Для экрана все варианты равнозначны: пользователь видит одно сообщение,
/// полученное через `Display`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Сеть недоступна, таймаут, обрыв соединения.
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Ответ не 2xx и тело не удалось разобрать как ожидаемую запись.
    #[error("backend responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Ответ 2xx, но тело не совпадает с ожидаемой схемой.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Бэкенд сам сообщил о неудаче (флаг успеха = false, пустой токен).
    #[error("{0}")]
    Rejected(String),

    /// Ввод не прошёл локальную проверку, запрос не отправлялся.
    #[error("{0}")]
    Invalid(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
