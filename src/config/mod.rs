use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub purchase: PurchaseConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки подключения к бэкенду
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

// Ограничения процесса покупки
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseConfig {
    /// Сколько мест пользователь может выбрать за одну сессию.
    pub max_seats: usize,
}

const ENV_PREFIX: &str = "TICKET";
const ENV_SEPARATOR: &str = "__";

impl Config {
    /// Значения по умолчанию + переменные окружения вида `TICKET__BACKEND__BASE_URL`.
    /// `RUST_LOG`, если задан, перекрывает `app.rust_log`.
    pub fn from_env() -> ClientResult<Self> {
        let rust_log = std::env::var("RUST_LOG").ok();
        Self::load(Self::environment(), rust_log)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn load(env: config::Environment, rust_log: Option<String>) -> ClientResult<Self> {
        let config: Config = config::Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "ticket_client=debug")?
            .set_default("backend.base_url", "http://localhost:8080")?
            .set_default("backend.request_timeout_secs", 30_i64)?
            .set_default("purchase.max_seats", 4_i64)?
            .add_source(env)
            .set_override_option("app.rust_log", rust_log)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ClientResult<()> {
        let url = self.backend.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.backend.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "backend.request_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.purchase.max_seats == 0 {
            return Err(ClientError::Config("purchase.max_seats must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "ticket_client=debug".to_string(),
            },
            backend: BackendConfig {
                base_url: "http://localhost:8080".to_string(),
                request_timeout_secs: 30,
            },
            purchase: PurchaseConfig { max_seats: 4 },
        }
    }
}
