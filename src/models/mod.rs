pub mod auth;
pub mod event;
pub mod sale;
pub mod seat;
pub mod session;

pub use auth::{AuthResponse, Registration};
pub use event::{EventDetail, EventSummary, Presenter};
pub use sale::{ActionResult, SaleResult};
pub use seat::Seat;
pub use session::SessionSnapshot;

use serde::{Deserialize, Deserializer};

/// `null` в строковом поле ответа читается как пустая строка.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
