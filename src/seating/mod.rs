//! Сетка мест и локальный выбор пользователя.

pub mod grid;
pub mod reconciler;
pub mod selection;

pub use grid::{build_grid, OccupancyMap, MAX_VENUE_SEATS, SeatCell, SeatOccupancy, SeatPosition, VenueLayout};
pub use reconciler::{IgnoreReason, SeatSelectionReconciler, SelectionSnapshot, ToggleOutcome};
pub use selection::SeatSelection;
