use std::collections::HashMap;

use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::models::{EventDetail, Seat};

/// Статусы, которыми бэкенд помечает занятые места.
pub const STATUS_SOLD: &str = "VENDIDO";
pub const STATUS_LOCKED: &str = "BLOQUEADO";

/// Больше мест в одном зале клиент не строит.
pub const MAX_VENUE_SEATS: usize = 250_000;

/// Координаты места в зале, нумерация с 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatPosition {
    pub row: u32,
    pub column: u32,
}

impl SeatPosition {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Место из ответа бэкенда; `None` для нулевых и отрицательных координат.
    pub fn from_seat(seat: &Seat) -> Option<Self> {
        let row = u32::try_from(seat.row).ok().filter(|r| *r > 0)?;
        let column = u32::try_from(seat.column).ok().filter(|c| *c > 0)?;
        Some(Self { row, column })
    }

    pub fn to_seat(self) -> Seat {
        Seat::at(self.row as i32, self.column as i32)
    }
}

impl std::fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Разбор `ROW:COLUMN`, например `2:5`.
impl std::str::FromStr for SeatPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| v.trim().parse::<u32>().ok().filter(|n| *n > 0);
        match s.split_once(':') {
            Some((row, column)) => match (parse(row), parse(column)) {
                (Some(row), Some(column)) => Ok(Self::new(row, column)),
                _ => Err(format!("seat '{}' must use positive numbers", s)),
            },
            None => Err(format!("expected ROW:COLUMN, got '{}'", s)),
        }
    }
}

/// Эффективное состояние места. В каждый момент ровно одно.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatOccupancy {
    Free,
    Sold,
    LockedByOther,
    SelectedByMe,
}

impl SeatOccupancy {
    /// Статус от бэкенда без учёта регистра; всё неизвестное - `Free`.
    pub fn from_reported(status: Option<&str>) -> Self {
        match status.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case(STATUS_SOLD) => SeatOccupancy::Sold,
            Some(s) if s.eq_ignore_ascii_case(STATUS_LOCKED) => SeatOccupancy::LockedByOther,
            _ => SeatOccupancy::Free,
        }
    }

    pub fn is_selectable(self) -> bool {
        matches!(self, SeatOccupancy::Free | SeatOccupancy::SelectedByMe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCell {
    pub position: SeatPosition,
    pub state: SeatOccupancy,
}

/// Размеры зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VenueLayout {
    pub rows: u32,
    pub columns: u32,
}

impl VenueLayout {
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Отсутствующие и отрицательные размеры считаются нулём.
    pub fn from_dimensions(rows: Option<i32>, columns: Option<i32>) -> Self {
        let clamp = |v: Option<i32>| v.and_then(|v| u32::try_from(v).ok()).unwrap_or(0);
        Self {
            rows: clamp(rows),
            columns: clamp(columns),
        }
    }

    /// Размеры зала из события; слишком большой зал - ошибка, а не паника.
    pub fn from_event(event: &EventDetail) -> ClientResult<Self> {
        let layout = Self::from_dimensions(event.seat_rows, event.seat_columns);
        if !layout.is_supported() {
            return Err(ClientError::Rejected(format!(
                "hall of {}x{} seats is too large (limit {} seats)",
                layout.rows, layout.columns, MAX_VENUE_SEATS
            )));
        }
        Ok(layout)
    }

    pub fn seat_count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.columns as usize)
    }

    pub fn is_supported(&self) -> bool {
        self.seat_count() <= MAX_VENUE_SEATS
    }

    pub fn contains(&self, position: SeatPosition) -> bool {
        (1..=self.rows).contains(&position.row) && (1..=self.columns).contains(&position.column)
    }

    /// Индекс места в построчном порядке.
    pub fn index_of(&self, position: SeatPosition) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = (position.row - 1) as usize;
        let column = (position.column - 1) as usize;
        Some(row * self.columns as usize + column)
    }

    /// Все места построчно: (1,1), (1,2), ..., (rows, columns).
    pub fn positions(&self) -> impl Iterator<Item = SeatPosition> {
        let columns = self.columns;
        (1..=self.rows).flat_map(move |row| (1..=columns).map(move |column| SeatPosition::new(row, column)))
    }
}

/// Занятость, о которой сообщил бэкенд. Дубликаты: выигрывает первый.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupancyMap {
    by_position: HashMap<SeatPosition, SeatOccupancy>,
}

impl OccupancyMap {
    pub fn from_reported(reported: &[Seat]) -> Self {
        let mut by_position = HashMap::with_capacity(reported.len());
        for seat in reported {
            if let Some(position) = SeatPosition::from_seat(seat) {
                by_position
                    .entry(position)
                    .or_insert_with(|| SeatOccupancy::from_reported(seat.status.as_deref()));
            }
        }
        Self { by_position }
    }

    pub fn get(&self, position: SeatPosition) -> SeatOccupancy {
        self.by_position
            .get(&position)
            .copied()
            .unwrap_or(SeatOccupancy::Free)
    }

    pub fn is_blocked(&self, position: SeatPosition) -> bool {
        !self.get(position).is_selectable()
    }
}

/// Полная сетка зала по данным бэкенда, без локального выбора.
/// Для зала больше `MAX_VENUE_SEATS` сетка пустая.
pub fn build_grid(layout: VenueLayout, reported: &[Seat]) -> Vec<SeatCell> {
    let occupancy = OccupancyMap::from_reported(reported);
    grid_with(layout, |position| occupancy.get(position))
}

pub(crate) fn grid_with(
    layout: VenueLayout,
    mut state_of: impl FnMut(SeatPosition) -> SeatOccupancy,
) -> Vec<SeatCell> {
    if !layout.is_supported() {
        warn!(
            "Refusing to build a {}x{} seat grid",
            layout.rows, layout.columns
        );
        return Vec::new();
    }
    let mut seats = Vec::with_capacity(layout.seat_count());
    for position in layout.positions() {
        seats.push(SeatCell {
            position,
            state: state_of(position),
        });
    }
    seats
}
