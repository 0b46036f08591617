use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::grid::{grid_with, OccupancyMap, SeatCell, SeatOccupancy, SeatPosition, VenueLayout};
use super::selection::SeatSelection;
use crate::models::Seat;

/// Что произошло при нажатии на место.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Продано или заблокировано другим пользователем.
    Unavailable,
    /// Уже выбрано максимальное число мест.
    LimitReached,
    /// Такого места нет в зале.
    OutOfBounds,
}

/// Неизменяемый снимок сетки и выбора, который получают наблюдатели.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    pub layout: VenueLayout,
    pub seats: Vec<SeatCell>,
    pub selected: Vec<SeatPosition>,
}

impl SelectionSnapshot {
    fn empty() -> Self {
        Self {
            layout: VenueLayout::default(),
            seats: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn seat(&self, position: SeatPosition) -> Option<&SeatCell> {
        self.layout
            .index_of(position)
            .and_then(|index| self.seats.get(index))
    }

    pub fn state_of(&self, position: SeatPosition) -> Option<SeatOccupancy> {
        self.seat(position).map(|cell| cell.state)
    }

    pub fn count(&self, state: SeatOccupancy) -> usize {
        self.seats.iter().filter(|cell| cell.state == state).count()
    }

    /// Выбранные места в формате запроса к бэкенду.
    pub fn selected_seats(&self) -> Vec<Seat> {
        self.selected.iter().map(|p| p.to_seat()).collect()
    }
}

/// Сводит занятость от бэкенда с локальным выбором пользователя.
///
/// Место `SelectedByMe` тогда и только тогда, когда оно в выборе и бэкенд
/// не сообщил о нём `Sold`/`LockedByOther`; иначе состояние - то, что
/// сообщил бэкенд (или `Free`). Каждая операция публикует новый снимок
/// до возврата, поэтому наблюдатели никогда не видят промежуточных данных.
#[derive(Debug)]
pub struct SeatSelectionReconciler {
    layout: VenueLayout,
    occupancy: OccupancyMap,
    selection: SeatSelection,
    snapshot: watch::Sender<Arc<SelectionSnapshot>>,
}

impl SeatSelectionReconciler {
    pub fn new(max_seats: usize) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(SelectionSnapshot::empty()));
        Self {
            layout: VenueLayout::default(),
            occupancy: OccupancyMap::default(),
            selection: SeatSelection::new(max_seats),
            snapshot,
        }
    }

    /// Новая сессия выбора: выбор очищается, сетка строится заново.
    pub fn reset(&mut self, layout: VenueLayout, reported: &[Seat]) {
        self.layout = layout;
        self.occupancy = OccupancyMap::from_reported(reported);
        self.selection.clear();
        info!(
            "Seat grid rebuilt: {}x{} ({} reported seats)",
            layout.rows,
            layout.columns,
            reported.len()
        );
        self.publish();
    }

    /// Свежая занятость без сброса сессии. Места, которые бэкенд теперь
    /// считает занятыми, выпадают из выбора.
    pub fn merge_occupancy(&mut self, reported: &[Seat]) {
        self.occupancy = OccupancyMap::from_reported(reported);
        let occupancy = &self.occupancy;
        let dropped = self.selection.retain(|p| !occupancy.is_blocked(*p));
        if dropped > 0 {
            info!("{} selected seats were taken by someone else", dropped);
        }
        self.publish();
    }

    pub fn toggle(&mut self, position: SeatPosition) -> ToggleOutcome {
        let outcome = self.apply_toggle(position);
        debug!("Toggle {} -> {:?}", position, outcome);
        if !matches!(outcome, ToggleOutcome::Ignored(_)) {
            self.publish();
        }
        outcome
    }

    fn apply_toggle(&mut self, position: SeatPosition) -> ToggleOutcome {
        if !self.layout.contains(position) {
            return ToggleOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        if !self.effective_state(position).is_selectable() {
            return ToggleOutcome::Ignored(IgnoreReason::Unavailable);
        }
        if self.selection.remove(position) {
            return ToggleOutcome::Deselected;
        }
        if self.selection.add(position) {
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::Ignored(IgnoreReason::LimitReached)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.publish();
    }

    pub fn selection(&self) -> &SeatSelection {
        &self.selection
    }

    pub fn layout(&self) -> VenueLayout {
        self.layout
    }

    pub fn snapshot(&self) -> Arc<SelectionSnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SelectionSnapshot>> {
        self.snapshot.subscribe()
    }

    fn effective_state(&self, position: SeatPosition) -> SeatOccupancy {
        match self.occupancy.get(position) {
            SeatOccupancy::Free if self.selection.contains(position) => SeatOccupancy::SelectedByMe,
            reported => reported,
        }
    }

    fn publish(&self) {
        let seats = grid_with(self.layout, |p| self.effective_state(p));
        let snapshot = SelectionSnapshot {
            layout: self.layout,
            seats,
            selected: self.selection.positions().to_vec(),
        };
        self.snapshot.send_replace(Arc::new(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u32, column: u32) -> SeatPosition {
        SeatPosition::new(row, column)
    }

    fn three_by_three() -> SeatSelectionReconciler {
        let mut reconciler = SeatSelectionReconciler::new(4);
        reconciler.reset(
            VenueLayout::new(3, 3),
            &[Seat::at(2, 2).with_status("VENDIDO")],
        );
        reconciler
    }

    #[test]
    fn fifth_seat_is_ignored_at_cap() {
        let mut reconciler = three_by_three();
        for p in [pos(1, 1), pos(1, 2), pos(1, 3), pos(2, 1)] {
            assert_eq!(reconciler.toggle(p), ToggleOutcome::Selected);
        }
        assert_eq!(
            reconciler.toggle(pos(3, 3)),
            ToggleOutcome::Ignored(IgnoreReason::LimitReached)
        );
        let snapshot = reconciler.snapshot();
        assert_eq!(snapshot.selected.len(), 4);
        assert_eq!(snapshot.state_of(pos(3, 3)), Some(SeatOccupancy::Free));
        assert_eq!(snapshot.count(SeatOccupancy::SelectedByMe), 4);
    }

    #[test]
    fn sold_seat_cannot_be_selected() {
        let mut reconciler = three_by_three();
        assert_eq!(
            reconciler.toggle(pos(2, 2)),
            ToggleOutcome::Ignored(IgnoreReason::Unavailable)
        );
        assert!(reconciler.selection().is_empty());
        assert_eq!(reconciler.snapshot().state_of(pos(2, 2)), Some(SeatOccupancy::Sold));
    }

    #[test]
    fn toggling_twice_frees_the_seat() {
        let mut reconciler = three_by_three();
        assert_eq!(reconciler.toggle(pos(1, 1)), ToggleOutcome::Selected);
        assert_eq!(
            reconciler.snapshot().state_of(pos(1, 1)),
            Some(SeatOccupancy::SelectedByMe)
        );
        assert_eq!(reconciler.toggle(pos(1, 1)), ToggleOutcome::Deselected);
        let snapshot = reconciler.snapshot();
        assert!(snapshot.selected.is_empty());
        assert_eq!(snapshot.state_of(pos(1, 1)), Some(SeatOccupancy::Free));
    }

    #[test]
    fn out_of_bounds_toggle_is_ignored() {
        let mut reconciler = three_by_three();
        assert_eq!(
            reconciler.toggle(pos(4, 1)),
            ToggleOutcome::Ignored(IgnoreReason::OutOfBounds)
        );
    }

    #[test]
    fn merge_drops_seats_taken_by_others() {
        let mut reconciler = three_by_three();
        reconciler.toggle(pos(1, 1));
        reconciler.toggle(pos(3, 3));

        reconciler.merge_occupancy(&[
            Seat::at(2, 2).with_status("VENDIDO"),
            Seat::at(3, 3).with_status("BLOQUEADO"),
        ]);

        let snapshot = reconciler.snapshot();
        assert_eq!(snapshot.selected, vec![pos(1, 1)]);
        assert_eq!(snapshot.state_of(pos(3, 3)), Some(SeatOccupancy::LockedByOther));
        assert_eq!(snapshot.state_of(pos(1, 1)), Some(SeatOccupancy::SelectedByMe));
    }

    #[test]
    fn reset_clears_previous_selection() {
        let mut reconciler = three_by_three();
        reconciler.toggle(pos(1, 1));
        reconciler.reset(VenueLayout::new(2, 2), &[]);
        let snapshot = reconciler.snapshot();
        assert!(snapshot.selected.is_empty());
        assert_eq!(snapshot.seats.len(), 4);
    }

    #[test]
    fn observers_see_every_published_snapshot() {
        let mut reconciler = three_by_three();
        let mut rx = reconciler.subscribe();
        rx.borrow_and_update();

        reconciler.toggle(pos(1, 2));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().selected, vec![pos(1, 2)]);

        // игнорируемое нажатие снимок не меняет
        reconciler.toggle(pos(2, 2));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn selected_seats_use_backend_shape() {
        let mut reconciler = three_by_three();
        reconciler.toggle(pos(3, 1));
        assert_eq!(reconciler.snapshot().selected_seats(), vec![Seat::at(3, 1)]);
    }
}
