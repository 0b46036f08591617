use proptest::prelude::*;

use ticket_client::models::Seat;
use ticket_client::seating::{
    build_grid, SeatOccupancy, SeatPosition, SeatSelectionReconciler, VenueLayout,
};

fn reported_seat() -> impl Strategy<Value = Seat> {
    (
        -2..12i32,
        -2..12i32,
        prop_oneof![
            Just(None),
            Just(Some("VENDIDO")),
            Just(Some("bloqueado")),
            Just(Some("LIBRE")),
        ],
    )
        .prop_map(|(row, column, status)| Seat {
            row,
            column,
            status: status.map(str::to_string),
            attendee: None,
        })
}

fn taps() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0..10u32, 0..10u32), 0..40)
}

proptest! {
    #[test]
    fn grid_covers_every_position_once(
        rows in 0..10u32,
        columns in 0..10u32,
        reported in prop::collection::vec(reported_seat(), 0..30),
    ) {
        let layout = VenueLayout::new(rows, columns);
        let grid = build_grid(layout, &reported);
        prop_assert_eq!(grid.len(), (rows * columns) as usize);

        let positions: Vec<SeatPosition> = grid.iter().map(|c| c.position).collect();
        let expected: Vec<SeatPosition> = layout.positions().collect();
        prop_assert_eq!(positions, expected);
        prop_assert!(grid.iter().all(|c| c.state != SeatOccupancy::SelectedByMe));
    }

    #[test]
    fn selection_never_exceeds_cap_nor_holds_taken_seats(
        reported in prop::collection::vec(reported_seat(), 0..30),
        taps in taps(),
        cap in 1..6usize,
    ) {
        let mut reconciler = SeatSelectionReconciler::new(cap);
        reconciler.reset(VenueLayout::new(8, 8), &reported);

        for (row, column) in taps {
            reconciler.toggle(SeatPosition::new(row, column));
            let snapshot = reconciler.snapshot();
            prop_assert!(snapshot.selected.len() <= cap);
            for position in &snapshot.selected {
                prop_assert_eq!(snapshot.state_of(*position), Some(SeatOccupancy::SelectedByMe));
            }
            prop_assert_eq!(
                snapshot.count(SeatOccupancy::SelectedByMe),
                snapshot.selected.len()
            );
        }
    }

    #[test]
    fn toggling_twice_restores_selection(
        taps in taps(),
        row in 1..=5u32,
        column in 1..=5u32,
    ) {
        let mut reconciler = SeatSelectionReconciler::new(4);
        reconciler.reset(VenueLayout::new(5, 5), &[]);
        for (r, c) in taps {
            reconciler.toggle(SeatPosition::new(r, c));
        }
        let before = reconciler.snapshot();

        let seat = SeatPosition::new(row, column);
        reconciler.toggle(seat);
        reconciler.toggle(seat);
        let after = reconciler.snapshot();

        let mut expected = before.selected.clone();
        let mut actual = after.selected.clone();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(&after.seats, &before.seats);
    }

    #[test]
    fn merge_prunes_seats_reported_taken(
        taps in taps(),
        reported in prop::collection::vec(reported_seat(), 0..30),
    ) {
        let mut reconciler = SeatSelectionReconciler::new(4);
        reconciler.reset(VenueLayout::new(10, 10), &[]);
        for (r, c) in taps {
            reconciler.toggle(SeatPosition::new(r, c));
        }
        reconciler.merge_occupancy(&reported);

        let snapshot = reconciler.snapshot();
        for position in &snapshot.selected {
            prop_assert_eq!(snapshot.state_of(*position), Some(SeatOccupancy::SelectedByMe));
        }
    }
}
