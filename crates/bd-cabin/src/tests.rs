//! Unit tests for bd-cabin.

use bd_core::{PassengerId, SeatId};

use crate::{CabinError, Cell, FrozenAisle, Grid, Layout, LayoutConfig, MAX_GRID_CELLS, Side};

fn a320() -> Layout {
    Layout::new(LayoutConfig::airbus_a320()).unwrap()
}

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn a320_dimensions() {
        let l = a320();
        assert_eq!(l.seat_count(), 29 * 6);
        // 6 entrance + 2*28 + 1 + 6 tail
        assert_eq!(l.grid_rows(), 69);
        assert_eq!(l.entrance(), Cell::new(0, 3));
    }

    #[test]
    fn seat_cells_follow_pitch() {
        let l = a320();
        let s = l.seat_at(0, 0).unwrap();
        assert_eq!(s.cell, Cell::new(6, 0));
        let s = l.seat_at(28, 6).unwrap();
        assert_eq!(s.cell, Cell::new(62, 6));
        assert!(l.seat_at(0, 3).is_none(), "aisle column has no seat");
        assert!(l.seat_at(29, 0).is_none());
    }

    #[test]
    fn seat_ids_are_row_major_and_unique() {
        let l = a320();
        for (i, s) in l.seats().iter().enumerate() {
            assert_eq!(s.id, SeatId(i as u32));
        }
        let mut cells: Vec<Cell> = l.seats().iter().map(|s| s.cell).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), l.seat_count());
    }

    #[test]
    fn labels_skip_the_aisle() {
        let l = a320();
        let labels: Vec<String> = (0..7)
            .filter_map(|c| l.seat_at(11, c))
            .map(|s| s.label())
            .collect();
        assert_eq!(labels, ["12A", "12B", "12C", "12D", "12E", "12F"]);
    }

    #[test]
    fn seat_at_cell_inverts_cell() {
        let l = a320();
        for s in l.seats() {
            assert_eq!(l.seat_at_cell(s.cell).map(|x| x.id), Some(s.id));
        }
        assert!(l.seat_at_cell(Cell::new(7, 0)).is_none(), "between rows");
        assert!(l.seat_at_cell(Cell::new(2, 0)).is_none(), "entrance area");
    }

    #[test]
    fn sides_and_aisle_distance() {
        let l = a320();
        let window = l.seat_at(0, 0).unwrap();
        assert_eq!((window.side, window.aisle_distance), (Side::Left, 3));
        let aisle_right = l.seat_at(0, 4).unwrap();
        assert_eq!((aisle_right.side, aisle_right.aisle_distance), (Side::Right, 1));
    }

    #[test]
    fn seats_between_aisle_nearest_seat_first() {
        let l = a320();
        let window_left = l.seat_at(3, 0).unwrap().id;
        let between: Vec<u32> = l
            .seats_between_aisle(window_left)
            .unwrap()
            .into_iter()
            .map(|id| l.seat(id).unwrap().column)
            .collect();
        assert_eq!(between, [1, 2]);

        let window_right = l.seat_at(3, 6).unwrap().id;
        let between: Vec<u32> = l
            .seats_between_aisle(window_right)
            .unwrap()
            .into_iter()
            .map(|id| l.seat(id).unwrap().column)
            .collect();
        assert_eq!(between, [5, 4]);

        let aisle_seat = l.seat_at(3, 2).unwrap().id;
        assert!(l.seats_between_aisle(aisle_seat).unwrap().is_empty());
    }

    #[test]
    fn compact_has_room_for_widest_shuffle() {
        let cfg = LayoutConfig::compact(3, 7, 3);
        assert_eq!(cfg.max_blockers(), 2);
        assert_eq!(cfg.tail_length, 2);
        assert_eq!(cfg.grid_rows(), 1 + 2 + 1 + 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_configs_rejected() {
        let bad = [
            LayoutConfig { seat_rows: 0, ..LayoutConfig::compact(1, 5, 2) },
            LayoutConfig { columns: 1, aisle_column: 0, ..LayoutConfig::compact(1, 5, 2) },
            LayoutConfig { aisle_column: 5, ..LayoutConfig::compact(1, 5, 2) },
            LayoutConfig { entrance_length: 0, ..LayoutConfig::compact(1, 5, 2) },
            LayoutConfig { row_pitch: 0, ..LayoutConfig::compact(1, 5, 2) },
            LayoutConfig { tail_length: 0, ..LayoutConfig::compact(1, 7, 3) },
        ];
        for cfg in bad {
            assert!(
                matches!(Layout::new(cfg.clone()), Err(CabinError::Config(_))),
                "{cfg:?} should be rejected"
            );
        }
    }

    #[test]
    fn oversized_grids_rejected() {
        let huge = [
            LayoutConfig::compact(700_000_000, 7, 3),
            LayoutConfig::compact(1, u32::MAX, 2),
            LayoutConfig { row_pitch: u32::MAX, ..LayoutConfig::compact(u32::MAX, 7, 3) },
            LayoutConfig { entrance_length: u32::MAX, tail_length: u32::MAX, ..LayoutConfig::compact(1, 5, 2) },
        ];
        for cfg in huge {
            let err = Layout::new(cfg.clone()).err();
            assert!(matches!(err, Some(CabinError::Config(_))), "{cfg:?} should be rejected");
        }

        // just under the cap is still a valid cabin description
        let rows = (MAX_GRID_CELLS / 7) as u32 - 4;
        assert!(LayoutConfig::compact(rows, 7, 3).validate().is_ok());
    }

    #[test]
    fn assign_is_exclusive() {
        let mut l = a320();
        l.assign(SeatId(0), PassengerId(0)).unwrap();
        let err = l.assign(SeatId(0), PassengerId(1)).unwrap_err();
        assert!(matches!(err, CabinError::SeatAlreadyAssigned { .. }));
        assert_eq!(l.assigned_count(), 1);
    }

    #[test]
    fn all_assigned_occupied_ignores_empty_seats() {
        let mut l = a320();
        assert!(l.all_assigned_occupied());
        l.assign(SeatId(5), PassengerId(0)).unwrap();
        assert!(!l.all_assigned_occupied());
        l.set_occupied(SeatId(5), true).unwrap();
        assert!(l.all_assigned_occupied());
        assert_eq!(l.occupied_count(), 1);
    }

    #[test]
    fn occupancy_transitions_are_counted() {
        let mut l = a320();
        l.set_occupied(SeatId(2), true).unwrap();
        l.set_occupied(SeatId(2), true).unwrap();
        l.set_occupied(SeatId(2), false).unwrap();
        l.set_occupied(SeatId(2), false).unwrap();
        l.set_occupied(SeatId(2), true).unwrap();
        let seat = l.seat(SeatId(2)).unwrap();
        assert_eq!((seat.times_filled, seat.times_vacated), (2, 1));
        assert!(seat.occupied);
    }
}

#[cfg(test)]
mod grid_tests {
    use super::*;

    #[test]
    fn place_move_remove() {
        let mut g = Grid::new(4, 3, 2);
        let p = PassengerId(0);
        g.place(p, Cell::new(0, 1)).unwrap();
        assert!(!g.is_empty_cell(Cell::new(0, 1)));
        assert_eq!(g.position(p), Some(Cell::new(0, 1)));

        g.move_to(p, Cell::new(1, 1)).unwrap();
        assert!(g.is_empty_cell(Cell::new(0, 1)));
        assert_eq!(g.occupant(Cell::new(1, 1)), Some(p));

        assert_eq!(g.remove(p).unwrap(), Cell::new(1, 1));
        assert!(g.is_empty());
        assert_eq!(g.position(p), None);
    }

    #[test]
    fn occupied_cell_rejected_without_side_effects() {
        let mut g = Grid::new(4, 3, 2);
        g.place(PassengerId(0), Cell::new(0, 1)).unwrap();
        g.place(PassengerId(1), Cell::new(1, 1)).unwrap();

        let err = g.move_to(PassengerId(0), Cell::new(1, 1)).unwrap_err();
        assert!(matches!(err, CabinError::Occupied { by: PassengerId(1), .. }));
        assert_eq!(g.position(PassengerId(0)), Some(Cell::new(0, 1)));
        assert_eq!(g.occupant(Cell::new(1, 1)), Some(PassengerId(1)));

        let err = g.place(PassengerId(2), Cell::new(0, 1)).unwrap_err();
        assert!(matches!(err, CabinError::Occupied { .. }));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut g = Grid::new(2, 2, 1);
        assert!(matches!(
            g.place(PassengerId(0), Cell::new(2, 0)),
            Err(CabinError::OutOfBounds(_))
        ));
        g.place(PassengerId(0), Cell::new(1, 1)).unwrap();
        assert!(matches!(
            g.move_to(PassengerId(0), Cell::new(1, 2)),
            Err(CabinError::OutOfBounds(_))
        ));
        assert!(!g.is_empty_cell(Cell::new(5, 5)));
    }

    #[test]
    fn double_place_and_unplaced_ops_rejected() {
        let mut g = Grid::new(2, 2, 1);
        g.place(PassengerId(0), Cell::new(0, 0)).unwrap();
        assert!(matches!(
            g.place(PassengerId(0), Cell::new(1, 1)),
            Err(CabinError::AlreadyPlaced(_))
        ));
        assert!(matches!(g.remove(PassengerId(1)), Err(CabinError::NotPlaced(_))));
        assert!(matches!(
            g.move_to(PassengerId(1), Cell::new(1, 1)),
            Err(CabinError::NotPlaced(_))
        ));
    }

    #[test]
    fn occupants_and_coords() {
        let mut g = Grid::new(3, 2, 3);
        g.place(PassengerId(2), Cell::new(2, 0)).unwrap();
        g.place(PassengerId(0), Cell::new(0, 1)).unwrap();
        let occ: Vec<_> = g.occupants().collect();
        assert_eq!(occ, [(Cell::new(0, 1), PassengerId(0)), (Cell::new(2, 0), PassengerId(2))]);
        assert_eq!(g.coords().count(), 6);
    }

    #[test]
    fn grows_for_unseen_ids() {
        let mut g = Grid::new(2, 2, 0);
        g.place(PassengerId(3), Cell::new(1, 0)).unwrap();
        assert_eq!(g.position(PassengerId(3)), Some(Cell::new(1, 0)));
    }
}

#[cfg(test)]
mod frozen_tests {
    use super::*;

    #[test]
    fn freeze_and_release() {
        let mut f = FrozenAisle::new(10);
        f.freeze(3..=5, PassengerId(1)).unwrap();
        assert_eq!(f.frozen_rows().collect::<Vec<_>>(), [3, 4, 5]);
        assert!(f.blocks(4, None));
        assert!(f.blocks(4, Some(PassengerId(2))));
        assert!(!f.blocks(4, Some(PassengerId(1))), "owner group may pass");
        assert_eq!(f.release(PassengerId(1)), 3);
        assert_eq!(f.frozen_count(), 0);
    }

    #[test]
    fn overlapping_ranges_are_exclusive() {
        let mut f = FrozenAisle::new(10);
        f.freeze(3..=5, PassengerId(1)).unwrap();
        assert!(!f.can_freeze(5..=6));
        let err = f.freeze(5..=6, PassengerId(2)).unwrap_err();
        assert!(matches!(err, CabinError::FrozenConflict { row: 5, owner: PassengerId(1) }));
        assert!(!f.is_frozen(6), "failed freeze leaves no partial reservation");
        assert!(f.can_freeze(6..=7));
    }

    #[test]
    fn out_of_range_rows_cannot_freeze() {
        let mut f = FrozenAisle::new(4);
        assert!(!f.can_freeze(3..=4));
        assert!(f.freeze(3..=4, PassengerId(0)).is_err());
        assert_eq!(f.flags(), [false; 4]);
    }
}
