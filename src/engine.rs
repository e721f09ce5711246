//! The constraint engine: slot selection and the single mutation primitive
//! the solver drives the search with.
//!
//! [`Puzzle::set_character`] is the only writer of cell and slot
//! characters in the crate. It mirrors every write into the across and
//! down slots passing through the cell, which is what keeps the grid view
//! and the slot-map view of the puzzle in agreement.

use crate::errors::FillError;
use crate::grid::{Puzzle, Slot, WILDCARD};

impl Puzzle {
    /// The slot with the fewest remaining wildcards among slots that still
    /// have at least one, or `None` when every slot is complete (the
    /// solved-terminal signal).
    ///
    /// Ties break toward the earliest slot in (row, col, direction) key
    /// order, so selection is deterministic.
    pub fn most_constrained(&self) -> Option<&Slot> {
        self.slots
            .values()
            .filter_map(|slot| {
                let unknowns = slot.wildcard_count();
                (unknowns > 0).then_some((unknowns, slot))
            })
            // min_by_key keeps the first minimum, i.e. the earliest key.
            .min_by_key(|&(unknowns, _)| unknowns)
            .map(|(_, slot)| slot)
    }

    /// Set the cell at (row, col) to `value`, normalized to uppercase, and
    /// mirror the write into the across and down slots through that cell.
    ///
    /// Writing the value a cell already holds is a no-op success. A
    /// concrete letter is never overwritten by a different concrete
    /// letter; that returns [`FillError::OverwriteConflict`] and leaves
    /// the puzzle untouched.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn set_character(&mut self, value: char, row: usize, col: usize) -> Result<(), FillError> {
        let value = value.to_ascii_uppercase();
        let cell = self.grid[row][col];

        if cell.ch == value {
            return Ok(());
        }
        if cell.ch != WILDCARD && value != WILDCARD {
            return Err(FillError::OverwriteConflict {
                row,
                col,
                existing: cell.ch,
                attempted: value,
            });
        }

        self.grid[row][col].ch = value;
        if let Some(id) = cell.across {
            if let Some(slot) = self.slots.get_mut(&id) {
                slot.cells[col - id.col] = value;
            }
        }
        if let Some(id) = cell.down {
            if let Some(slot) = self.slots.get_mut(&id) {
                slot.cells[row - id.row] = value;
            }
        }
        Ok(())
    }

    /// Reset the cell at (row, col) to the wildcard marker, undoing a
    /// prior [`set_character`](Puzzle::set_character).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn clear_character(&mut self, row: usize, col: usize) {
        // A wildcard write never hits the overwrite check, so this cannot
        // fail.
        let _ = self.set_character(WILDCARD, row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, SlotId};

    fn open_3x3() -> Puzzle {
        Puzzle::from_raw_grid(&["...", "...", "..."]).unwrap()
    }

    #[test]
    fn test_set_character_mirrors_into_both_slots() {
        let mut puzzle = open_3x3();
        puzzle.set_character('q', 1, 2).unwrap();

        assert_eq!(puzzle.cell(1, 2).ch, 'Q');
        let across = puzzle.slot(SlotId::new(1, 0, Direction::Across)).unwrap();
        assert_eq!(across.cells[2], 'Q');
        let down = puzzle.slot(SlotId::new(0, 2, Direction::Down)).unwrap();
        assert_eq!(down.cells[1], 'Q');
    }

    #[test]
    fn test_set_character_is_idempotent_on_equal_value() {
        let mut puzzle = open_3x3();
        puzzle.set_character('A', 0, 0).unwrap();
        let snapshot = puzzle.clone();

        // Same letter again, in either case, changes nothing.
        puzzle.set_character('A', 0, 0).unwrap();
        puzzle.set_character('a', 0, 0).unwrap();
        assert_eq!(puzzle, snapshot);
    }

    #[test]
    fn test_set_character_refuses_to_overwrite() {
        let mut puzzle = open_3x3();
        puzzle.set_character('A', 0, 0).unwrap();
        let snapshot = puzzle.clone();

        let err = puzzle.set_character('B', 0, 0).unwrap_err();
        assert_eq!(
            err,
            FillError::OverwriteConflict { row: 0, col: 0, existing: 'A', attempted: 'B' }
        );
        // The failed write left no trace.
        assert_eq!(puzzle, snapshot);
    }

    #[test]
    fn test_clear_character_restores_wildcard_everywhere() {
        let mut puzzle = open_3x3();
        let initial = puzzle.clone();

        puzzle.set_character('Z', 2, 1).unwrap();
        puzzle.clear_character(2, 1);

        assert_eq!(puzzle, initial);
    }

    #[test]
    fn test_most_constrained_prefers_fewest_wildcards() {
        let mut puzzle = open_3x3();
        // Fill most of the middle row: (1, 0) across now has 1 wildcard.
        puzzle.set_character('C', 1, 0).unwrap();
        puzzle.set_character('A', 1, 1).unwrap();

        let slot = puzzle.most_constrained().unwrap();
        assert_eq!(slot.id, SlotId::new(1, 0, Direction::Across));
        assert_eq!(slot.wildcard_count(), 1);
    }

    #[test]
    fn test_most_constrained_breaks_ties_by_key_order() {
        let puzzle = open_3x3();
        // All six slots have 3 wildcards; the earliest key wins.
        let slot = puzzle.most_constrained().unwrap();
        assert_eq!(slot.id, SlotId::new(0, 0, Direction::Across));
    }

    #[test]
    fn test_most_constrained_skips_complete_slots() {
        let mut puzzle = Puzzle::from_raw_grid(&["..", ".."]).unwrap();
        for (row, col, ch) in [(0, 0, 'A'), (0, 1, 'B'), (1, 0, 'C'), (1, 1, 'D')] {
            puzzle.set_character(ch, row, col).unwrap();
        }

        assert!(puzzle.is_solved());
        assert!(puzzle.most_constrained().is_none());
    }
}
