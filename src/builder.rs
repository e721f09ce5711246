//! Puzzle construction: from an explicit list of word slots, or from a raw
//! character grid with black squares.
//!
//! Both entry points either return a fully consistent [`Puzzle`] or a
//! [`BuildError`] naming what was wrong with the input. No partially built
//! puzzle is ever observable.

use std::collections::BTreeMap;

use log::debug;

use crate::errors::BuildError;
use crate::grid::{Cell, Direction, Puzzle, Slot, SlotId, BLACK_SQUARE, WILDCARD};

impl Puzzle {
    /// Build a puzzle from an explicit list of word slots.
    ///
    /// Allocates an all-wildcard grid, then walks each slot's cells in
    /// direction order, writing its characters into the grid and recording
    /// the slot id on the matching orientation field of every cell it
    /// occupies. Characters are normalized to uppercase. After placement,
    /// cells claimed by no slot must still be wildcards; they become black
    /// squares.
    ///
    /// # Errors
    /// - [`BuildError::OutOfBounds`] if a slot runs outside the grid
    /// - [`BuildError::DuplicateSlotId`] if two slots share an identity
    /// - [`BuildError::ConflictingCharacter`] if two slots disagree on a
    ///   shared cell's letter
    /// - [`BuildError::ConflictingSlotAssignment`] if a cell is claimed
    ///   twice in the same orientation
    /// - [`BuildError::OrphanedCharacter`] if a concrete letter ends up in
    ///   a cell outside every slot
    pub fn from_slots(
        height: usize,
        width: usize,
        input_slots: Vec<Slot>,
    ) -> Result<Puzzle, BuildError> {
        let mut grid = vec![vec![Cell::default(); width]; height];
        let mut slots: BTreeMap<SlotId, Slot> = BTreeMap::new();

        for mut slot in input_slots {
            for ch in &mut slot.cells {
                *ch = ch.to_ascii_uppercase();
            }
            let id = slot.id;
            let len = slot.len();

            // The whole run must fit inside the grid.
            let fits = match id.direction {
                Direction::Across => id.row < height && id.col + len <= width,
                Direction::Down => id.row + len <= height && id.col < width,
            };
            if !fits {
                return Err(BuildError::OutOfBounds { slot: id, len, height, width });
            }

            if slots.contains_key(&id) {
                return Err(BuildError::DuplicateSlotId(id));
            }

            for (offset, &ch) in slot.cells.iter().enumerate() {
                let (row, col) = id.cell_at(offset);
                let cell = &mut grid[row][col];

                if cell.ch != WILDCARD && cell.ch != ch {
                    return Err(BuildError::ConflictingCharacter {
                        row,
                        col,
                        existing: cell.ch,
                        incoming: ch,
                    });
                }
                cell.ch = ch;

                let claim = match id.direction {
                    Direction::Across => &mut cell.across,
                    Direction::Down => &mut cell.down,
                };
                if let Some(claimed_by) = *claim {
                    return Err(BuildError::ConflictingSlotAssignment { row, col, claimed_by });
                }
                *claim = Some(id);
            }

            slots.insert(id, slot);
        }

        // Cells no slot claims must still be unknown; they become the black
        // squares of the finished puzzle.
        for (row, grid_row) in grid.iter_mut().enumerate() {
            for (col, cell) in grid_row.iter_mut().enumerate() {
                if cell.across.is_none() && cell.down.is_none() {
                    if cell.ch != WILDCARD {
                        return Err(BuildError::OrphanedCharacter { row, col, ch: cell.ch });
                    }
                    cell.ch = BLACK_SQUARE;
                }
            }
        }

        debug!("built {height}x{width} puzzle with {} slots", slots.len());
        Ok(Puzzle { height, width, grid, slots })
    }

    /// Build a puzzle from a raw character grid.
    ///
    /// Each row is a string of letters, wildcards ([`WILDCARD`]), and black
    /// squares ([`BLACK_SQUARE`]); letters are normalized to uppercase.
    /// Word positions are derived by scanning for maximal runs of non-black
    /// cells, first row by row for across slots, then column by column for
    /// down slots. A run of length 1 has no crossing value and is not
    /// registered as a slot.
    ///
    /// # Errors
    /// [`BuildError::IrregularGrid`] if the grid is empty or its rows have
    /// differing lengths.
    pub fn from_raw_grid(rows: &[&str]) -> Result<Puzzle, BuildError> {
        let height = rows.len();
        if height == 0 {
            return Err(BuildError::IrregularGrid { detail: "grid has no rows".into() });
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(BuildError::IrregularGrid { detail: "grid rows are empty".into() });
        }
        for (row, raw) in rows.iter().enumerate() {
            let found = raw.chars().count();
            if found != width {
                return Err(BuildError::IrregularGrid {
                    detail: format!("row {row} has length {found}, expected {width}"),
                });
            }
        }

        let mut grid = vec![vec![Cell::default(); width]; height];
        for (row, raw) in rows.iter().enumerate() {
            for (col, ch) in raw.chars().enumerate() {
                grid[row][col].ch = ch.to_ascii_uppercase();
            }
        }

        let mut slots: BTreeMap<SlotId, Slot> = BTreeMap::new();
        derive_slots(&mut grid, &mut slots, height, width, Direction::Across);
        derive_slots(&mut grid, &mut slots, height, width, Direction::Down);

        debug!("derived {} slots from {height}x{width} raw grid", slots.len());
        Ok(Puzzle { height, width, grid, slots })
    }
}

/// Scan every line of the given orientation for maximal runs of non-black
/// cells, registering each run of length >= 2 as a slot and backfilling the
/// slot id into the cells it covers.
fn derive_slots(
    grid: &mut [Vec<Cell>],
    slots: &mut BTreeMap<SlotId, Slot>,
    height: usize,
    width: usize,
    direction: Direction,
) {
    let (lines, line_len) = match direction {
        Direction::Across => (height, width),
        Direction::Down => (width, height),
    };

    for line in 0..lines {
        let mut start: Option<usize> = None;
        let mut run: Vec<char> = Vec::new();

        // One past the end so the final run is flushed like any other.
        for pos in 0..=line_len {
            let ch = (pos < line_len).then(|| {
                let (row, col) = coords(direction, line, pos);
                grid[row][col].ch
            });

            match ch {
                Some(ch) if ch != BLACK_SQUARE => {
                    if start.is_none() {
                        start = Some(pos);
                    }
                    run.push(ch);
                }
                _ => {
                    if let Some(begin) = start.take() {
                        if run.len() >= 2 {
                            let (row, col) = coords(direction, line, begin);
                            let slot = Slot::new(row, col, direction, run.clone());
                            let id = slot.id;
                            for offset in 0..run.len() {
                                let (r, c) = id.cell_at(offset);
                                match direction {
                                    Direction::Across => grid[r][c].across = Some(id),
                                    Direction::Down => grid[r][c].down = Some(id),
                                }
                            }
                            slots.insert(id, slot);
                        }
                        run.clear();
                    }
                }
            }
        }
    }
}

/// (row, col) of position `pos` along line `line` of the given orientation.
fn coords(direction: Direction, line: usize, pos: usize) -> (usize, usize) {
    match direction {
        Direction::Across => (line, pos),
        Direction::Down => (pos, line),
    }
}
