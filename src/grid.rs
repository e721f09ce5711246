//! The puzzle grid model: cells, slot identities, slots, and the `Puzzle`
//! container itself.
//!
//! A [`Puzzle`] stores the same letters twice: once in the 2D grid of
//! [`Cell`]s and once in the per-slot character vectors. The two views must
//! never disagree, so all character writes go through
//! [`Puzzle::set_character`](crate::engine) — nothing else in the crate
//! mutates a cell or a slot directly.

use std::collections::BTreeMap;
use std::fmt;

/// A character in the grid whose value is not yet known.
pub const WILDCARD: char = '.';

/// The character representing a black square in the grid.
pub const BLACK_SQUARE: char = '_';

/// Orientation of a slot. `Across` sorts before `Down`, which makes the
/// (row, col, direction) ordering of [`SlotId`] total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// The identity of a slot: where the word begins and which way it runs.
///
/// Two slots are the same iff row, column, and direction all match. The
/// derived `Ord` is (row, col, direction), which is the iteration order of
/// the puzzle's slot map and therefore the tie-break order for
/// most-constrained selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl SlotId {
    pub fn new(row: usize, col: usize, direction: Direction) -> Self {
        SlotId { row, col, direction }
    }

    /// Grid coordinates of the slot's `offset`-th cell.
    pub fn cell_at(&self, offset: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + offset),
            Direction::Down => (self.row + offset, self.col),
        }
    }
}

impl fmt::Display for SlotId {
    // 1-based coordinates, matching the rendering used in trace output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.row + 1, self.col + 1, self.direction)
    }
}

/// A single word position and its current, possibly partial, contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    /// One character per occupied cell, in reading order. Entries are
    /// [`WILDCARD`] until solved.
    pub cells: Vec<char>,
}

impl Slot {
    pub fn new(row: usize, col: usize, direction: Direction, cells: Vec<char>) -> Self {
        Slot { id: SlotId::new(row, col, direction), cells }
    }

    /// An all-wildcard slot of the given length.
    pub fn wildcards(row: usize, col: usize, direction: Direction, len: usize) -> Self {
        Slot::new(row, col, direction, vec![WILDCARD; len])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells still unknown.
    pub fn wildcard_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == WILDCARD).count()
    }

    /// True once every cell holds a concrete letter.
    pub fn is_complete(&self) -> bool {
        self.wildcard_count() == 0
    }

    /// The slot's contents as a string. Contains wildcard markers while the
    /// slot is incomplete, so only complete slots yield a real word.
    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.id, self.text())
    }
}

/// One square of the grid: its character plus the identities of the across
/// and down words passing through it. `None` means no word of that
/// orientation touches this cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub across: Option<SlotId>,
    pub down: Option<SlotId>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: WILDCARD, across: None, down: None }
    }
}

impl Cell {
    /// The crossing slot relative to a word of direction `direction`
    /// passing through this cell.
    pub fn crossing(&self, direction: Direction) -> Option<SlotId> {
        match direction {
            Direction::Across => self.down,
            Direction::Down => self.across,
        }
    }

    pub fn is_black(&self) -> bool {
        self.ch == BLACK_SQUARE
    }
}

/// A crossword puzzle: the cell grid and the slot map, two synchronized
/// views of the same letters.
///
/// Construction goes through the builder entry points
/// ([`Puzzle::from_slots`], [`Puzzle::from_raw_grid`]); a `Puzzle` in hand
/// is always structurally valid. Cloning is the snapshot primitive used by
/// the solver: each recursion level owns its own copy, so sibling branches
/// never observe each other's partial mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) grid: Vec<Vec<Cell>>,
    pub(crate) slots: BTreeMap<SlotId, Slot>,
}

impl Puzzle {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The cell at (row, col).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.grid[row][col]
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(&id)
    }

    /// All slots in (row, col, direction) key order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot has a wildcard left.
    pub fn is_solved(&self) -> bool {
        self.slots.values().all(Slot::is_complete)
    }

    /// The grid as separator-free rows, suitable for feeding back into
    /// [`Puzzle::from_raw_grid`].
    pub fn to_raw_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .collect()
    }
}

impl fmt::Display for Puzzle {
    // Debugging aid, not a stable format: one row per line, characters
    // separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let mut first = true;
            for cell in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.ch)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
