//! Error types for puzzle construction and fill-in trials, with error codes
//! and helpful messages.
//!
//! # Error Codes
//!
//! Builder errors (construction fails closed, no partial puzzle escapes):
//!
//! - E001: `ConflictingCharacter` (two slots disagree on a shared cell)
//! - E002: `DuplicateSlotId` (two input slots share an identity)
//! - E003: `ConflictingSlotAssignment` (a cell claimed twice in one orientation)
//! - E004: `OrphanedCharacter` (a concrete letter in a cell no slot covers)
//! - E005: `IrregularGrid` (ragged or empty raw grid)
//! - E006: `OutOfBounds` (a slot runs off the grid)
//!
//! Fill errors (raised during a candidate trial, always recovered by
//! rollback, never surfaced to callers):
//!
//! - F001: `OverwriteConflict` (a concrete letter would be overwritten)
//! - F002: `InvalidCrossingWord` (a completed crossing word is not in the list)
//!
//! # Examples
//!
//! ```
//! use crossfill::errors::BuildError;
//! use crossfill::grid::Puzzle;
//!
//! match Puzzle::from_raw_grid(&["AB", "C"]) {
//!     Err(e) => {
//!         println!("Error: {e}");
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {help}");
//!         }
//!     }
//!     Ok(_) => println!("Built"),
//! }
//! ```

use crate::grid::SlotId;

/// Errors raised while constructing a [`Puzzle`](crate::grid::Puzzle).
///
/// Every variant means the input description was inconsistent; the builder
/// returns the error instead of a partially built puzzle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Two slots wrote different concrete letters into the same cell.
    #[error("conflicting characters at ({row}, {col}): '{existing}' vs '{incoming}'")]
    ConflictingCharacter { row: usize, col: usize, existing: char, incoming: char },

    /// Two input slots carry the same (row, col, direction) identity.
    #[error("duplicate slot id {0}")]
    DuplicateSlotId(SlotId),

    /// A cell already belongs to another slot of the same orientation.
    #[error("cell ({row}, {col}) is already part of {claimed_by}")]
    ConflictingSlotAssignment { row: usize, col: usize, claimed_by: SlotId },

    /// A concrete letter ended up in a cell that no slot covers.
    #[error("orphaned character '{ch}' at ({row}, {col}) outside every slot")]
    OrphanedCharacter { row: usize, col: usize, ch: char },

    /// The raw grid was empty or its rows had differing lengths.
    #[error("irregular grid: {detail}")]
    IrregularGrid { detail: String },

    /// A slot's cells fall outside the grid bounds.
    #[error("slot {slot} of length {len} runs outside the {height}x{width} grid")]
    OutOfBounds { slot: SlotId, len: usize, height: usize, width: usize },
}

impl BuildError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::ConflictingCharacter { .. } => "E001",
            BuildError::DuplicateSlotId(_) => "E002",
            BuildError::ConflictingSlotAssignment { .. } => "E003",
            BuildError::OrphanedCharacter { .. } => "E004",
            BuildError::IrregularGrid { .. } => "E005",
            BuildError::OutOfBounds { .. } => "E006",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            BuildError::ConflictingCharacter { .. } => {
                Some("Crossing slots must agree on the letter of every shared cell")
            }
            BuildError::DuplicateSlotId(_) => {
                Some("Each (row, column, direction) may start at most one word")
            }
            BuildError::ConflictingSlotAssignment { .. } => {
                Some("Two words of the same orientation cannot overlap; check the slot lengths")
            }
            BuildError::OrphanedCharacter { .. } => {
                Some("Letters may only appear in cells covered by at least one word")
            }
            BuildError::IrregularGrid { .. } => {
                Some("Every row of the grid must be the same non-zero length")
            }
            BuildError::OutOfBounds { .. } => {
                Some("The word's start position plus its length must fit inside the grid")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Errors raised inside a candidate trial by the constraint engine.
///
/// These never escape the solver: each one turns into "roll back and try
/// the next candidate" (or "report failure upward" once candidates are
/// exhausted). They exist as a type so trial outcomes can be logged and
/// traced with a reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    /// The cell already holds a different concrete letter. Concrete letters
    /// are never overwritten.
    #[error("cannot overwrite '{existing}' at ({row}, {col}) with '{attempted}'")]
    OverwriteConflict { row: usize, col: usize, existing: char, attempted: char },

    /// Placing a letter completed a crossing slot whose word is not in the
    /// candidate list.
    #[error("crossing slot {slot} completed invalid word '{word}'")]
    InvalidCrossingWord { slot: SlotId, word: String },
}

impl FillError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FillError::OverwriteConflict { .. } => "F001",
            FillError::InvalidCrossingWord { .. } => "F002",
        }
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    #[test]
    fn test_build_error_codes_are_unique() {
        let id = SlotId::new(0, 0, Direction::Across);
        let errors = vec![
            BuildError::ConflictingCharacter { row: 0, col: 0, existing: 'A', incoming: 'B' },
            BuildError::DuplicateSlotId(id),
            BuildError::ConflictingSlotAssignment { row: 0, col: 0, claimed_by: id },
            BuildError::OrphanedCharacter { row: 0, col: 0, ch: 'A' },
            BuildError::IrregularGrid { detail: "empty grid".into() },
            BuildError::OutOfBounds { slot: id, len: 9, height: 3, width: 3 },
        ];

        let mut codes: Vec<&str> = errors.iter().map(BuildError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let err = BuildError::IrregularGrid { detail: "row 2 has length 3, expected 5".into() };
        let detailed = err.display_detailed();

        assert!(detailed.contains("E005"));
        assert!(detailed.contains("row 2 has length 3"));
        assert!(detailed.contains("same non-zero length"));
    }

    #[test]
    fn test_fill_error_messages() {
        let conflict =
            FillError::OverwriteConflict { row: 1, col: 2, existing: 'X', attempted: 'Y' };
        assert_eq!(conflict.code(), "F001");
        assert!(conflict.to_string().contains("'X'"));

        let crossing = FillError::InvalidCrossingWord {
            slot: SlotId::new(0, 0, Direction::Down),
            word: "QZX".into(),
        };
        assert_eq!(crossing.code(), "F002");
        assert!(crossing.to_string().contains("QZX"));
    }
}
