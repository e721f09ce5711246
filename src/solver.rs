//! The backtracking fill-in solver.
//!
//! One recursive procedure drives the whole search: pick the
//! most-constrained open slot, filter the word list down to candidates
//! that fit it, try each candidate through the constraint engine, recurse
//! on success, and roll back on failure. Each recursion level owns its own
//! clone of the puzzle, so a failed branch can never leak partial state
//! into a sibling attempt.
//!
//! # Examples
//!
//! ```
//! use crossfill::grid::Puzzle;
//! use crossfill::solver::{solve, SolveOptions};
//! use crossfill::word_list::WordSet;
//!
//! let puzzle = Puzzle::from_raw_grid(&["....."]).unwrap();
//! let words = WordSet::from_words(["hello", "world"]);
//!
//! let outcome = solve(puzzle, &words, &SolveOptions::default());
//! assert!(outcome.solved);
//! ```
//!
//! ## Observing the search
//!
//! ```
//! use crossfill::grid::Puzzle;
//! use crossfill::solver::{solve_with_trace, SolveOptions, TraceEvent};
//! use crossfill::word_list::WordSet;
//!
//! let puzzle = Puzzle::from_raw_grid(&["....."]).unwrap();
//! let words = WordSet::from_words(["hello", "world"]);
//!
//! let mut tried = 0;
//! let outcome = solve_with_trace(puzzle, &words, &SolveOptions::default(), &mut |ev| {
//!     if let TraceEvent::Try { .. } = ev {
//!         tried += 1;
//!     }
//! });
//! assert!(outcome.solved);
//! assert!(tried >= 1);
//! ```

use std::collections::HashSet;

use log::{debug, trace as log_trace};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::errors::FillError;
use crate::grid::{Puzzle, Slot, WILDCARD};
use crate::word_list::WordSet;

/// Configuration for a solve run. Explicit per-call state; nothing here
/// is ambient.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Try candidates in a uniformly shuffled order instead of the word
    /// set's sorted order. Affects which solution is found first, never
    /// whether one is found.
    pub randomize_candidate_order: bool,
}

/// Result of a solve run.
///
/// When `solved` is false the returned puzzle is not a partial solution:
/// the top-level call's own rollback restores it to the input state.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solved: bool,
    pub puzzle: Puzzle,
}

/// A step of the search, reported to the trace hook of
/// [`solve_with_trace`]. Diagnostics only; observing events has no effect
/// on the outcome.
#[derive(Debug)]
pub enum TraceEvent<'a> {
    /// A slot was selected for filling. `slot` is its pre-trial contents.
    Select { slot: &'a Slot },
    /// The candidate list for the selected slot was computed.
    Candidates { slot: &'a Slot, count: usize },
    /// A candidate word is about to be placed.
    Try { slot: &'a Slot, word: &'a str },
    /// A candidate failed mid-placement and will be rolled back.
    Reject { slot: &'a Slot, word: &'a str, reason: &'a FillError },
    /// A candidate was fully placed; the search recurses below it.
    Used { slot: &'a Slot, word: &'a str },
    /// A candidate's placement was rolled back (placement failure or a
    /// failed subtree).
    Undo { slot: &'a Slot, word: &'a str },
    /// Every candidate for the slot was exhausted; the caller backtracks.
    DeadEnd { slot: &'a Slot },
}

/// Solve the puzzle against the given word set.
///
/// Returns a [`SolveOutcome`]; on success its puzzle has every slot
/// filled with a distinct word from `words`.
pub fn solve(puzzle: Puzzle, words: &WordSet, options: &SolveOptions) -> SolveOutcome {
    solve_with_trace(puzzle, words, options, &mut |_| {})
}

/// [`solve`], reporting every search step to `trace`.
pub fn solve_with_trace(
    puzzle: Puzzle,
    words: &WordSet,
    options: &SolveOptions,
    trace: &mut dyn FnMut(TraceEvent<'_>),
) -> SolveOutcome {
    let (solved, puzzle) = solve_inner(puzzle, words, options, trace);
    SolveOutcome { solved, puzzle }
}

/// One level of the recursive search. Owns `puzzle` for the duration of
/// the level; recursion hands a fresh clone downward.
fn solve_inner(
    mut puzzle: Puzzle,
    words: &WordSet,
    options: &SolveOptions,
    trace: &mut dyn FnMut(TraceEvent<'_>),
) -> (bool, Puzzle) {
    // SELECT. No open slot left means the puzzle is solved.
    let Some(slot) = puzzle.most_constrained().cloned() else {
        debug!("no open slots remain, puzzle solved");
        return (true, puzzle);
    };
    trace(TraceEvent::Select { slot: &slot });
    log_trace!("attempting to fill in {slot}");

    // FILTER: right length, agrees with every concrete letter already in
    // the slot, and not already used elsewhere in the grid.
    let in_use: HashSet<String> = puzzle
        .slots()
        .filter(|s| s.is_complete())
        .map(Slot::text)
        .collect();
    let mut candidates: Vec<&str> = words
        .iter()
        .filter(|word| fits_pattern(word, &slot.cells))
        .filter(|word| !in_use.contains(*word))
        .collect();
    trace(TraceEvent::Candidates { slot: &slot, count: candidates.len() });
    log_trace!("found {} candidates for {}", candidates.len(), slot.id);

    if candidates.is_empty() {
        trace(TraceEvent::DeadEnd { slot: &slot });
        return (false, puzzle);
    }

    // ORDER.
    if options.randomize_candidate_order {
        candidates.shuffle(&mut thread_rng());
    }

    // TRY each candidate, rolling the shared copy back between attempts.
    for candidate in candidates {
        trace(TraceEvent::Try { slot: &slot, word: candidate });

        match place_candidate(&mut puzzle, &slot, candidate, words) {
            Ok(placed) => {
                trace(TraceEvent::Used { slot: &slot, word: candidate });
                log_trace!("used '{candidate}' for {}", slot.id);

                // RECURSE on a fresh snapshot; our own copy stays as the
                // rollback point for the next candidate.
                let (solved, deeper) = solve_inner(puzzle.clone(), words, options, trace);
                if solved {
                    return (true, deeper);
                }

                unplace(&mut puzzle, &slot, &placed);
            }
            Err((placed, reason)) => {
                trace(TraceEvent::Reject { slot: &slot, word: candidate, reason: &reason });
                log_trace!("rejected '{candidate}' for {}: {reason}", slot.id);
                unplace(&mut puzzle, &slot, &placed);
            }
        }
        trace(TraceEvent::Undo { slot: &slot, word: candidate });
    }

    // Exhausted every candidate at this level; the caller backtracks.
    trace(TraceEvent::DeadEnd { slot: &slot });
    debug!("exhausted candidates for {}", slot.id);
    (false, puzzle)
}

/// Does `word` fit a slot currently holding `cells`? Length must match
/// exactly and every concrete cell must agree with the word's letter at
/// the same offset (case-insensitively; the comparison uppercases).
fn fits_pattern(word: &str, cells: &[char]) -> bool {
    let mut letters = word.chars();
    for &cell in cells {
        let Some(letter) = letters.next() else {
            return false; // word too short
        };
        if cell != WILDCARD && cell != letter.to_ascii_uppercase() {
            return false;
        }
    }
    letters.next().is_none() // word too long
}

/// Write `candidate` into `slot`'s wildcard cells, one character at a
/// time, validating each crossing word the moment a placement completes
/// it.
///
/// On success, returns the offsets that were wildcards before the trial
/// (the rollback set). On failure, returns the offsets placed so far plus
/// the reason, and the caller rolls back.
fn place_candidate(
    puzzle: &mut Puzzle,
    slot: &Slot,
    candidate: &str,
    words: &WordSet,
) -> Result<Vec<usize>, (Vec<usize>, FillError)> {
    let mut placed = Vec::with_capacity(slot.len());

    for (offset, letter) in candidate.chars().enumerate() {
        // Concrete cells already match the candidate thanks to filtering.
        if slot.cells[offset] != WILDCARD {
            continue;
        }
        let (row, col) = slot.id.cell_at(offset);

        if let Err(e) = puzzle.set_character(letter, row, col) {
            // A crossing word placed a conflicting letter since this
            // slot's pattern was snapshotted.
            return Err((placed, e));
        }
        placed.push(offset);

        // If this write completed the crossing word, it must be a real
        // word too.
        if let Some(crossing_id) = puzzle.cell(row, col).crossing(slot.id.direction) {
            if let Some(crossing) = puzzle.slot(crossing_id) {
                if crossing.is_complete() && !words.contains(&crossing.text()) {
                    let reason = FillError::InvalidCrossingWord {
                        slot: crossing_id,
                        word: crossing.text(),
                    };
                    return Err((placed, reason));
                }
            }
        }
    }

    Ok(placed)
}

/// Clear every offset recorded by [`place_candidate`], restoring the
/// pre-trial puzzle state.
fn unplace(puzzle: &mut Puzzle, slot: &Slot, placed: &[usize]) {
    for &offset in placed {
        let (row, col) = slot.id.cell_at(offset);
        puzzle.clear_character(row, col);
    }
}
