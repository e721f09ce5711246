//! Integration tests for the crossfill puzzle filler.
//!
//! These tests verify the complete pipeline from grid construction through
//! the backtracking search to result validation, using a realistic wordlist
//! fixture and both builder entry points.

use std::collections::HashSet;

use crossfill::grid::{Direction, Puzzle, Slot, SlotId};
use crossfill::solver::{solve, solve_with_trace, SolveOptions, TraceEvent};
use crossfill::word_list::WordSet;

/// Load the test wordlist from fixtures.
fn load_test_wordlist() -> WordSet {
    WordSet::load_from_path("tests/fixtures/test_wordlist.txt")
        .expect("Failed to read test wordlist")
}

/// A 4x4 frame puzzle: one across word along the top, two down words at
/// the left and right edges, black squares in the middle.
fn frame_puzzle() -> Puzzle {
    Puzzle::from_raw_grid(&["....", ".__.", ".__.", ".__."]).unwrap()
}

/// Assert that a solved puzzle only contains distinct words drawn from the
/// given word set.
fn assert_valid_fill(puzzle: &Puzzle, words: &WordSet) {
    assert!(puzzle.is_solved());
    let filled: Vec<String> = puzzle.slots().map(Slot::text).collect();
    for word in &filled {
        assert!(words.contains(word), "'{word}' is not in the wordlist");
    }
    let distinct: HashSet<&String> = filled.iter().collect();
    assert_eq!(distinct.len(), filled.len(), "a word was used twice: {filled:?}");
}

mod wordlist_fixture {
    use super::*;

    #[test]
    fn test_fixture_is_normalized() {
        let words = load_test_wordlist();
        assert!(!words.is_empty());
        // The file is lowercase; the set is uppercase.
        assert!(words.contains("SALT"));
        assert!(words.contains("TEES"));
        assert!(!words.contains("salt"));
    }
}

mod builder_pipeline {
    use super::*;

    #[test]
    fn test_raw_grid_and_explicit_slots_agree() {
        let from_raw = frame_puzzle();
        let from_slots = Puzzle::from_slots(
            4,
            4,
            vec![
                Slot::wildcards(0, 0, Direction::Across, 4),
                Slot::wildcards(0, 0, Direction::Down, 4),
                Slot::wildcards(0, 3, Direction::Down, 4),
            ],
        )
        .unwrap();

        // Same slots, same cells, including the derived black squares.
        assert_eq!(from_raw, from_slots);
    }

    #[test]
    fn test_render_rebuild_round_trip() {
        let puzzle = frame_puzzle();
        let rows = puzzle.to_raw_rows();
        let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let rebuilt = Puzzle::from_raw_grid(&row_refs).unwrap();

        assert_eq!(rebuilt, puzzle);
    }
}

mod solver_pipeline {
    use super::*;

    #[test]
    fn test_fills_frame_puzzle_from_fixture() {
        let words = load_test_wordlist();
        let outcome = solve(frame_puzzle(), &words, &SolveOptions::default());

        assert!(outcome.solved);
        assert_valid_fill(&outcome.puzzle, &words);

        // The down words must agree with the across word where they cross.
        let across = outcome.puzzle.slot(SlotId::new(0, 0, Direction::Across)).unwrap();
        let left = outcome.puzzle.slot(SlotId::new(0, 0, Direction::Down)).unwrap();
        let right = outcome.puzzle.slot(SlotId::new(0, 3, Direction::Down)).unwrap();
        assert_eq!(across.cells[0], left.cells[0]);
        assert_eq!(across.cells[3], right.cells[0]);
    }

    #[test]
    fn test_fills_frame_puzzle_with_randomized_order() {
        let words = load_test_wordlist();
        let options = SolveOptions { randomize_candidate_order: true };
        let outcome = solve(frame_puzzle(), &words, &options);

        assert!(outcome.solved);
        assert_valid_fill(&outcome.puzzle, &words);
    }

    #[test]
    fn test_single_slot_is_deterministic_in_order() {
        let puzzle = Puzzle::from_raw_grid(&["....."]).unwrap();
        let words = WordSet::from_words(["HELLO", "WORLD"]);
        let outcome = solve(puzzle, &words, &SolveOptions::default());

        assert!(outcome.solved);
        let slot = outcome.puzzle.slot(SlotId::new(0, 0, Direction::Across)).unwrap();
        assert_eq!(slot.text(), "HELLO");
    }

    #[test]
    fn test_wordlist_without_matching_lengths_fails_cleanly() {
        // Every fixture word has four letters; a 3x3 grid has none.
        let words = load_test_wordlist();
        let puzzle = Puzzle::from_raw_grid(&["...", "...", "..."]).unwrap();
        let initial = puzzle.clone();

        let outcome = solve(puzzle, &words, &SolveOptions::default());
        assert!(!outcome.solved);
        assert_eq!(outcome.puzzle, initial, "failed solve must restore the input state");
    }

    #[test]
    fn test_trace_narrates_a_full_solve() {
        let words = load_test_wordlist();
        let mut events: Vec<String> = Vec::new();

        let outcome =
            solve_with_trace(frame_puzzle(), &words, &SolveOptions::default(), &mut |ev| {
                match ev {
                    TraceEvent::Select { slot } => events.push(format!("select {}", slot.id)),
                    TraceEvent::Used { word, .. } => events.push(format!("used {word}")),
                    _ => {}
                }
            });

        assert!(outcome.solved);
        // Three slots plus the terminal select-nothing level: at least one
        // select per slot, and one used word per slot.
        let used: Vec<&String> = events.iter().filter(|e| e.starts_with("used")).collect();
        assert!(used.len() >= 3);
        assert!(events[0].starts_with("select"));
    }

    #[test]
    fn test_partially_filled_grid_keeps_its_letters() {
        let words = load_test_wordlist();
        // Pin the across word to SALT before solving.
        let puzzle = Puzzle::from_raw_grid(&["SALT", ".__.", ".__.", ".__."]).unwrap();

        let outcome = solve(puzzle, &words, &SolveOptions::default());
        assert!(outcome.solved);
        assert_valid_fill(&outcome.puzzle, &words);

        let across = outcome.puzzle.slot(SlotId::new(0, 0, Direction::Across)).unwrap();
        assert_eq!(across.text(), "SALT");
        let left = outcome.puzzle.slot(SlotId::new(0, 0, Direction::Down)).unwrap();
        assert!(left.text().starts_with('S'));
    }
}
