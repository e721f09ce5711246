use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crossfill::grid::{Direction, Puzzle, Slot};
use crossfill::solver::{self, SolveOptions, TraceEvent};
use crossfill::word_list::WordSet;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Path to a raw grid file: one row per line, '.' for unknown cells,
    /// '_' for black squares, letters for pre-filled cells
    #[arg(short, long, conflicts_with_all = ["height", "width", "slot"])]
    grid: Option<PathBuf>,

    /// Puzzle height (with --width and --slot)
    #[arg(short = 'H', long, requires_all = ["width", "slot"])]
    height: Option<usize>,

    /// Puzzle width (with --height and --slot)
    #[arg(short = 'W', long, requires_all = ["height", "slot"])]
    width: Option<usize>,

    /// A word slot as row,col,length,a|d (0-based, repeatable)
    #[arg(short, long = "slot")]
    slot: Vec<String>,

    /// Path to the wordlist file (whitespace-separated words)
    #[arg(short, long, default_value = "/usr/share/dict/words")]
    wordlist: PathBuf,

    /// Try candidates in sorted wordlist order instead of shuffling.
    /// Expect a lot of words starting with 'A'.
    #[arg(long)]
    in_order: bool,

    /// Trace verbosity (-v: search steps, -vv: also candidate counts and
    /// intermediate grids)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    match try_main() {
        Ok(solved) => {
            if solved {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            // Exit explicitly with a nonzero code so scripts can detect failure
            ExitCode::FAILURE
        }
    }
}

/// Core application logic for the crossfill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Build the puzzle from a raw grid file or from explicit slot specs.
/// 3. Load and normalize the wordlist.
/// 4. Solve, tracing search steps per the verbosity setting.
/// 5. Print the filled (or restored) grid and timing diagnostics.
///
/// Returns whether the puzzle was solved, or an error (unreadable files,
/// inconsistent grid description, bad slot specs) which bubbles up to
/// [`main`].
fn try_main() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Build the puzzle before touching the wordlist, so an inconsistent
    // grid description fails fast.
    let puzzle = build_puzzle(&cli)?;
    log::info!(
        "built {}x{} puzzle with {} slots",
        puzzle.height(),
        puzzle.width(),
        puzzle.slot_count()
    );

    // 2. Load the wordlist.
    let t_load = Instant::now();
    let words = WordSet::load_from_path(&cli.wordlist)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    println!("Initial puzzle:");
    print!("{puzzle}");

    // 3. Solve, printing trace output per the verbosity level.
    let options = SolveOptions { randomize_candidate_order: !cli.in_order };
    let verbosity = cli.verbose;
    let t_solve = Instant::now();
    let outcome = solver::solve_with_trace(puzzle, &words, &options, &mut |ev| {
        print_trace_event(&ev, verbosity);
    });
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 4. Report the result.
    if outcome.solved {
        println!("Solved puzzle:");
        print!("{}", outcome.puzzle);
    } else {
        println!("No fill exists for this puzzle with the supplied wordlist.");
    }
    eprintln!(
        "Loaded {} words in {load_secs:.3}s; search took {solve_secs:.3}s.",
        words.len()
    );

    Ok(outcome.solved)
}

/// Build the puzzle from whichever input form the CLI received.
fn build_puzzle(cli: &Cli) -> Result<Puzzle, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.grid {
        let contents = std::fs::read_to_string(path)?;
        let rows: Vec<&str> = contents.lines().filter(|line| !line.is_empty()).collect();
        return Puzzle::from_raw_grid(&rows).map_err(|e| e.display_detailed().into());
    }

    match (cli.height, cli.width) {
        (Some(height), Some(width)) => {
            let slots = cli
                .slot
                .iter()
                .map(|spec| parse_slot_spec(spec))
                .collect::<Result<Vec<_>, _>>()?;
            Puzzle::from_slots(height, width, slots).map_err(|e| e.display_detailed().into())
        }
        _ => Err("provide either --grid or --height/--width with --slot".into()),
    }
}

/// Parse a `row,col,length,a|d` slot spec into an all-wildcard slot.
fn parse_slot_spec(spec: &str) -> Result<Slot, String> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [row, col, len, dir] = parts.as_slice() else {
        return Err(format!("bad slot spec '{spec}': expected row,col,length,a|d"));
    };

    let row: usize = row.parse().map_err(|_| format!("bad row in slot spec '{spec}'"))?;
    let col: usize = col.parse().map_err(|_| format!("bad column in slot spec '{spec}'"))?;
    let len: usize = len.parse().map_err(|_| format!("bad length in slot spec '{spec}'"))?;
    let direction = match *dir {
        "a" | "A" => Direction::Across,
        "d" | "D" => Direction::Down,
        other => return Err(format!("bad direction '{other}' in slot spec '{spec}'")),
    };

    Ok(Slot::wildcards(row, col, direction, len))
}

/// Map trace events to the two verbosity levels: level 1 prints the
/// search narrative, level 2 adds candidate counts and rejects.
fn print_trace_event(ev: &TraceEvent<'_>, verbosity: u8) {
    if verbosity == 0 {
        return;
    }
    match ev {
        TraceEvent::Select { slot } => println!("Attempting to fill in {slot}"),
        TraceEvent::Candidates { count, .. } => {
            if verbosity >= 2 {
                println!(
                    "Found {count} possibilit{} in the word list.",
                    if *count == 1 { "y" } else { "ies" }
                );
            }
        }
        TraceEvent::Used { word, .. } => println!("Used '{word}'"),
        TraceEvent::Reject { word, reason, .. } => {
            if verbosity >= 2 {
                println!("Failed to place '{word}': {reason}");
            }
        }
        TraceEvent::Undo { slot, word } => {
            if verbosity >= 2 {
                println!("Failed to use '{word}' to fill in {slot}");
            }
        }
        TraceEvent::DeadEnd { slot } => {
            if verbosity >= 2 {
                println!("Out of possibilities for {slot}, backtracking");
            }
        }
        TraceEvent::Try { .. } => {}
    }
}
