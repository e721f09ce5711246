// Reusable library API — the CLI in main.rs is a thin consumer of this.
pub mod builder;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod log;
pub mod solver;
pub mod word_list;
