//! Nurikabe SAT Solver
//!
//! Reduces Nurikabe puzzles restricted to clues 1 and 2 to CNF, hands the
//! formula to a SAT solver and renders the model back as a shaded grid.

pub mod config;
pub mod error;
pub mod nurikabe;
pub mod puzzle;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::NurikabeError;
pub use puzzle::{NurikabeProblem, PuzzleOutcome, Solution};

use anyhow::Result;

/// Main entry point for solving the puzzle named in the settings
pub fn solve_puzzle(settings: Settings) -> Result<PuzzleOutcome> {
    NurikabeProblem::new(settings)?.solve()
}
