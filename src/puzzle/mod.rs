//! End-to-end puzzle solving and solution handling

pub mod batch;
pub mod problem;
pub mod solution;
pub mod validator;

pub use batch::{solve_batch, BatchEntry, BatchSummary};
pub use problem::NurikabeProblem;
pub use solution::{PuzzleOutcome, Solution};
pub use validator::{SolutionValidator, ValidationReport};
