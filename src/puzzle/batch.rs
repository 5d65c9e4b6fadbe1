//! Parallel solving of independent puzzles

use super::problem::NurikabeProblem;
use super::solution::PuzzleOutcome;
use crate::config::Settings;
use crate::nurikabe::puzzle_name;
use anyhow::Result;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result of one puzzle in a batch
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<PuzzleOutcome>,
}

/// Solve every puzzle file independently, in parallel.
///
/// Each run owns its grid, formula and backend; external solver files are
/// prefixed with the puzzle name. Results keep the order of `paths`.
pub fn solve_batch(settings: &Settings, paths: &[PathBuf]) -> Vec<BatchEntry> {
    paths
        .par_iter()
        .map(|path| {
            let result = solve_one(settings, path);
            if let Err(e) = &result {
                log::warn!("{}: {:#}", path.display(), e);
            }
            BatchEntry {
                path: path.clone(),
                result,
            }
        })
        .collect()
}

fn solve_one(settings: &Settings, path: &Path) -> Result<PuzzleOutcome> {
    let mut settings = settings.clone();
    settings.input.puzzle_file = path.to_path_buf();

    NurikabeProblem::new(settings)?
        .with_job_name(puzzle_name(path))
        .solve()
}

/// Counts over a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub solved: usize,
    pub invalid: usize,
    pub unsatisfiable: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match &entry.result {
                Ok(PuzzleOutcome::Solved(solution)) if solution.is_valid() => summary.solved += 1,
                Ok(PuzzleOutcome::Solved(_)) => summary.invalid += 1,
                Ok(PuzzleOutcome::Unsatisfiable { .. }) => summary.unsatisfiable += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.solved + self.invalid + self.unsatisfiable + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Summary:")?;
        writeln!(f, "  Puzzles: {}", self.total())?;
        writeln!(f, "  Solved: {}", self.solved)?;
        writeln!(f, "  Solved with rule violations: {}", self.invalid)?;
        writeln!(f, "  Unsatisfiable: {}", self.unsatisfiable)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        Ok(())
    }
}
