//! Solution representation for Nurikabe puzzles

use super::validator::ValidationReport;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A solved puzzle
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Name of the puzzle, usually its file stem
    pub name: String,
    /// Rendered rows of the shaded grid
    pub rows: Vec<String>,
    pub black_cells: usize,
    pub variable_count: usize,
    pub clause_count: usize,
    /// Backend that produced the model
    pub backend: String,
    /// Time spent inside the solver
    #[serde(skip)]
    pub solve_time: Duration,
    pub validation: ValidationReport,
}

impl Solution {
    /// Rendered grid, one newline-terminated line per row
    pub fn rendered(&self) -> String {
        let mut output = String::new();
        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }
        output
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }
}

/// Terminal outcome of one puzzle run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PuzzleOutcome {
    Solved(Solution),
    Unsatisfiable { name: String },
}

impl PuzzleOutcome {
    pub fn name(&self) -> &str {
        match self {
            PuzzleOutcome::Solved(solution) => &solution.name,
            PuzzleOutcome::Unsatisfiable { name } => name,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            PuzzleOutcome::Solved(solution) => Some(solution),
            PuzzleOutcome::Unsatisfiable { .. } => None,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable report
    pub fn to_text(&self) -> String {
        match self {
            PuzzleOutcome::Solved(solution) => {
                format!("Solution for {}:\n{}", solution.name, solution.rendered())
            }
            PuzzleOutcome::Unsatisfiable { name } => format!("{}: UNSATISFIABLE\n", name),
        }
    }

    /// Render in the given format
    pub fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json().context("Failed to serialize outcome"),
        }
    }

    /// Save to `<output_dir>/<name>.solution.{txt,json}` and return the path.
    ///
    /// A solved puzzle saved as text holds only the rendered grid, so it can be
    /// fed back to the validator.
    pub fn save_to_directory<P: AsRef<Path>>(
        &self,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let extension = match format {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        };
        let path = output_dir.join(format!("{}.solution.{}", self.name(), extension));

        let content = match (self, format) {
            (PuzzleOutcome::Solved(solution), OutputFormat::Text) => solution.rendered(),
            _ => self.format(format)?,
        };
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write solution to {}", path.display()))?;

        Ok(path)
    }
}
