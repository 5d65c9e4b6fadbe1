//! Nurikabe problem definition: encode, solve, decode, render

use super::solution::{PuzzleOutcome, Solution};
use super::validator::SolutionValidator;
use crate::config::Settings;
use crate::nurikabe::{load_grid_from_file, puzzle_name, Grid, Shading};
use crate::sat::{
    ClauseEncoder, EncodingStatistics, Formula, SatBackend, UnifiedSatSolver, Verdict,
    VariableMapper,
};
use crate::utils::GridRenderer;
use anyhow::{Context, Result};
use std::time::Instant;

/// A single puzzle together with the settings used to solve it
pub struct NurikabeProblem {
    settings: Settings,
    name: String,
    grid: Grid,
    encoder: ClauseEncoder,
    job_name: Option<String>,
}

impl NurikabeProblem {
    /// Create a problem from the puzzle file named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;
        let name = puzzle_name(&settings.input.puzzle_file);

        Ok(Self::with_grid(settings, name, grid))
    }

    /// Create a problem with an explicit grid
    pub fn with_grid(settings: Settings, name: impl Into<String>, grid: Grid) -> Self {
        let encoder = ClauseEncoder::from_config(&settings.encoding);
        Self {
            settings,
            name: name.into(),
            grid,
            encoder,
            job_name: None,
        }
    }

    /// Give the external solver files of this run a unique prefix
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = Some(job_name.into());
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Encode the puzzle into a CNF formula
    pub fn encode(&self) -> Result<(Formula, EncodingStatistics)> {
        self.encoder
            .encode_with_statistics(&self.grid)
            .with_context(|| format!("Failed to encode puzzle {}", self.name))
    }

    /// Solve with the backend named in the settings.
    ///
    /// The backend is created first, so a missing solver executable is
    /// reported before any formula is written.
    pub fn solve(&self) -> Result<PuzzleOutcome> {
        let mut backend = UnifiedSatSolver::new(&self.settings.solver, self.job_name.as_deref())
            .context("Failed to set up SAT solver")?;
        self.solve_with(&mut backend)
    }

    /// Solve with an explicit backend
    pub fn solve_with(&self, backend: &mut dyn SatBackend) -> Result<PuzzleOutcome> {
        let (formula, stats) = self.encode()?;
        log::info!(
            "Encoded {} ({}x{}): {} variables, {} clauses",
            self.name,
            self.grid.height,
            self.grid.width,
            stats.variable_count,
            formula.clause_count()
        );

        let start_time = Instant::now();
        let verdict = backend.solve(&formula).context("SAT solving failed")?;
        let solve_time = start_time.elapsed();
        log::info!(
            "{} backend finished {} in {:.3}s",
            backend.name(),
            self.name,
            solve_time.as_secs_f64()
        );

        let assignment = match verdict {
            Verdict::Unsatisfiable => {
                log::info!("{} has no solution", self.name);
                return Ok(PuzzleOutcome::Unsatisfiable {
                    name: self.name.clone(),
                });
            }
            Verdict::Satisfiable(assignment) => assignment,
        };

        let renderer = GridRenderer::from_config(&self.settings.output);
        let rows = renderer
            .render_rows(&self.grid, &assignment)
            .context("Failed to render solution")?;

        let mapper = VariableMapper::for_grid(&self.grid)?;
        let shading = Shading::from_assignment(&self.grid, &mapper, &assignment)?;
        let validation = SolutionValidator::new().validate(&self.grid, &shading)?;
        for violation in &validation.violations {
            log::warn!(
                "{}: rule violation at ({}, {}): {}",
                self.name,
                violation.cell_position.0,
                violation.cell_position.1,
                violation.description
            );
        }
        for warning in &validation.warnings {
            log::debug!("{}: {}", self.name, warning);
        }

        Ok(PuzzleOutcome::Solved(Solution {
            name: self.name.clone(),
            rows,
            black_cells: shading.black_count(),
            variable_count: formula.variable_count,
            clause_count: formula.clause_count(),
            backend: backend.name().to_string(),
            solve_time,
            validation,
        }))
    }
}
