//! Factory for creating SAT solver instances based on configuration

use super::external::ExternalSolver;
use super::solver::{CadicalSolver, SatBackend};
use super::{Formula, Verdict};
use crate::config::{SolverBackendKind, SolverConfig};
use crate::error::NurikabeError;

/// SAT solver that can use either backend
#[derive(Debug)]
pub enum UnifiedSatSolver {
    Cadical(CadicalSolver),
    External(ExternalSolver),
}

impl UnifiedSatSolver {
    /// Create a solver for the configured backend.
    ///
    /// For the external backend the executable is resolved here, so a missing
    /// solver is reported before any formula is written.
    pub fn new(config: &SolverConfig, job_name: Option<&str>) -> Result<Self, NurikabeError> {
        match config.backend {
            SolverBackendKind::Cadical => Ok(UnifiedSatSolver::Cadical(CadicalSolver::new())),
            SolverBackendKind::External => Ok(UnifiedSatSolver::External(ExternalSolver::new(
                config, job_name,
            )?)),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackendKind {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackendKind::Cadical,
            UnifiedSatSolver::External(_) => SolverBackendKind::External,
        }
    }
}

impl SatBackend for UnifiedSatSolver {
    fn name(&self) -> &'static str {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.name(),
            UnifiedSatSolver::External(solver) => solver.name(),
        }
    }

    fn solve(&mut self, formula: &Formula) -> Result<Verdict, NurikabeError> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve(formula),
            UnifiedSatSolver::External(solver) => solver.solve(formula),
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(CadicalSolver::new())
    }
}
