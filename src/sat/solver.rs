//! SAT solver capability and the in-process CaDiCaL backend

use super::{Assignment, Formula, Verdict};
use crate::error::NurikabeError;
use cadical::Solver;
use std::time::{Duration, Instant};

/// Anything that can decide a CNF formula.
///
/// Implementations run to completion exactly once per call; timeouts and
/// retries belong to the caller.
pub trait SatBackend {
    fn name(&self) -> &'static str;

    fn solve(&mut self, formula: &Formula) -> Result<Verdict, NurikabeError>;
}

/// SAT solver wrapper for CaDiCaL
#[derive(Debug, Default)]
pub struct CadicalSolver {
    last_solve_time: Option<Duration>,
}

impl CadicalSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wall time of the most recent `solve` call
    pub fn last_solve_time(&self) -> Option<Duration> {
        self.last_solve_time
    }
}

impl SatBackend for CadicalSolver {
    fn name(&self) -> &'static str {
        "cadical"
    }

    fn solve(&mut self, formula: &Formula) -> Result<Verdict, NurikabeError> {
        let mut solver: Solver = Solver::new();
        for clause in &formula.clauses {
            if clause.is_empty() {
                return Err(NurikabeError::SolverProtocol(
                    "cannot hand an empty clause to the solver".to_string(),
                ));
            }
            solver.add_clause(clause.literals.iter().copied());
        }

        let start_time = Instant::now();
        let result = solver.solve();
        self.last_solve_time = Some(start_time.elapsed());

        match result {
            Some(true) => {
                // Variables absent from every clause stay false
                let known = solver.max_variable().min(formula.variable_count as i32);
                let true_variables = (1..=known)
                    .filter(|&var| solver.value(var) == Some(true));
                Ok(Verdict::Satisfiable(Assignment::from_true_variables(
                    true_variables,
                )))
            }
            Some(false) => Ok(Verdict::Unsatisfiable),
            None => Err(NurikabeError::SolverProtocol(
                "CaDiCaL stopped without a verdict".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::Clause;

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = CadicalSolver::new();

        // (x1 ∨ x2) ∧ (¬x1 ∨ x2)
        let formula = Formula::new(2, vec![Clause::binary(1, 2), Clause::binary(-1, 2)]);

        let Verdict::Satisfiable(assignment) = solver.solve(&formula).unwrap() else {
            panic!("expected a model");
        };
        assert!(assignment.is_true(2));
        assert!(solver.last_solve_time().is_some());
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = CadicalSolver::new();
        let formula = Formula::new(1, vec![Clause::unit(1), Clause::unit(-1)]);

        assert_eq!(solver.solve(&formula).unwrap(), Verdict::Unsatisfiable);
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = CadicalSolver::new();
        let formula = Formula::new(1, vec![Clause::new(vec![])]);

        assert!(solver.solve(&formula).is_err());
    }
}
