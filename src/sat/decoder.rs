//! Decoding of SAT solver output into assignments

use crate::error::NurikabeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Substring that marks an unsatisfiability verdict in solver output
const UNSAT_MARKER: &str = "UNSAT";

/// Token that introduces a model line in competition-style output
const MODEL_LINE_MARKER: &str = "v";

/// Variables assigned true by the solver; any other variable is false
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    true_variables: BTreeSet<i32>,
}

impl Assignment {
    pub fn from_true_variables<I: IntoIterator<Item = i32>>(variables: I) -> Self {
        Self {
            true_variables: variables.into_iter().filter(|&v| v > 0).collect(),
        }
    }

    pub fn is_true(&self, variable: i32) -> bool {
        self.true_variables.contains(&variable)
    }

    pub fn true_count(&self) -> usize {
        self.true_variables.len()
    }

    pub fn true_variables(&self) -> impl Iterator<Item = i32> + '_ {
        self.true_variables.iter().copied()
    }
}

/// Outcome reported by a solver for one formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Assignment),
    Unsatisfiable,
}

/// Parse solver output text.
///
/// Any `UNSAT` marker wins regardless of other content. Otherwise every integer
/// token forms the model and only positive ones are kept. Non-integer tokens are
/// skipped. Output with neither a marker nor a model is a protocol error.
pub fn decode_model(content: &str) -> Result<Verdict, NurikabeError> {
    if content.contains(UNSAT_MARKER) {
        return Ok(Verdict::Unsatisfiable);
    }

    let mut saw_model = false;
    let mut true_variables = BTreeSet::new();

    for token in content.split_whitespace() {
        if token == MODEL_LINE_MARKER {
            continue;
        }
        if let Ok(value) = token.parse::<i32>() {
            saw_model = true;
            if value > 0 {
                true_variables.insert(value);
            }
        }
    }

    if !saw_model {
        return Err(NurikabeError::SolverProtocol(
            "solver output contains neither a model nor an UNSAT verdict".to_string(),
        ));
    }

    Ok(Verdict::Satisfiable(Assignment { true_variables }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_model_line() {
        let verdict = decode_model("SAT\n-1 2 3 -4 0\n").unwrap();
        assert_eq!(
            verdict,
            Verdict::Satisfiable(Assignment::from_true_variables([2, 3]))
        );
    }

    #[test]
    fn test_competition_format() {
        let content = "c comment line\ns SATISFIABLE\nv -1 2 -3\nv 4 0\n";
        let Verdict::Satisfiable(assignment) = decode_model(content).unwrap() else {
            panic!("expected a model");
        };
        assert!(assignment.is_true(2));
        assert!(assignment.is_true(4));
        assert!(!assignment.is_true(1));
        assert!(!assignment.is_true(3));
        assert_eq!(assignment.true_count(), 2);
    }

    #[test]
    fn test_all_false_model_is_satisfiable() {
        let verdict = decode_model("SAT\n-1 -2 0\n").unwrap();
        assert_eq!(verdict, Verdict::Satisfiable(Assignment::default()));
    }

    #[test]
    fn test_unsat_marker_wins() {
        assert_eq!(decode_model("UNSAT\n").unwrap(), Verdict::Unsatisfiable);
        assert_eq!(
            decode_model("s UNSATISFIABLE\n").unwrap(),
            Verdict::Unsatisfiable
        );
        assert_eq!(
            decode_model("1 2 3 0\nUNSAT\n").unwrap(),
            Verdict::Unsatisfiable
        );
    }

    #[test]
    fn test_missing_model_is_protocol_error() {
        assert!(matches!(
            decode_model(""),
            Err(NurikabeError::SolverProtocol(_))
        ));
        assert!(matches!(
            decode_model("SAT\nINDETERMINATE\n"),
            Err(NurikabeError::SolverProtocol(_))
        ));
    }

    #[test]
    fn test_assignment_ignores_non_positive() {
        let assignment = Assignment::from_true_variables([-3, 0, 5]);
        assert_eq!(assignment.true_variables().collect::<Vec<_>>(), vec![5]);
    }
}
