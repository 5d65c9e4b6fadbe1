//! Error taxonomy for encoding, solving and decoding Nurikabe puzzles

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single encode → solve → decode run.
///
/// An unsatisfiable puzzle is not an error; it is reported as
/// [`Verdict::Unsatisfiable`](crate::sat::Verdict::Unsatisfiable).
#[derive(Error, Debug)]
pub enum NurikabeError {
    /// Empty or ragged puzzle input, rejected before any encoding starts
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    /// A coordinate or variable outside the grid shape
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The external SAT solver executable could not be located
    #[error("SAT solver executable not found: {}", .0.display())]
    MissingCollaborator(PathBuf),

    /// The solver output was missing, truncated or unparseable
    #[error("solver protocol error: {0}")]
    SolverProtocol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NurikabeError::MalformedGrid("row 1 has length 2, expected 3".to_string());
        assert_eq!(err.to_string(), "malformed grid: row 1 has length 2, expected 3");

        let err = NurikabeError::MissingCollaborator(PathBuf::from("./glucose"));
        assert!(err.to_string().contains("./glucose"));
    }
}
