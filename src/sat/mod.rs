//! SAT encoding, solving and decoding for Nurikabe puzzles

pub mod variables;
pub mod constraints;
pub mod formula;
pub mod decoder;
pub mod solver;
pub mod external;
pub mod solver_factory;

pub use variables::VariableMapper;
pub use constraints::{Clause, ClauseEncoder, EncodingStatistics, ReductionPass, UnreachableCellReduction};
pub use formula::Formula;
pub use decoder::{decode_model, Assignment, Verdict};
pub use solver::{CadicalSolver, SatBackend};
pub use external::ExternalSolver;
pub use solver_factory::UnifiedSatSolver;
