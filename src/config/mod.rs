//! Configuration management for the Nurikabe SAT solver

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, InputConfig, LoggingConfig, OutputConfig, OutputFormat, Settings,
    SolverBackendKind, SolverConfig,
};
