//! Rendering, terminal output and logging helpers

pub mod display;
pub mod logging;

pub use display::{format_grid_with_coords, ColorOutput, GridRenderer};
pub use logging::init_logging;
