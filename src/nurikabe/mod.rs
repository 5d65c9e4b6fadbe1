//! Nurikabe puzzle core types

pub mod grid;
pub mod io;
pub mod shading;

pub use grid::{Cell, Grid};
pub use io::{
    create_example_puzzles, load_grid_from_file, parse_grid_from_string,
    puzzle_files_in_directory, puzzle_name, save_grid_to_file,
};
pub use shading::Shading;
