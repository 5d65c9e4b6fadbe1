//! File I/O operations for Nurikabe puzzle grids

use super::{Cell, Grid};
use crate::error::NurikabeError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load a puzzle grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a grid from text.
///
/// One line per row. Whitespace inside a line is dropped and blank lines are
/// skipped; any character other than `1`, `2` and `.` is kept as an opaque clue.
pub fn parse_grid_from_string(content: &str) -> Result<Grid, NurikabeError> {
    let rows: Vec<Vec<Cell>> = content
        .lines()
        .map(|line| {
            line.chars()
                .filter(|ch| !ch.is_whitespace())
                .map(Cell::from_char)
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(NurikabeError::MalformedGrid(
            "puzzle text is empty or contains no rows".to_string(),
        ));
    }

    Grid::from_rows(rows)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid.to_string())
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// List the puzzle files (`*.txt`) in a directory, sorted by name
pub fn puzzle_files_in_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut files = Vec::new();
    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// File stem used to name a puzzle in reports and solver job files
pub fn puzzle_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("puzzle")
        .to_string()
}

/// Create example puzzle files
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("single.txt", "1.\n..\n"),
        ("pair.txt", "2..\n...\n..2\n"),
        ("mixed.txt", "1.2.\n....\n.2..\n...1\n"),
        ("ocean.txt", "..\n..\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
