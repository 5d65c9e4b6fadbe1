//! Independent rule check of a shaded Nurikabe grid

use crate::error::NurikabeError;
use crate::nurikabe::{Cell, Grid, Shading};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Checks a shading against the Nurikabe rules without looking at the encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionValidator;

/// Represents a rule violation found during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    pub cell_position: (usize, usize),
    pub description: String,
}

/// Result of solution validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<RuleViolation>,
    /// Findings that do not make the shading illegal under the encoded rules
    pub warnings: Vec<String>,
    pub island_count: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    fn violation(&mut self, cell_position: (usize, usize), description: String) {
        self.violations.push(RuleViolation {
            cell_position,
            description,
        });
    }
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a shading of `grid`
    pub fn validate(&self, grid: &Grid, shading: &Shading) -> Result<ValidationReport, NurikabeError> {
        if !shading.matches_shape(grid) {
            return Err(NurikabeError::MalformedGrid(format!(
                "solution is {}x{} but the puzzle is {}x{}",
                shading.height, shading.width, grid.height, grid.width
            )));
        }

        let mut report = ValidationReport::default();

        // Clues are never shaded
        for (row, col) in grid.coordinates() {
            if let Some(cell) = grid.get(row, col) {
                if cell.is_clue() && shading.is_black(row, col) {
                    report.violation(
                        (row, col),
                        format!("clue '{}' is shaded black", cell.glyph()),
                    );
                }
            }
        }

        self.check_islands(grid, shading, &mut report);
        self.check_pools(grid, shading, &mut report);
        self.check_ocean_connectivity(grid, shading, &mut report);

        Ok(report)
    }

    fn check_islands(&self, grid: &Grid, shading: &Shading, report: &mut ValidationReport) {
        let components = components(grid, |row, col| !shading.is_black(row, col));
        report.island_count = components.len();

        for island in components {
            let anchor = island[0];
            let clues: Vec<(usize, usize, Cell)> = island
                .iter()
                .filter_map(|&(r, c)| grid.get(r, c).map(|cell| (r, c, cell)))
                .filter(|(_, _, cell)| cell.is_clue())
                .collect();

            if let Some(&(r, c, cell)) = clues
                .iter()
                .find(|(_, _, cell)| cell.clue_value().is_none())
            {
                report.warnings.push(format!(
                    "island at ({}, {}) holds unsupported clue '{}'; its size was not checked",
                    r,
                    c,
                    cell.glyph()
                ));
                continue;
            }

            match clues.as_slice() {
                [] => report.violation(
                    anchor,
                    format!("island of {} cells has no numbered clue", island.len()),
                ),
                [(r, c, cell)] => {
                    let expected = cell.clue_value().unwrap_or_default();
                    if island.len() != expected {
                        report.violation(
                            (*r, *c),
                            format!(
                                "clue {} heads an island of {} cells",
                                expected,
                                island.len()
                            ),
                        );
                    }
                }
                many => report.violation(
                    anchor,
                    format!("island joins {} numbered clues", many.len()),
                ),
            }
        }
    }

    fn check_pools(&self, grid: &Grid, shading: &Shading, report: &mut ValidationReport) {
        for row in 0..grid.height.saturating_sub(1) {
            for col in 0..grid.width.saturating_sub(1) {
                let all_black = [(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)]
                    .iter()
                    .all(|&(r, c)| shading.is_black(r, c));
                if all_black {
                    report.violation((row, col), "2x2 block is entirely black".to_string());
                }
            }
        }
    }

    fn check_ocean_connectivity(&self, grid: &Grid, shading: &Shading, report: &mut ValidationReport) {
        let oceans = components(grid, |row, col| shading.is_black(row, col));
        if oceans.len() > 1 {
            report.warnings.push(format!(
                "black cells form {} separate regions",
                oceans.len()
            ));
        }
    }
}

/// Orthogonally connected components of the cells accepted by `member`
fn components<F>(grid: &Grid, member: F) -> Vec<Vec<(usize, usize)>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut seen = vec![false; grid.cell_count()];
    let mut result = Vec::new();

    for (row, col) in grid.coordinates() {
        if seen[row * grid.width + col] || !member(row, col) {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::from([(row, col)]);
        seen[row * grid.width + col] = true;

        while let Some((r, c)) = queue.pop_front() {
            component.push((r, c));
            for (nr, nc) in grid.neighbors(r, c) {
                let idx = nr * grid.width + nc;
                if !seen[idx] && member(nr, nc) {
                    seen[idx] = true;
                    queue.push_back((nr, nc));
                }
            }
        }

        result.push(component);
    }

    result
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid())?;
        writeln!(f, "  Islands: {}", self.island_count)?;
        for violation in &self.violations {
            writeln!(
                f,
                "  Violation at ({}, {}): {}",
                violation.cell_position.0, violation.cell_position.1, violation.description
            )?;
        }
        for warning in &self.warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }
        Ok(())
    }
}
