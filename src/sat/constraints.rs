//! Clause generation for the Nurikabe (1 & 2) SAT encoding

use super::{Formula, VariableMapper};
use crate::config::EncodingConfig;
use crate::error::NurikabeError;
use crate::nurikabe::{Cell, Grid};
use itertools::Itertools;
use std::fmt;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive means black, negative means white
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }
}

/// A pre-solving pass that adds clauses on top of the base clue and ocean rules.
///
/// Passes are specific to a puzzle variant; the base encoder never depends on them.
pub trait ReductionPass: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, grid: &Grid, mapper: &VariableMapper) -> Result<Vec<Clause>, NurikabeError>;
}

/// Forces every unlabeled cell that touches no `2` clue to black.
///
/// Sound only while clues are limited to 1 and 2: a `1` island has no white
/// neighbours and a `2` island reaches exactly one step, so no other unlabeled
/// cell can ever be white.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableCellReduction;

impl ReductionPass for UnreachableCellReduction {
    fn name(&self) -> &'static str {
        "unreachable-cells"
    }

    fn apply(&self, grid: &Grid, mapper: &VariableMapper) -> Result<Vec<Clause>, NurikabeError> {
        let mut clauses = Vec::new();

        for (row, col) in grid.cells_with(Cell::Unlabeled) {
            let near_two = grid
                .neighbors(row, col)
                .into_iter()
                .any(|(r, c)| grid.get(r, c) == Some(Cell::Two));

            if !near_two {
                clauses.push(Clause::unit(mapper.index(row, col)?));
            }
        }

        Ok(clauses)
    }
}

/// Per-rule clause counts of one encoding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub grid_width: usize,
    pub grid_height: usize,
    pub variable_count: usize,
    pub one_clue_clauses: usize,
    pub two_clue_clauses: usize,
    pub reduction_clauses: usize,
    pub ocean_clauses: usize,
}

impl EncodingStatistics {
    pub fn total_clauses(&self) -> usize {
        self.one_clue_clauses + self.two_clue_clauses + self.reduction_clauses + self.ocean_clauses
    }
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.grid_width, self.grid_height)?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clue 1 clauses: {}", self.one_clue_clauses)?;
        writeln!(f, "  Clue 2 clauses: {}", self.two_clue_clauses)?;
        writeln!(f, "  Reduction clauses: {}", self.reduction_clauses)?;
        writeln!(f, "  Ocean clauses: {}", self.ocean_clauses)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses())?;
        Ok(())
    }
}

/// Turns a puzzle grid into a CNF formula whose models are legal shadings
pub struct ClauseEncoder {
    reductions: Vec<Box<dyn ReductionPass>>,
}

impl ClauseEncoder {
    /// Encoder with the base rules only
    pub fn new() -> Self {
        Self {
            reductions: Vec::new(),
        }
    }

    /// Encoder configured from settings
    pub fn from_config(config: &EncodingConfig) -> Self {
        let encoder = Self::new();
        if config.reduce_unreachable_cells {
            encoder.with_reduction(Box::new(UnreachableCellReduction))
        } else {
            encoder
        }
    }

    pub fn with_reduction(mut self, pass: Box<dyn ReductionPass>) -> Self {
        self.reductions.push(pass);
        self
    }

    pub fn reduction_names(&self) -> Vec<&'static str> {
        self.reductions.iter().map(|pass| pass.name()).collect()
    }

    /// Encode the grid into a formula
    pub fn encode(&self, grid: &Grid) -> Result<Formula, NurikabeError> {
        self.encode_with_statistics(grid).map(|(formula, _)| formula)
    }

    /// Encode the grid and report how many clauses each rule produced
    pub fn encode_with_statistics(
        &self,
        grid: &Grid,
    ) -> Result<(Formula, EncodingStatistics), NurikabeError> {
        let mapper = VariableMapper::for_grid(grid)?;
        let mut stats = EncodingStatistics {
            grid_width: grid.width,
            grid_height: grid.height,
            variable_count: mapper.variable_count(),
            ..Default::default()
        };
        let mut clauses = Vec::new();

        // 1. Clue constraints, row-major
        for (row, col) in grid.coordinates() {
            let before = clauses.len();
            match grid.get(row, col) {
                Some(Cell::One) => {
                    self.one_clue_clauses(grid, &mapper, row, col, &mut clauses)?;
                    stats.one_clue_clauses += clauses.len() - before;
                }
                Some(Cell::Two) => {
                    self.two_clue_clauses(grid, &mapper, row, col, &mut clauses)?;
                    stats.two_clue_clauses += clauses.len() - before;
                }
                _ => {}
            }
        }

        // 2. Variant-specific reductions
        for pass in &self.reductions {
            let added = pass.apply(grid, &mapper)?;
            log::debug!("Reduction pass '{}' added {} clauses", pass.name(), added.len());
            stats.reduction_clauses += added.len();
            clauses.extend(added);
        }

        // 3. No 2x2 all-black block
        let before = clauses.len();
        self.ocean_clauses(grid, &mapper, &mut clauses)?;
        stats.ocean_clauses = clauses.len() - before;

        log::debug!(
            "Encoded {}x{} grid into {} variables and {} clauses",
            grid.height,
            grid.width,
            mapper.variable_count(),
            clauses.len()
        );

        Ok((Formula::new(mapper.variable_count(), clauses), stats))
    }

    /// A `1` is white and every neighbour is black
    fn one_clue_clauses(
        &self,
        grid: &Grid,
        mapper: &VariableMapper,
        row: usize,
        col: usize,
        clauses: &mut Vec<Clause>,
    ) -> Result<(), NurikabeError> {
        clauses.push(Clause::unit(-mapper.index(row, col)?));
        for (r, c) in grid.neighbors(row, col) {
            clauses.push(Clause::unit(mapper.index(r, c)?));
        }
        Ok(())
    }

    /// A `2` is white with exactly one white neighbour, and that neighbour
    /// has no further white neighbours
    fn two_clue_clauses(
        &self,
        grid: &Grid,
        mapper: &VariableMapper,
        row: usize,
        col: usize,
        clauses: &mut Vec<Clause>,
    ) -> Result<(), NurikabeError> {
        let cell = mapper.index(row, col)?;
        let neighbors = grid.neighbors(row, col);
        let neighbor_vars = neighbors
            .iter()
            .map(|&(r, c)| mapper.index(r, c))
            .collect::<Result<Vec<_>, _>>()?;

        clauses.push(Clause::unit(-cell));

        if neighbor_vars.is_empty() {
            // A lone cell cannot hold a 2; contradict the unit clause above.
            clauses.push(Clause::unit(cell));
            return Ok(());
        }

        // At least one neighbour is white
        clauses.push(Clause::new(neighbor_vars.iter().map(|&n| -n).collect()));

        // At most one neighbour is white
        clauses.extend(
            neighbor_vars
                .iter()
                .tuple_combinations()
                .map(|(&a, &b)| Clause::binary(a, b)),
        );

        // A white neighbour stops the island
        for (&(nr, nc), &neighbor) in neighbors.iter().zip(&neighbor_vars) {
            for (gr, gc) in grid.neighbors(nr, nc) {
                if (gr, gc) != (row, col) {
                    clauses.push(Clause::binary(neighbor, mapper.index(gr, gc)?));
                }
            }
        }

        Ok(())
    }

    fn ocean_clauses(
        &self,
        grid: &Grid,
        mapper: &VariableMapper,
        clauses: &mut Vec<Clause>,
    ) -> Result<(), NurikabeError> {
        for row in 0..grid.height.saturating_sub(1) {
            for col in 0..grid.width.saturating_sub(1) {
                clauses.push(Clause::new(vec![
                    -mapper.index(row, col)?,
                    -mapper.index(row, col + 1)?,
                    -mapper.index(row + 1, col)?,
                    -mapper.index(row + 1, col + 1)?,
                ]));
            }
        }
        Ok(())
    }
}

impl Default for ClauseEncoder {
    fn default() -> Self {
        Self::from_config(&EncodingConfig::default())
    }
}
