//! Variable mapping for SAT encoding

use crate::error::NurikabeError;
use crate::nurikabe::Grid;

/// Bijection between grid coordinates and SAT variables.
///
/// Cell `(row, col)` maps to `row * cols + col + 1`. A true variable means the
/// cell is black (ocean), false means white (island).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableMapper {
    rows: usize,
    cols: usize,
}

impl VariableMapper {
    /// Create a mapper for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, NurikabeError> {
        if rows == 0 || cols == 0 {
            return Err(NurikabeError::MalformedGrid(format!(
                "cannot map variables for a {}x{} grid",
                rows, cols
            )));
        }
        let fits = rows
            .checked_mul(cols)
            .is_some_and(|count| count <= i32::MAX as usize);
        if !fits {
            return Err(NurikabeError::MalformedGrid(format!(
                "{}x{} grid exceeds the DIMACS variable range",
                rows, cols
            )));
        }

        Ok(Self { rows, cols })
    }

    pub fn for_grid(grid: &Grid) -> Result<Self, NurikabeError> {
        Self::new(grid.height, grid.width)
    }

    /// Variable for the cell at `(row, col)`
    pub fn index(&self, row: usize, col: usize) -> Result<i32, NurikabeError> {
        if row >= self.rows || col >= self.cols {
            return Err(NurikabeError::OutOfRange(format!(
                "cell ({}, {}) outside {}x{} grid",
                row, col, self.rows, self.cols
            )));
        }
        Ok((row * self.cols + col + 1) as i32)
    }

    /// Cell coordinates for a variable
    pub fn coordinates(&self, variable: i32) -> Result<(usize, usize), NurikabeError> {
        if variable < 1 || variable as usize > self.variable_count() {
            return Err(NurikabeError::OutOfRange(format!(
                "variable {} outside 1..={}",
                variable,
                self.variable_count()
            )));
        }
        let offset = variable as usize - 1;
        Ok((offset / self.cols, offset % self.cols))
    }

    pub fn variable_count(&self) -> usize {
        self.rows * self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_numbering() {
        let mapper = VariableMapper::new(2, 3).unwrap();
        assert_eq!(mapper.index(0, 0).unwrap(), 1);
        assert_eq!(mapper.index(0, 2).unwrap(), 3);
        assert_eq!(mapper.index(1, 0).unwrap(), 4);
        assert_eq!(mapper.index(1, 2).unwrap(), 6);
        assert_eq!(mapper.variable_count(), 6);
    }

    #[test]
    fn test_bijection() {
        for (rows, cols) in [(1, 1), (1, 5), (4, 1), (3, 7)] {
            let mapper = VariableMapper::new(rows, cols).unwrap();
            let mut seen = Vec::new();
            for row in 0..rows {
                for col in 0..cols {
                    let var = mapper.index(row, col).unwrap();
                    assert!(var > 0);
                    assert_eq!(mapper.coordinates(var).unwrap(), (row, col));
                    seen.push(var);
                }
            }
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), rows * cols);
        }
    }

    #[test]
    fn test_variable_bounds() {
        let mapper = VariableMapper::new(2, 2).unwrap();

        assert!(matches!(mapper.index(2, 0), Err(NurikabeError::OutOfRange(_))));
        assert!(matches!(mapper.index(0, 2), Err(NurikabeError::OutOfRange(_))));
        assert!(mapper.coordinates(0).is_err());
        assert!(mapper.coordinates(-1).is_err());
        assert!(mapper.coordinates(5).is_err());
    }

    #[test]
    fn test_degenerate_shapes_rejected() {
        assert!(VariableMapper::new(0, 3).is_err());
        assert!(VariableMapper::new(3, 0).is_err());
        assert!(VariableMapper::new(usize::MAX, 2).is_err());
    }
}
