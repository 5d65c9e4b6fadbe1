//! Grid representation for Nurikabe puzzles

use crate::error::NurikabeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph used for cells without a clue
pub const UNLABELED: char = '.';

/// One cell of a puzzle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Island of exactly one cell
    One,
    /// Island of exactly two cells
    Two,
    /// Unknown cell
    Unlabeled,
    /// Any other clue character, carried through unmodified
    Other(char),
}

impl Cell {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '1' => Cell::One,
            '2' => Cell::Two,
            UNLABELED => Cell::Unlabeled,
            other => Cell::Other(other),
        }
    }

    /// The character this cell was read from
    pub fn glyph(self) -> char {
        match self {
            Cell::One => '1',
            Cell::Two => '2',
            Cell::Unlabeled => UNLABELED,
            Cell::Other(ch) => ch,
        }
    }

    /// Island size demanded by a numeric clue
    pub fn clue_value(self) -> Option<usize> {
        match self {
            Cell::One => Some(1),
            Cell::Two => Some(2),
            Cell::Unlabeled | Cell::Other(_) => None,
        }
    }

    /// Whether the cell carries any clue glyph
    pub fn is_clue(self) -> bool {
        !matches!(self, Cell::Unlabeled)
    }
}

/// A rectangular, immutable puzzle grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid from rows of cells, rejecting empty or ragged input
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, NurikabeError> {
        if rows.is_empty() {
            return Err(NurikabeError::MalformedGrid(
                "grid must contain at least one row".to_string(),
            ));
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            return Err(NurikabeError::MalformedGrid(
                "grid rows cannot be empty".to_string(),
            ));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(NurikabeError::MalformedGrid(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Benchmark puzzle: `1` wherever `row + col` is even, unlabeled elsewhere.
    ///
    /// Always solvable, and its size scales the encoding linearly.
    pub fn checkerboard(rows: usize, cols: usize) -> Result<Self, NurikabeError> {
        Self::from_rows(
            (0..rows)
                .map(|row| {
                    (0..cols)
                        .map(|col| if (row + col) % 2 == 0 { Cell::One } else { Cell::Unlabeled })
                        .collect()
                })
                .collect(),
        )
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Cell at the given coordinates, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.contains(row, col) {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbours in up, down, left, right order
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);
        if row > 0 {
            result.push((row - 1, col));
        }
        if row + 1 < self.height {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if col + 1 < self.width {
            result.push((row, col + 1));
        }
        result
    }

    /// All coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| (row, col)))
    }

    /// Coordinates of every cell holding the given clue
    pub fn cells_with(&self, cell: Cell) -> Vec<(usize, usize)> {
        self.coordinates()
            .filter(|&(row, col)| self.cells[self.index(row, col)] == cell)
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells carrying a clue glyph
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_clue()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[self.index(row, col)].glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(Cell::from_char).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_cell_classification() {
        assert_eq!(Cell::from_char('1'), Cell::One);
        assert_eq!(Cell::from_char('2'), Cell::Two);
        assert_eq!(Cell::from_char('.'), Cell::Unlabeled);
        assert_eq!(Cell::from_char('3'), Cell::Other('3'));
        assert_eq!(Cell::Other('x').glyph(), 'x');
        assert_eq!(Cell::Two.clue_value(), Some(2));
        assert_eq!(Cell::Other('3').clue_value(), None);
        assert!(!Cell::Unlabeled.is_clue());
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = grid_of(&["1.", ".2", ".."]);
        assert_eq!(grid.width, 2);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.cell_count(), 6);
        assert_eq!(grid.clue_count(), 2);
        assert_eq!(grid.get(1, 1), Some(Cell::Two));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![Cell::One, Cell::Unlabeled], vec![Cell::Unlabeled]];
        let err = Grid::from_rows(rows).unwrap_err();
        assert!(matches!(err, NurikabeError::MalformedGrid(_)));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(Grid::from_rows(Vec::new()).is_err());
        assert!(Grid::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_neighbors_respect_borders() {
        let grid = grid_of(&["...", "...", "..."]);
        assert_eq!(grid.neighbors(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(grid.neighbors(1, 1), vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
        assert_eq!(grid.neighbors(2, 2), vec![(1, 2), (2, 1)]);

        let single = grid_of(&["1"]);
        assert!(single.neighbors(0, 0).is_empty());
    }

    #[test]
    fn test_checkerboard() {
        let grid = Grid::checkerboard(3, 4).unwrap();
        assert_eq!(grid.to_string(), "1.1.\n.1.1\n1.1.\n");
        assert_eq!(grid.cells_with(Cell::One).len(), 6);
        assert!(Grid::checkerboard(0, 4).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let grid = grid_of(&["1.x", ".2."]);
        assert_eq!(grid.to_string(), "1.x\n.2.\n");
    }
}
