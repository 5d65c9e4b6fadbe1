//! Black/white colouring of a puzzle grid

use super::Grid;
use crate::error::NurikabeError;
use crate::sat::{Assignment, VariableMapper};

/// Which cells of a grid are black (ocean); everything else is white (island)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shading {
    pub width: usize,
    pub height: usize,
    black: Vec<bool>,
}

impl Shading {
    /// Project a solver assignment onto the grid shape
    pub fn from_assignment(
        grid: &Grid,
        mapper: &VariableMapper,
        assignment: &Assignment,
    ) -> Result<Self, NurikabeError> {
        let mut black = Vec::with_capacity(grid.cell_count());
        for (row, col) in grid.coordinates() {
            black.push(assignment.is_true(mapper.index(row, col)?));
        }

        Ok(Self {
            width: grid.width,
            height: grid.height,
            black,
        })
    }

    /// Parse a rendered solution: `black_glyph` marks black cells, any other glyph is white
    pub fn parse(content: &str, black_glyph: char) -> Result<Self, NurikabeError> {
        let rows: Vec<Vec<bool>> = content
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(|ch| ch == black_glyph)
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 {
            return Err(NurikabeError::MalformedGrid(
                "rendered solution is empty".to_string(),
            ));
        }
        if let Some(i) = rows.iter().position(|row| row.len() != width) {
            return Err(NurikabeError::MalformedGrid(format!(
                "solution row {} has length {}, expected {}",
                i,
                rows[i].len(),
                width
            )));
        }

        Ok(Self {
            width,
            height,
            black: rows.into_iter().flatten().collect(),
        })
    }

    pub fn is_black(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.black[row * self.width + col]
    }

    pub fn black_count(&self) -> usize {
        self.black.iter().filter(|&&b| b).count()
    }

    pub fn matches_shape(&self, grid: &Grid) -> bool {
        self.width == grid.width && self.height == grid.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurikabe::parse_grid_from_string;

    #[test]
    fn test_from_assignment() {
        let grid = parse_grid_from_string("1.\n..").unwrap();
        let mapper = VariableMapper::for_grid(&grid).unwrap();
        let assignment = Assignment::from_true_variables([2, 3, 4]);

        let shading = Shading::from_assignment(&grid, &mapper, &assignment).unwrap();
        assert!(!shading.is_black(0, 0));
        assert!(shading.is_black(0, 1));
        assert!(shading.is_black(1, 1));
        assert_eq!(shading.black_count(), 3);
        assert!(shading.matches_shape(&grid));
    }

    #[test]
    fn test_parse_rendered_solution() {
        let shading = Shading::parse("1#\n##\n", '#').unwrap();
        assert_eq!((shading.width, shading.height), (2, 2));
        assert!(!shading.is_black(0, 0));
        assert_eq!(shading.black_count(), 3);

        assert!(Shading::parse("1#\n#\n", '#').is_err());
        assert!(Shading::parse("\n", '#').is_err());
    }
}
