//! Display and output formatting utilities

use crate::config::OutputConfig;
use crate::error::NurikabeError;
use crate::nurikabe::{Cell, Grid};
use crate::sat::{Assignment, VariableMapper};

/// Projects a solver assignment back onto the puzzle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    black_glyph: char,
    unlabeled_glyph: char,
}

impl GridRenderer {
    pub fn new(black_glyph: char, unlabeled_glyph: char) -> Self {
        Self {
            black_glyph,
            unlabeled_glyph,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.black_glyph, config.unlabeled_glyph)
    }

    /// One string per row: black cells get the black glyph, white cells keep
    /// their clue glyph or get the unlabeled glyph
    pub fn render_rows(
        &self,
        grid: &Grid,
        assignment: &Assignment,
    ) -> Result<Vec<String>, NurikabeError> {
        let mapper = VariableMapper::for_grid(grid)?;
        let mut rows = Vec::with_capacity(grid.height);

        for row in 0..grid.height {
            let mut line = String::with_capacity(grid.width);
            for col in 0..grid.width {
                let glyph = if assignment.is_true(mapper.index(row, col)?) {
                    self.black_glyph
                } else {
                    match grid.get(row, col) {
                        Some(Cell::Unlabeled) | None => self.unlabeled_glyph,
                        Some(cell) => cell.glyph(),
                    }
                };
                line.push(glyph);
            }
            rows.push(line);
        }

        Ok(rows)
    }

    /// Rendered grid with a trailing newline after every row
    pub fn render_to_string(
        &self,
        grid: &Grid,
        assignment: &Assignment,
    ) -> Result<String, NurikabeError> {
        let mut output = String::new();
        for line in self.render_rows(grid, assignment)? {
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new('#', '.')
    }
}

/// Format a puzzle grid with row and column numbers
pub fn format_grid_with_coords(grid: &Grid) -> String {
    let mut output = String::new();

    output.push_str("   ");
    for col in 0..grid.width {
        output.push_str(&format!("{:2}", col % 10));
    }
    output.push('\n');

    for row in 0..grid.height {
        output.push_str(&format!("{:2} ", row));
        for col in 0..grid.width {
            let glyph = grid.get(row, col).map_or(' ', Cell::glyph);
            output.push_str(&format!(" {}", glyph));
        }
        output.push('\n');
    }

    output
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
