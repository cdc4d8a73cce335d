//! Square grid of colored cells.
//!
//! Each cell keeps the color it was generated with for its whole lifetime.
//! Capturing a cell only sets its `captured` flag; the color shown for the
//! captured region is the game's current color, held by
//! [`GameState`](crate::game::GameState).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CAPTURED_MARK, COLOR_GLYPHS, MAX_COLORS, MIN_COLORS};
use crate::error::{GameError, Result};

/// A palette index in `[0, num_colors)`.
pub type Color = u8;

/// A (row, column) position on the board.
pub type Point = (usize, usize);

/// One cell of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    /// Color drawn when the board was generated
    pub color: Color,
    pub captured: bool,
}

impl Cell {
    fn new(row: usize, column: usize, color: Color) -> Self {
        Self {
            row,
            column,
            color,
            captured: false,
        }
    }

    pub fn point(&self) -> Point {
        (self.row, self.column)
    }
}

/// An NxN grid of cells stored row-major.
///
/// `Clone` is a full deep copy: the cells live in an owned `Vec`, so two
/// boards never share a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    num_colors: usize,
    cells: Vec<Cell>,
}

pub(crate) fn check_palette(num_colors: usize) -> Result<()> {
    if !(MIN_COLORS..=MAX_COLORS).contains(&num_colors) {
        return Err(GameError::InvalidColorCount(num_colors));
    }
    Ok(())
}

impl Board {
    /// Generate a board where every cell gets an independent, uniformly drawn
    /// color in `[0, num_colors)`.
    ///
    /// With `seed` set, the same arguments always produce the same board.
    pub fn generate(size: usize, num_colors: usize, seed: Option<u64>) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize(size));
        }
        check_palette(num_colors)?;

        let mut rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for column in 0..size {
                let color = rng.usize(..num_colors) as Color;
                cells.push(Cell::new(row, column, color));
            }
        }
        Ok(Self {
            size,
            num_colors,
            cells,
        })
    }

    /// Build a board from explicit rows of colors, nothing captured.
    pub fn from_colors(rows: &[Vec<Color>], num_colors: usize) -> Result<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return Err(GameError::InvalidSize(size));
        }
        check_palette(num_colors)?;

        let mut cells = Vec::with_capacity(size * size);
        for (row, colors) in rows.iter().enumerate() {
            for (column, &color) in colors.iter().enumerate() {
                if color as usize >= num_colors {
                    return Err(GameError::invalid_color(color, num_colors));
                }
                cells.push(Cell::new(row, column, color));
            }
        }
        Ok(Self {
            size,
            num_colors,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn idx(&self, (row, column): Point) -> usize {
        row * self.size + column
    }

    fn check(&self, point: Point) -> Result<usize> {
        if point.0 >= self.size || point.1 >= self.size {
            return Err(GameError::OutOfBounds {
                point,
                size: self.size,
            });
        }
        Ok(self.idx(point))
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell> {
        let i = self.check((row, column))?;
        Ok(&self.cells[i])
    }

    /// Original color of the cell at (row, column).
    pub fn color_at(&self, row: usize, column: usize) -> Result<Color> {
        self.cell(row, column).map(|c| c.color)
    }

    pub fn is_captured(&self, row: usize, column: usize) -> Result<bool> {
        self.cell(row, column).map(|c| c.captured)
    }

    /// Mark a cell captured. Capturing an already captured cell does nothing.
    pub fn set_captured(&mut self, row: usize, column: usize) -> Result<()> {
        let i = self.check((row, column))?;
        self.cells[i].captured = true;
        Ok(())
    }

    /// Full independent copy of the board.
    pub fn clone_deep(&self) -> Self {
        self.clone()
    }

    /// Capture the in-range cell at `point` if it is still free and was
    /// generated with `color`. Returns whether it was captured.
    pub(crate) fn capture_matching(&mut self, point: Point, color: Color) -> bool {
        let i = self.idx(point);
        let cell = &mut self.cells[i];
        if cell.captured || cell.color != color {
            return false;
        }
        cell.captured = true;
        true
    }

    pub(crate) fn release_all(&mut self) {
        for cell in &mut self.cells {
            cell.captured = false;
        }
    }

    pub fn captured_count(&self) -> usize {
        self.cells.iter().filter(|c| c.captured).count()
    }

    pub fn captured_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().filter(|c| c.captured).map(Cell::point)
    }

    /// Check the structural invariants of a board that came from outside,
    /// e.g. a deserialized snapshot.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.size == 0 {
            return Err("board size is zero".to_string());
        }
        if check_palette(self.num_colors).is_err() {
            return Err(format!("bad palette size {}", self.num_colors));
        }
        if self.cells.len() != self.size * self.size {
            return Err(format!(
                "expected {} cells, found {}",
                self.size * self.size,
                self.cells.len()
            ));
        }
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.point() != (i / self.size, i % self.size) {
                return Err(format!(
                    "cell at index {i} claims position ({}, {})",
                    cell.row, cell.column
                ));
            }
            if cell.color as usize >= self.num_colors {
                return Err(format!("cell at index {i} has color {}", cell.color));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let glyph = COLOR_GLYPHS
                    .get(cell.color as usize)
                    .map(|&b| b as char)
                    .unwrap_or('?');
                let mark = if cell.captured { CAPTURED_MARK } else { ' ' };
                write!(f, "{glyph}{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
