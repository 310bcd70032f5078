//! The rectangular cell domain shared by every grid of a state.

use std::fmt;

use crate::error::DomainError;

/// A `width x height` rectangle of cells with its origin at `(0, 0)`.
///
/// Cells are addressed by `(x, y)` with `x` the column and `y` the row,
/// and laid out row-major: `index = y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    width: u32,
    height: u32,
}

impl Domain {
    /// Create a domain. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::EmptyDomain { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `(x, y)` lies inside the domain.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Check that `(x, y)` is in bounds and return its row-major index.
    pub fn check(&self, x: u32, y: u32) -> Result<usize, DomainError> {
        if !self.contains(x, y) {
            return Err(DomainError::CellOutOfBounds {
                x,
                y,
                domain: *self,
            });
        }
        Ok(self.index(x, y))
    }

    /// Row-major index of `(x, y)`. Caller guarantees the cell is in bounds.
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
