//! Row-major 8-bit channel grids.

use crate::domain::Domain;
use crate::error::{DomainError, StateError};

/// A single 8-bit channel over a [`Domain`], one byte per cell.
///
/// `Grid` owns its buffer. Cloning allocates a fresh buffer, so two grids
/// never alias each other's storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    domain: Domain,
    cells: Vec<u8>,
}

impl Grid {
    /// A grid with every cell set to `value`.
    pub fn filled(domain: Domain, value: u8) -> Self {
        Self {
            domain,
            cells: vec![value; domain.cell_count()],
        }
    }

    /// A grid with every cell set to zero.
    pub fn zeroed(domain: Domain) -> Self {
        Self::filled(domain, 0)
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(domain: Domain, cells: Vec<u8>) -> Result<Self, StateError> {
        if cells.len() != domain.cell_count() {
            return Err(StateError::BufferLength {
                expected: domain.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { domain, cells })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(domain: Domain, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut cells = Vec::with_capacity(domain.cell_count());
        for y in 0..domain.height() {
            for x in 0..domain.width() {
                cells.push(f(x, y));
            }
        }
        Self { domain, cells }
    }

    /// The domain this grid covers.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Value at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<u8, DomainError> {
        let i = self.domain.check(x, y)?;
        Ok(self.cells[i])
    }

    /// Overwrite the value at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<(), DomainError> {
        let i = self.domain.check(x, y)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable row-major view of all cells.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// One row of cells.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.domain.height() {
            return None;
        }
        let w = self.domain.width() as usize;
        let start = self.domain.index(0, y);
        Some(&self.cells[start..start + w])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        let d = Domain::new(3, 3).unwrap();
        assert_eq!(
            Grid::from_vec(d, vec![0; 8]),
            Err(StateError::BufferLength {
                expected: 9,
                actual: 8
            })
        );
        assert!(Grid::from_vec(d, vec![0; 9]).is_ok());
    }

    #[test]
    fn from_fn_is_row_major() {
        let d = Domain::new(3, 2).unwrap();
        let g = Grid::from_fn(d, |x, y| (y * 10 + x) as u8);
        assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.row(1), Some(&[10u8, 11, 12][..]));
        assert_eq!(g.row(2), None);
    }

    #[test]
    fn clone_does_not_alias() {
        let d = Domain::new(2, 2).unwrap();
        let a = Grid::filled(d, 7);
        let mut b = a.clone();
        b.set(0, 0, 1).unwrap();
        assert_eq!(a.get(0, 0), Ok(7));
        assert_eq!(b.get(0, 0), Ok(1));
    }

    #[test]
    fn set_out_of_bounds_fails() {
        let d = Domain::new(2, 2).unwrap();
        let mut g = Grid::zeroed(d);
        assert!(g.set(2, 0, 1).is_err());
        assert!(g.as_slice().iter().all(|&v| v == 0));
    }
}
