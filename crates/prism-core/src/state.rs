//! The [`State`] snapshot: a named coverage grid paired with an
//! intensity grid over one domain.

use crate::domain::Domain;
use crate::error::{DomainError, StateError};
use crate::grid::Grid;

/// A snapshot of the process at one point in time.
///
/// Coverage (the "shape") says where the state exists: 0 is absent and
/// 255 fully present. Intensity is the per-cell energy. Both grids always
/// share one [`Domain`]; the constructors enforce it and no accessor can
/// replace a grid with one of different bounds.
///
/// The name is for diagnostics only and plays no part in equality of
/// cells. Use [`same_cells`](State::same_cells) to compare grids while
/// ignoring names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    name: String,
    shape: Grid,
    intensity: Grid,
}

impl State {
    /// Pair two grids under a name.
    pub fn new(name: impl Into<String>, shape: Grid, intensity: Grid) -> Result<Self, StateError> {
        if shape.domain() != intensity.domain() {
            return Err(StateError::GridMismatch {
                shape: shape.domain(),
                intensity: intensity.domain(),
            });
        }
        Ok(Self {
            name: name.into(),
            shape,
            intensity,
        })
    }

    /// Build a state from two raw row-major buffers.
    pub fn from_buffers(
        name: impl Into<String>,
        domain: Domain,
        shape: Vec<u8>,
        intensity: Vec<u8>,
    ) -> Result<Self, StateError> {
        let shape = Grid::from_vec(domain, shape)?;
        let intensity = Grid::from_vec(domain, intensity)?;
        Self::new(name, shape, intensity)
    }

    /// Zero coverage and zero intensity everywhere.
    pub fn empty(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            shape: Grid::zeroed(domain),
            intensity: Grid::zeroed(domain),
        }
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds shared by both grids.
    pub fn domain(&self) -> Domain {
        self.shape.domain()
    }

    /// The coverage grid.
    pub fn shape(&self) -> &Grid {
        &self.shape
    }

    /// The intensity grid.
    pub fn intensity(&self) -> &Grid {
        &self.intensity
    }

    /// Row-major coverage values.
    pub fn coverage(&self) -> &[u8] {
        self.shape.as_slice()
    }

    /// Row-major intensity values.
    pub fn intensities(&self) -> &[u8] {
        self.intensity.as_slice()
    }

    /// Coverage at `(x, y)`.
    pub fn coverage_at(&self, x: u32, y: u32) -> Result<u8, DomainError> {
        self.shape.get(x, y)
    }

    /// Intensity at `(x, y)`.
    pub fn intensity_at(&self, x: u32, y: u32) -> Result<u8, DomainError> {
        self.intensity.get(x, y)
    }

    /// Mutable row-major coverage values.
    pub fn coverage_mut(&mut self) -> &mut [u8] {
        self.shape.as_mut_slice()
    }

    /// Mutable row-major intensity values.
    pub fn intensity_mut(&mut self) -> &mut [u8] {
        self.intensity.as_mut_slice()
    }

    /// Overwrite both channels of one cell.
    pub fn set_cell(
        &mut self,
        x: u32,
        y: u32,
        coverage: u8,
        intensity: u8,
    ) -> Result<(), DomainError> {
        self.shape.set(x, y, coverage)?;
        self.intensity.set(x, y, intensity)
    }

    /// Deep copy under a new name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: self.shape.clone(),
            intensity: self.intensity.clone(),
        }
    }

    /// Sum of intensity over cells with non-zero coverage.
    ///
    /// Cells with zero coverage contribute nothing whatever their
    /// intensity. Recomputed on every call.
    pub fn total_magnitude(&self) -> u64 {
        self.coverage()
            .iter()
            .zip(self.intensities())
            .filter(|&(&c, _)| c > 0)
            .map(|(_, &i)| u64::from(i))
            .sum()
    }

    /// Number of cells with non-zero coverage.
    pub fn covered_cells(&self) -> usize {
        self.coverage().iter().filter(|&&c| c > 0).count()
    }

    /// Mean intensity over covered cells, `0.0` when nothing is covered.
    pub fn mean_intensity(&self) -> f64 {
        match self.covered_cells() {
            0 => 0.0,
            n => self.total_magnitude() as f64 / n as f64,
        }
    }

    /// Cell-for-cell equality of both grids, ignoring names.
    pub fn same_cells(&self, other: &State) -> bool {
        self.shape == other.shape && self.intensity == other.intensity
    }
}
