//! Error types for the Prism state-transition engine.
//!
//! Organized by subsystem: domain construction, state assembly, and
//! operator invocation. Engine-level errors live in `prism-engine`.

use std::error::Error;
use std::fmt;

use crate::domain::Domain;

/// Errors arising from domain construction or cell addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// Attempted to construct a domain with zero cells.
    EmptyDomain {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A cell coordinate lies outside the domain.
    CellOutOfBounds {
        /// Column of the offending cell.
        x: u32,
        /// Row of the offending cell.
        y: u32,
        /// The domain the coordinate was checked against.
        domain: Domain,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain { width, height } => {
                write!(f, "domain {width}x{height} has no cells")
            }
            Self::CellOutOfBounds { x, y, domain } => {
                write!(f, "cell ({x}, {y}) out of bounds for domain {domain}")
            }
        }
    }
}

impl Error for DomainError {}

/// Errors from assembling a [`State`](crate::State) out of raw grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// The coverage and intensity grids cover different domains.
    GridMismatch {
        /// Domain of the coverage grid.
        shape: Domain,
        /// Domain of the intensity grid.
        intensity: Domain,
    },
    /// A raw buffer does not hold exactly one value per cell.
    BufferLength {
        /// Cell count of the domain.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridMismatch { shape, intensity } => {
                write!(
                    f,
                    "shape grid {shape} and intensity grid {intensity} differ in bounds"
                )
            }
            Self::BufferLength { expected, actual } => {
                write!(f, "buffer holds {actual} cells, domain has {expected}")
            }
        }
    }
}

impl Error for StateError {}

/// Errors from operator invocation.
///
/// Precondition failures (`DomainMismatch`, `InvalidStepCount`,
/// `StepOutOfRange`, `SpawnFailed`) are reported synchronously, before
/// any frame is produced. `ProducerPanicked` is only observable after
/// the stream has ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorError {
    /// `initial` and `target` have different bounds.
    DomainMismatch {
        /// Domain of the initial state.
        initial: Domain,
        /// Domain of the target state.
        target: Domain,
    },
    /// The requested step count is negative or does not fit in a `u32`.
    InvalidStepCount {
        /// The rejected value.
        value: i64,
    },
    /// A frame index past the end of the sequence was requested.
    StepOutOfRange {
        /// The requested frame index.
        step: u32,
        /// Number of frames the invocation emits.
        frames: u64,
    },
    /// The producer thread could not be spawned.
    SpawnFailed {
        /// Description from the OS.
        reason: String,
    },
    /// The producer thread panicked mid-sequence.
    ProducerPanicked {
        /// Name of the operator whose producer failed.
        operator: &'static str,
    },
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainMismatch { initial, target } => {
                write!(f, "initial domain {initial} does not match target domain {target}")
            }
            Self::InvalidStepCount { value } => {
                write!(f, "step count {value} is not a non-negative 32-bit integer")
            }
            Self::StepOutOfRange { step, frames } => {
                write!(f, "frame {step} requested from a sequence of {frames} frames")
            }
            Self::SpawnFailed { reason } => write!(f, "producer spawn failed: {reason}"),
            Self::ProducerPanicked { operator } => {
                write!(f, "{operator} producer panicked")
            }
        }
    }
}

impl Error for OperatorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_domains() {
        let err = OperatorError::DomainMismatch {
            initial: Domain::new(4, 4).unwrap(),
            target: Domain::new(8, 2).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "initial domain 4x4 does not match target domain 8x2"
        );
    }

    #[test]
    fn display_step_count() {
        let err = OperatorError::InvalidStepCount { value: -3 };
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn display_step_out_of_range() {
        let err = OperatorError::StepOutOfRange { step: 4, frames: 4 };
        assert_eq!(err.to_string(), "frame 4 requested from a sequence of 4 frames");
    }

    #[test]
    fn display_out_of_bounds() {
        let err = DomainError::CellOutOfBounds {
            x: 5,
            y: 0,
            domain: Domain::new(5, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "cell (5, 0) out of bounds for domain 5x1");
    }
}
