//! Core types for the Prism state-transition engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the cell [`Domain`], the 8-bit [`Grid`], the paired coverage/intensity
//! [`State`], the three stable configurations, and the error types shared
//! by the operator and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod grid;
pub mod stable;
pub mod state;

pub use domain::Domain;
pub use error::{DomainError, OperatorError, StateError};
pub use grid::Grid;
pub use stable::{ActiveBand, StableConfig, StableStates};
pub use state::State;
