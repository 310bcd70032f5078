//! Prism: a discrete-time state-transition engine.
//!
//! A state is a paired coverage/intensity field over a rectangular domain.
//! Operators stream interpolated intermediate states from one stable
//! configuration toward another, and a simulation driver chains them into
//! an ordered history ready for rendering.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Prism sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use prism::prelude::*;
//!
//! // The reference scenario: Null -> Potential -> Active -> Null.
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! sim.run().unwrap();
//! let history = sim.history();
//! assert_eq!(history.len(), 73);
//! assert!(history.last().unwrap().state.same_cells(sim.stable().null()));
//!
//! // Operators can also be streamed directly.
//! let domain = Domain::new(16, 4).unwrap();
//! let stable = StableStates::new(domain, ActiveBand::default());
//! let frames: Vec<Frame> = Operator::Quench
//!     .apply(stable.active(), stable.null(), DurationSteps::new(8))
//!     .unwrap()
//!     .collect();
//! assert_eq!(frames.len(), 9);
//! assert_eq!(frames[8].state.total_magnitude(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `prism-core` | Domains, grids, states, stable configurations, errors |
//! | [`operator`] | `prism-operator` | Operators, step counts, blend kernels, frame streams |
//! | [`engine`] | `prism-engine` | Simulation driver, config, history, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`prism-core`).
///
/// Contains [`types::Domain`], [`types::Grid`], [`types::State`], the
/// stable-configuration factories in [`types::stable`], and error types.
pub use prism_core as types;

/// Transition operators (`prism-operator`).
///
/// The closed [`operator::Operator`] set and the
/// [`operator::TransitionStream`] it produces.
pub use prism_operator as operator;

/// Simulation driver (`prism-engine`).
///
/// [`engine::Simulation`] runs a script of operators and records an
/// [`engine::History`].
pub use prism_engine as engine;

/// Common imports for typical Prism usage.
///
/// ```rust
/// use prism::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use prism_core::{ActiveBand, Domain, Grid, StableConfig, StableStates, State};

    // Errors
    pub use prism_core::{DomainError, OperatorError, StateError};

    // Operators
    pub use prism_operator::{DurationSteps, Frame, Operator, TransitionStream};

    // Engine
    pub use prism_engine::{
        ConfigError, History, HistoryEntry, RunMetrics, ScriptStep, Simulation, SimulationConfig,
        SimulationError,
    };
}
