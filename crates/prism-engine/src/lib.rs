//! Simulation driver for the Prism state-transition engine.
//!
//! Provides [`Simulation`], which runs a script of operator applications
//! from a [`SimulationConfig`], threading the current state from one
//! operator into the next and recording every emitted frame into a
//! [`History`] for downstream renderers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod history;
pub mod metrics;
pub mod simulation;

pub use config::{canonical_script, ConfigError, ScriptStep, SimulationConfig};
pub use history::{History, HistoryEntry};
pub use metrics::{RunMetrics, StepTiming};
pub use simulation::{Simulation, SimulationError};
