//! Transition operators for the Prism state-transition engine.
//!
//! An [`Operator`] moves a [`State`](prism_core::State) toward a target
//! configuration over a number of [`DurationSteps`]. Invoking one with
//! [`Operator::apply`] checks its preconditions synchronously, then spawns
//! a producer thread that streams [`Frame`]s through a rendezvous channel
//! as a [`TransitionStream`].
//!
//! The pure per-step kernel is also available synchronously through
//! [`Operator::frame`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blend;
pub mod operator;
pub mod steps;
pub mod stream;

pub use operator::Operator;
pub use steps::DurationSteps;
pub use stream::{Frame, TransitionStream};
