//! Test utilities for Prism development.
//!
//! Provides small domains, hand-built states with recognisable patterns,
//! and assertions that compare grids cell by cell with useful failure
//! messages. See [`fixtures`] for the state builders.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use prism_core::{Domain, State};

/// Assert that two states hold identical grids, ignoring names.
///
/// Panics naming the first differing cell and channel.
#[track_caller]
pub fn assert_same_cells(actual: &State, expected: &State) {
    assert_eq!(
        actual.domain(),
        expected.domain(),
        "domain of '{}' differs from '{}'",
        actual.name(),
        expected.name()
    );
    assert_grids_eq("coverage", actual.coverage(), expected.coverage(), actual.domain());
    assert_grids_eq(
        "intensity",
        actual.intensities(),
        expected.intensities(),
        actual.domain(),
    );
}

/// Assert two row-major buffers over `domain` are equal, reporting the
/// first mismatching `(x, y)`.
#[track_caller]
pub fn assert_grids_eq(channel: &str, actual: &[u8], expected: &[u8], domain: Domain) {
    assert_eq!(actual.len(), expected.len(), "{channel}: length differs");
    let width = domain.width() as usize;
    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "{channel} differs at ({}, {}): got {}, expected {}",
            i % width,
            i / width,
            actual[i],
            expected[i]
        );
    }
}

/// Assert every cell of both grids is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_cells_near(actual: &State, expected: &State, tolerance: u8) {
    let pairs = actual
        .coverage()
        .iter()
        .zip(expected.coverage())
        .chain(actual.intensities().iter().zip(expected.intensities()));
    for (i, (&a, &e)) in pairs.enumerate() {
        assert!(
            a.abs_diff(e) <= tolerance,
            "cell {i} of '{}': got {a}, expected {e} (tolerance {tolerance})",
            actual.name()
        );
    }
}
