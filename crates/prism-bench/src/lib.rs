//! Benchmark profiles for the Prism state-transition engine.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: the 100x10 canonical scenario (73 frames)
//! - [`stress_profile`]: 1000x1000 cells with a wide band and long script

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use prism_core::{ActiveBand, StableConfig};
use prism_engine::{canonical_script, ScriptStep, SimulationConfig};

/// The canonical scenario on the 100x10 reference domain.
pub fn reference_profile() -> SimulationConfig {
    SimulationConfig {
        width: 100,
        height: 10,
        band: ActiveBand::default(),
        initial: StableConfig::Null,
        script: canonical_script(),
    }
}

/// A 1M-cell domain with a 200-row band and 10x the reference step counts.
pub fn stress_profile() -> SimulationConfig {
    SimulationConfig {
        width: 1000,
        height: 1000,
        band: ActiveBand {
            rows: 200,
            ..ActiveBand::default()
        },
        initial: StableConfig::Null,
        script: vec![
            ScriptStep::potentiality(StableConfig::Potential),
            ScriptStep::genesis(StableConfig::Active, 500),
            ScriptStep::quench(StableConfig::Null, 200),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile().validate().is_ok());
        assert!(stress_profile().validate().is_ok());
        assert_eq!(reference_profile().expected_frames(), 73);
        assert_eq!(stress_profile().expected_frames(), 1 + 501 + 201);
    }
}
