//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the builder-input for constructing a
//! [`Simulation`](crate::Simulation). [`validate()`](SimulationConfig::validate)
//! checks structural invariants at startup and returns the resolved
//! [`Domain`].

use std::error::Error;
use std::fmt;

use prism_core::{ActiveBand, Domain, DomainError, StableConfig};
use prism_operator::{DurationSteps, Operator};

// ── ScriptStep ─────────────────────────────────────────────────────

/// One scripted operator application: move the current state toward
/// `target` using `operator` over `steps`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptStep {
    /// The operator to apply.
    pub operator: Operator,
    /// The stable configuration to move toward.
    pub target: StableConfig,
    /// Step count passed to the operator.
    pub steps: DurationSteps,
}

impl ScriptStep {
    /// Instant establish of `target`.
    pub fn potentiality(target: StableConfig) -> Self {
        Self {
            operator: Operator::Potentiality,
            target,
            steps: DurationSteps::new(0),
        }
    }

    /// Linear approach toward `target` over `steps`.
    pub fn genesis(target: StableConfig, steps: u32) -> Self {
        Self {
            operator: Operator::Genesis,
            target,
            steps: DurationSteps::new(steps),
        }
    }

    /// Cubic decay toward `target` over `steps`.
    pub fn quench(target: StableConfig, steps: u32) -> Self {
        Self {
            operator: Operator::Quench,
            target,
            steps: DurationSteps::new(steps),
        }
    }
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({} steps)", self.operator, self.target, self.steps.get())
    }
}

/// The reference script: establish Potential, power up to Active over
/// 50 steps, then quench back to Null over 20.
pub fn canonical_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::potentiality(StableConfig::Potential),
        ScriptStep::genesis(StableConfig::Active, 50),
        ScriptStep::quench(StableConfig::Null, 20),
    ]
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulationConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The domain dimensions are invalid.
    Domain(DomainError),
    /// The script contains no steps.
    EmptyScript,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "domain: {e}"),
            Self::EmptyScript => write!(f, "script has no steps"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::EmptyScript => None,
        }
    }
}

impl From<DomainError> for ConfigError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Everything needed to build a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Domain width in cells. Default: 100.
    pub width: u32,
    /// Domain height in cells. Default: 10.
    pub height: u32,
    /// Band geometry for Active and Potential.
    pub band: ActiveBand,
    /// The configuration the run starts from. Default: Null.
    pub initial: StableConfig,
    /// Operator applications, run in order.
    pub script: Vec<ScriptStep>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 10,
            band: ActiveBand::default(),
            initial: StableConfig::Null,
            script: canonical_script(),
        }
    }
}

impl SimulationConfig {
    /// Check structural invariants and resolve the domain.
    pub fn validate(&self) -> Result<Domain, ConfigError> {
        let domain = Domain::new(self.width, self.height)?;
        if self.script.is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        Ok(domain)
    }

    /// Total frames the script records when run to completion.
    pub fn expected_frames(&self) -> u64 {
        self.script
            .iter()
            .map(|s| s.operator.frame_count(s.steps))
            .sum()
    }
}
