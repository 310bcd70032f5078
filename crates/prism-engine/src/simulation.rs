//! The simulation driver.
//!
//! [`Simulation`] runs a script of operator applications in order,
//! threading the evolving current state through each one and recording
//! every emitted frame into a [`History`].
//!
//! # Concurrency
//!
//! Script steps are strictly sequential: the next operator is not invoked
//! until the previous stream has been fully drained. Within a step the
//! operator's producer thread renders frame `i + 1` while the driver
//! records frame `i`; the rendezvous channel bounds this to one frame in
//! flight.
//!
//! # Failure
//!
//! A script step either records all of its frames or none. If the
//! producer fails mid-stream, the frames already recorded for that step
//! are rolled back and the current state is left where it was.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use prism_core::{Domain, OperatorError, StableStates, State};
use prism_operator::TransitionStream;

use crate::config::{ConfigError, ScriptStep, SimulationConfig};
use crate::history::{History, HistoryEntry};
use crate::metrics::{RunMetrics, StepTiming};

// ── SimulationError ─────────────────────────────────────────────

/// Errors from executing a script step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationError {
    /// The operator rejected its invocation or its producer failed.
    Operator {
        /// Index of the failing script step.
        script_index: usize,
        /// The underlying operator error.
        source: OperatorError,
    },
    /// The operator's stream ended without emitting any frame.
    EmptyTransition {
        /// Index of the script step.
        script_index: usize,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator {
                script_index,
                source,
            } => write!(f, "script step {script_index} failed: {source}"),
            Self::EmptyTransition { script_index } => {
                write!(f, "script step {script_index} emitted no frames")
            }
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Operator { source, .. } => Some(source),
            Self::EmptyTransition { .. } => None,
        }
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// Starts the frame stream for one script step from the current state
/// toward the step's target template.
type Launch = fn(ScriptStep, Arc<State>, Arc<State>) -> Result<TransitionStream, OperatorError>;

fn launch_operator(
    step: ScriptStep,
    current: Arc<State>,
    target: Arc<State>,
) -> Result<TransitionStream, OperatorError> {
    step.operator.apply_shared(current, target, step.steps)
}

/// Sequential driver over a script of operator applications.
///
/// Created from a [`SimulationConfig`] via [`new()`](Simulation::new),
/// which builds the stable templates once and starts from the configured
/// initial configuration (Null by default).
///
/// # Example
///
/// ```
/// use prism_engine::{Simulation, SimulationConfig};
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// let history = sim.run().unwrap();
/// assert_eq!(history.len(), 73);
/// ```
pub struct Simulation {
    domain: Domain,
    initial: Arc<State>,
    script: Vec<ScriptStep>,
    stable: StableStates,
    current: Arc<State>,
    cursor: usize,
    history: History,
    metrics: RunMetrics,
    launch: Launch,
}

impl Simulation {
    /// Validate `config` and build a ready-to-run simulation.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let domain = config.validate()?;
        let stable = StableStates::new(domain, config.band);
        let initial = Arc::clone(stable.get(config.initial));
        debug!(
            "simulation built: domain {domain}, {} script steps from {}",
            config.script.len(),
            config.initial
        );
        Ok(Self {
            domain,
            current: Arc::clone(&initial),
            initial,
            script: config.script,
            stable,
            cursor: 0,
            history: History::new(),
            metrics: RunMetrics::default(),
            launch: launch_operator,
        })
    }

    /// Run every remaining script step and return the full history.
    ///
    /// On error, steps completed before the failure stay recorded.
    pub fn run(&mut self) -> Result<&History, SimulationError> {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();
        let outcome = loop {
            match self.execute_next() {
                Ok(Some(timing)) => metrics.steps.push(timing),
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        metrics.total_us = start.elapsed().as_micros() as u64;
        self.metrics = metrics;
        outcome.map(|()| &self.history)
    }

    /// Run exactly the next script step.
    ///
    /// Returns the number of frames it recorded, or `None` once the
    /// script is exhausted.
    pub fn step(&mut self) -> Result<Option<u64>, SimulationError> {
        let start = Instant::now();
        let timing = self.execute_next()?;
        let frames = timing.as_ref().map(|t| t.frames);
        self.metrics = RunMetrics {
            steps: timing.into_iter().collect(),
            total_us: start.elapsed().as_micros() as u64,
        };
        Ok(frames)
    }

    /// Rewind the script, clear the history, and restore the initial state.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.history.clear();
        self.current = Arc::clone(&self.initial);
        self.metrics = RunMetrics::default();
    }

    fn execute_next(&mut self) -> Result<Option<StepTiming>, SimulationError> {
        let Some(&entry) = self.script.get(self.cursor) else {
            return Ok(None);
        };
        let script_index = self.cursor;
        let start = Instant::now();
        let operator_err = |source| SimulationError::Operator {
            script_index,
            source,
        };

        let target = Arc::clone(self.stable.get(entry.target));
        let mut stream =
            (self.launch)(entry, Arc::clone(&self.current), target).map_err(operator_err)?;

        let mark = self.history.len();
        let mut last = None;
        for frame in stream.by_ref() {
            let state = Arc::new(frame.state);
            self.history.push(HistoryEntry {
                script_index,
                operator: entry.operator,
                step: frame.step,
                progress: frame.progress,
                state: Arc::clone(&state),
            });
            last = Some(state);
        }

        let frames = match stream.finish() {
            Ok(frames) => frames,
            Err(e) => {
                self.history.truncate(mark);
                return Err(operator_err(e));
            }
        };
        let Some(last) = last else {
            return Err(SimulationError::EmptyTransition { script_index });
        };

        self.current = last;
        self.cursor += 1;
        let elapsed_us = start.elapsed().as_micros() as u64;
        info!(
            "script step {script_index} ({entry}) recorded {frames} frames in {elapsed_us}us, magnitude {}",
            self.current.total_magnitude()
        );
        Ok(Some(StepTiming {
            script_index,
            operator: entry.operator.name(),
            frames,
            elapsed_us,
        }))
    }

    /// The state the next script step starts from.
    pub fn current(&self) -> &State {
        &self.current
    }

    /// Everything recorded so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Consume the simulation and keep its history.
    pub fn into_history(self) -> History {
        self.history
    }

    /// The stable templates this simulation moves between.
    pub fn stable(&self) -> &StableStates {
        &self.stable
    }

    /// The domain every state covers.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The script being run.
    pub fn script(&self) -> &[ScriptStep] {
        &self.script
    }

    /// Index of the next script step to run.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every script step has run.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }

    /// Metrics from the most recent `run()` or `step()`.
    pub fn last_metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("domain", &self.domain)
            .field("cursor", &self.cursor)
            .field("script_len", &self.script.len())
            .field("history_len", &self.history.len())
            .field("current", &self.current.name())
            .finish()
    }
}
