//! The closed set of transition operators.

use std::fmt;
use std::sync::Arc;

use prism_core::{OperatorError, State};

use crate::blend::{self, blend_into};
use crate::steps::DurationSteps;
use crate::stream::{Frame, TransitionStream};

/// A transformation that moves a state toward a target configuration.
///
/// The operator set is fixed, so dispatch is a `match` rather than a
/// trait object. Every operator is a pure function of
/// `(initial, target, steps, step)`: inputs are never mutated and every
/// emitted frame owns freshly allocated grids.
///
/// # Examples
///
/// ```
/// use prism_core::{stable, ActiveBand, Domain};
/// use prism_operator::{DurationSteps, Operator};
///
/// let domain = Domain::new(8, 4).unwrap();
/// let band = ActiveBand::default();
/// let from = stable::potential(domain, &band);
/// let to = stable::active(domain, &band);
///
/// let frames: Vec<_> = Operator::Genesis
///     .apply(&from, &to, DurationSteps::new(4))
///     .unwrap()
///     .collect();
/// assert_eq!(frames.len(), 5);
/// assert!(frames[4].state.same_cells(&to));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Instant establish: one frame, a deep copy of the target.
    /// Ignores the step count and the initial state.
    Potentiality,
    /// Linear approach: both grids blend at a constant rate from
    /// initial to target.
    Genesis,
    /// Non-linear decay: both grids fall from initial to target along
    /// the cubic ease-out curve `(1 - t)^3`.
    Quench,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 3] = [Self::Potentiality, Self::Genesis, Self::Quench];

    /// Human-readable name for diagnostics and frame names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Potentiality => "Potentiality",
            Self::Genesis => "Genesis",
            Self::Quench => "Quench",
        }
    }

    /// Number of frames an invocation over `steps` emits.
    pub fn frame_count(&self, steps: DurationSteps) -> u64 {
        match self {
            Self::Potentiality => 1,
            Self::Genesis | Self::Quench => u64::from(steps.get()) + 1,
        }
    }

    /// Check the invocation preconditions without producing anything.
    pub fn check(&self, initial: &State, target: &State) -> Result<(), OperatorError> {
        if initial.domain() != target.domain() {
            return Err(OperatorError::DomainMismatch {
                initial: initial.domain(),
                target: target.domain(),
            });
        }
        Ok(())
    }

    /// Start streaming the transition from `initial` toward `target`.
    ///
    /// Preconditions are checked here, before the producer thread is
    /// spawned, so a failed call never yields a partial sequence. The
    /// inputs are copied once into the producer; see
    /// [`apply_shared`](Operator::apply_shared) to hand over existing
    /// [`Arc`]s instead.
    pub fn apply(
        &self,
        initial: &State,
        target: &State,
        steps: DurationSteps,
    ) -> Result<TransitionStream, OperatorError> {
        self.check(initial, target)?;
        TransitionStream::spawn(
            *self,
            Arc::new(initial.clone()),
            Arc::new(target.clone()),
            steps,
        )
    }

    /// Like [`apply`](Operator::apply), sharing already-reference-counted
    /// inputs with the producer thread.
    pub fn apply_shared(
        &self,
        initial: Arc<State>,
        target: Arc<State>,
        steps: DurationSteps,
    ) -> Result<TransitionStream, OperatorError> {
        self.check(&initial, &target)?;
        TransitionStream::spawn(*self, initial, target, steps)
    }

    /// Compute a single frame synchronously.
    ///
    /// `step` must lie in `0..frame_count(steps)`.
    pub fn frame(
        &self,
        initial: &State,
        target: &State,
        steps: DurationSteps,
        step: u32,
    ) -> Result<Frame, OperatorError> {
        self.check(initial, target)?;
        if u64::from(step) >= self.frame_count(steps) {
            return Err(OperatorError::StepOutOfRange {
                step,
                frames: self.frame_count(steps),
            });
        }
        Ok(self.render(initial, target, steps, step))
    }

    /// Frame kernel. Callers have already checked the preconditions.
    pub(crate) fn render(
        &self,
        initial: &State,
        target: &State,
        steps: DurationSteps,
        step: u32,
    ) -> Frame {
        let name = format!("{}->{}#{step}", self.name(), target.name());
        let (progress, state) = match self {
            Self::Potentiality => (1.0, target.renamed(name)),
            Self::Genesis => {
                let n = steps.get();
                let state = blend_state(name, initial, target, |a, b| blend::linear(a, b, step, n));
                (steps.progress(step), state)
            }
            Self::Quench => {
                let t = steps.progress(step);
                let d = blend::cubic_decay(t);
                (t, blend_state(name, initial, target, |a, b| blend::decay(a, b, d)))
            }
        };
        Frame {
            step,
            progress,
            state,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn blend_state(
    name: String,
    initial: &State,
    target: &State,
    kernel: impl Fn(u8, u8) -> u8,
) -> State {
    let mut state = State::empty(name, target.domain());
    blend_into(state.coverage_mut(), initial.coverage(), target.coverage(), &kernel);
    blend_into(
        state.intensity_mut(),
        initial.intensities(),
        target.intensities(),
        &kernel,
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{stable, ActiveBand, Domain};

    fn domain() -> Domain {
        Domain::new(10, 4).unwrap()
    }

    #[test]
    fn frame_counts() {
        let n = DurationSteps::new(7);
        assert_eq!(Operator::Potentiality.frame_count(n), 1);
        assert_eq!(Operator::Genesis.frame_count(n), 8);
        assert_eq!(Operator::Quench.frame_count(DurationSteps::new(0)), 1);
    }

    #[test]
    fn mismatched_domains_rejected() {
        let a = stable::null(domain());
        let b = stable::null(Domain::new(4, 10).unwrap());
        for op in Operator::ALL {
            assert!(matches!(
                op.check(&a, &b),
                Err(OperatorError::DomainMismatch { .. })
            ));
            assert!(op.frame(&a, &b, DurationSteps::new(1), 0).is_err());
        }
    }

    #[test]
    fn frame_past_end_rejected() {
        let a = stable::null(domain());
        let n = DurationSteps::new(3);
        assert!(Operator::Genesis.frame(&a, &a, n, 3).is_ok());
        assert_eq!(
            Operator::Genesis.frame(&a, &a, n, 4).map(|f| f.step),
            Err(OperatorError::StepOutOfRange { step: 4, frames: 4 })
        );
        assert_eq!(
            Operator::Potentiality.frame(&a, &a, n, 1).map(|f| f.step),
            Err(OperatorError::StepOutOfRange { step: 1, frames: 1 })
        );
    }

    #[test]
    fn genesis_midpoint() {
        let band = ActiveBand::default();
        let from = stable::potential(domain(), &band);
        let to = stable::active(domain(), &band);
        let mid = Operator::Genesis
            .frame(&from, &to, DurationSteps::new(2), 1)
            .unwrap();
        assert_eq!(mid.progress, 0.5);
        assert_eq!(mid.state.intensity_at(0, 1), Ok(125));
        assert_eq!(mid.state.coverage_at(0, 1), Ok(255));
        assert_eq!(mid.state.coverage_at(0, 0), Ok(0));
    }

    #[test]
    fn quench_midpoint_uses_cubic_decay() {
        let band = ActiveBand::default();
        let from = stable::active(domain(), &band);
        let to = stable::null(domain());
        let mid = Operator::Quench
            .frame(&from, &to, DurationSteps::new(2), 1)
            .unwrap();
        assert_eq!(mid.state.intensity_at(3, 2), Ok(31));
        assert_eq!(mid.state.coverage_at(3, 2), Ok(32));
    }

    #[test]
    fn potentiality_ignores_initial() {
        let band = ActiveBand::default();
        let from = stable::active(domain(), &band);
        let to = stable::potential(domain(), &band);
        let f = Operator::Potentiality
            .frame(&from, &to, DurationSteps::new(99), 0)
            .unwrap();
        assert!(f.state.same_cells(&to));
        assert_eq!(f.progress, 1.0);
        assert_eq!(f.state.name(), "Potentiality->Potential#0");
    }

    #[test]
    fn frame_names_carry_operator_target_and_step() {
        let a = stable::null(domain());
        let b = stable::active(domain(), &ActiveBand::default());
        let f = Operator::Genesis.frame(&a, &b, DurationSteps::new(5), 3).unwrap();
        assert_eq!(f.state.name(), "Genesis->Active#3");
    }
}
