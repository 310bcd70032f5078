//! The [`DurationSteps`] step count.

use prism_core::OperatorError;

/// Number of steps a transition spans.
///
/// A transition over `N` steps emits frames `0..=N`, frame `i` sitting at
/// progress `t = i / N`. Zero is legal: it emits the endpoint alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DurationSteps(u32);

impl DurationSteps {
    /// Wrap a step count.
    pub const fn new(steps: u32) -> Self {
        Self(steps)
    }

    /// The raw step count.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Progress fraction of frame `step`, in `[0, 1]`.
    ///
    /// With zero steps the only frame is the endpoint, at `t = 1`.
    pub fn progress(self, step: u32) -> f64 {
        if self.0 == 0 {
            1.0
        } else {
            f64::from(step) / f64::from(self.0)
        }
    }
}

impl From<u32> for DurationSteps {
    fn from(steps: u32) -> Self {
        Self(steps)
    }
}

impl TryFrom<i64> for DurationSteps {
    type Error = OperatorError;

    /// Accepts `0..=u32::MAX`; negative counts are rejected.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| OperatorError::InvalidStepCount { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_rejected() {
        assert_eq!(
            DurationSteps::try_from(-1i64),
            Err(OperatorError::InvalidStepCount { value: -1 })
        );
    }

    #[test]
    fn too_large_rejected() {
        let value = i64::from(u32::MAX) + 1;
        assert_eq!(
            DurationSteps::try_from(value),
            Err(OperatorError::InvalidStepCount { value })
        );
    }

    #[test]
    fn zero_accepted() {
        assert_eq!(DurationSteps::try_from(0i64), Ok(DurationSteps::new(0)));
    }

    #[test]
    fn progress_endpoints() {
        let n = DurationSteps::new(4);
        assert_eq!(n.progress(0), 0.0);
        assert_eq!(n.progress(2), 0.5);
        assert_eq!(n.progress(4), 1.0);
        assert_eq!(DurationSteps::new(0).progress(0), 1.0);
    }
}
