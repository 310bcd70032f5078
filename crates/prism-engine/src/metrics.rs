//! Per-run timing metrics for the simulation driver.
//!
//! [`RunMetrics`] captures how long each script step took to drain and
//! how many frames it recorded, for the most recent `run()` or `step()`.

use smallvec::SmallVec;

/// Timing for one drained script step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepTiming {
    /// Index of the script step.
    pub script_index: usize,
    /// Name of the operator applied.
    pub operator: &'static str,
    /// Frames recorded.
    pub frames: u64,
    /// Wall-clock time from invocation to end of stream, in microseconds.
    pub elapsed_us: u64,
}

/// Metrics collected during the most recent `run()` or `step()` call.
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    /// One timing per script step executed, in order.
    pub steps: SmallVec<[StepTiming; 4]>,
    /// Wall-clock time for the whole call, in microseconds.
    pub total_us: u64,
}

impl RunMetrics {
    /// Frames recorded across all timed steps.
    pub fn frames(&self) -> u64 {
        self.steps.iter().map(|s| s.frames).sum()
    }
}
