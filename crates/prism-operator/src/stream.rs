//! Producer/consumer handoff of transition frames.
//!
//! Each operator invocation spawns one producer thread that renders frames
//! in step order and hands them to the consumer over a zero-capacity
//! crossbeam channel. A send only completes once the consumer has taken
//! the frame, so the producer never computes step `i + 1` before step `i`
//! was accepted and at most one frame is in flight.
//!
//! Dropping the [`TransitionStream`] disconnects the channel. A producer
//! blocked in the handoff wakes with a send error and exits, so an
//! abandoned stream never leaks its thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, trace, warn};
use prism_core::{OperatorError, State};

use crate::operator::Operator;
use crate::steps::DurationSteps;

/// One emitted state together with its position in the sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Index in `0..=steps`.
    pub step: u32,
    /// Progress fraction `t` in `[0, 1]`.
    pub progress: f64,
    /// The emitted state. Owns its grids.
    pub state: State,
}

/// The ordered, finite sequence of frames from one operator invocation.
///
/// Iterate it to drain the frames in strictly increasing step order.
/// Iteration ends once the producer has emitted the last frame.
pub struct TransitionStream {
    operator: Operator,
    frames: Option<Receiver<Frame>>,
    producer: Option<JoinHandle<()>>,
    expected: u64,
    received: u64,
}

impl TransitionStream {
    pub(crate) fn spawn(
        operator: Operator,
        initial: Arc<State>,
        target: Arc<State>,
        steps: DurationSteps,
    ) -> Result<Self, OperatorError> {
        let count = operator.frame_count(steps);
        debug!(
            "{operator} stream: {} -> {}, {count} frames",
            initial.name(),
            target.name()
        );
        // `count` is at most `u32::MAX + 1`, so every index fits.
        let frames = (0..count).map(move |step| operator.render(&initial, &target, steps, step as u32));
        Self::from_frames(operator, count, frames)
    }

    /// Stream frames from any source on a dedicated producer thread.
    ///
    /// The source is pulled lazily, one frame per handoff, so it sees the
    /// same backpressure and cancellation as an operator invocation.
    /// `expected` is the number of frames the source yields when run to
    /// completion. A source that panics ends the stream early and is
    /// reported by [`finish()`](TransitionStream::finish).
    pub fn from_frames<I>(operator: Operator, expected: u64, frames: I) -> Result<Self, OperatorError>
    where
        I: IntoIterator<Item = Frame>,
        I::IntoIter: Send + 'static,
    {
        let frames = frames.into_iter();
        let (tx, rx) = crossbeam_channel::bounded(0);
        let producer = thread::Builder::new()
            .name(format!("prism-{}", operator.name().to_ascii_lowercase()))
            .spawn(move || produce(operator, frames, expected, tx))
            .map_err(|e| OperatorError::SpawnFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            operator,
            frames: Some(rx),
            producer: Some(producer),
            expected,
            received: 0,
        })
    }

    /// The operator producing this stream.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Total number of frames the producer will emit if run to completion.
    pub fn expected(&self) -> u64 {
        self.expected
    }

    /// Number of frames consumed so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Stop the producer and wait for its thread to exit.
    ///
    /// Frames not yet consumed are discarded.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// Stop the producer, join it, and report how many frames were taken.
    ///
    /// Returns [`OperatorError::ProducerPanicked`] if the producer thread
    /// panicked, which otherwise only shows up as an early end of stream.
    pub fn finish(mut self) -> Result<u64, OperatorError> {
        if self.shutdown() {
            Ok(self.received)
        } else {
            Err(OperatorError::ProducerPanicked {
                operator: self.operator.name(),
            })
        }
    }

    /// Disconnect and join. Returns `false` if the producer panicked.
    fn shutdown(&mut self) -> bool {
        // Disconnect first so a producer blocked in `send` wakes up.
        self.frames.take();
        let Some(handle) = self.producer.take() else {
            return true;
        };
        if handle.join().is_err() {
            warn!("{} producer panicked", self.operator.name());
            return false;
        }
        true
    }
}

impl Iterator for TransitionStream {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let frame = self.frames.as_ref()?.recv().ok()?;
        self.received += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.expected.saturating_sub(self.received)).ok();
        (0, remaining)
    }
}

impl Drop for TransitionStream {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TransitionStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionStream")
            .field("operator", &self.operator)
            .field("expected", &self.expected)
            .field("received", &self.received)
            .finish()
    }
}

/// Producer loop: pull each frame and block until the consumer takes it.
fn produce(operator: Operator, frames: impl Iterator<Item = Frame>, count: u64, tx: Sender<Frame>) {
    debug!("{operator} producer started, {count} frames");
    for frame in frames {
        let step = frame.step;
        if tx.send(frame).is_err() {
            debug!("{operator} producer cancelled at frame {step} of {count}");
            return;
        }
        trace!("{operator} handed off frame {step}");
    }
    debug!("{operator} producer finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{stable, ActiveBand, Domain};

    fn pair() -> (State, State) {
        let d = Domain::new(12, 6).unwrap();
        let band = ActiveBand::default();
        (stable::potential(d, &band), stable::active(d, &band))
    }

    #[test]
    fn frames_arrive_in_order() {
        let (a, b) = pair();
        let steps: Vec<u32> = Operator::Genesis
            .apply(&a, &b, DurationSteps::new(30))
            .unwrap()
            .map(|f| f.step)
            .collect();
        assert_eq!(steps, (0..=30).collect::<Vec<_>>());
    }

    #[test]
    fn zero_steps_emits_endpoint_only() {
        let (a, b) = pair();
        for op in [Operator::Genesis, Operator::Quench] {
            let frames: Vec<Frame> = op.apply(&a, &b, DurationSteps::new(0)).unwrap().collect();
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].progress, 1.0);
            assert!(frames[0].state.same_cells(&b));
        }
    }

    #[test]
    fn early_drop_releases_producer() {
        let (a, b) = pair();
        let mut stream = Operator::Quench
            .apply(&a, &b, DurationSteps::new(1_000))
            .unwrap();
        assert_eq!(stream.next().map(|f| f.step), Some(0));
        assert_eq!(stream.next().map(|f| f.step), Some(1));
        drop(stream);
    }

    #[test]
    fn cancel_before_first_frame() {
        let (a, b) = pair();
        Operator::Genesis
            .apply(&a, &b, DurationSteps::new(10))
            .unwrap()
            .cancel();
    }

    #[test]
    fn finish_reports_received_count() {
        let (a, b) = pair();
        let mut stream = Operator::Genesis
            .apply(&a, &b, DurationSteps::new(5))
            .unwrap();
        assert_eq!(stream.expected(), 6);
        stream.by_ref().take(3).for_each(drop);
        assert_eq!(stream.received(), 3);
        assert_eq!(stream.finish(), Ok(3));
    }

    #[test]
    fn exhausted_stream_returns_none() {
        let (a, b) = pair();
        let mut stream = Operator::Potentiality
            .apply(&a, &b, DurationSteps::new(3))
            .unwrap();
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        assert_eq!(stream.finish(), Ok(1));
    }

    #[test]
    fn inputs_are_untouched() {
        let (a, b) = pair();
        let (a0, b0) = (a.clone(), b.clone());
        for op in Operator::ALL {
            op.apply(&a, &b, DurationSteps::new(4)).unwrap().for_each(drop);
        }
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn panicking_source_is_reported_by_finish() {
        let (_, b) = pair();
        let source = (0..5u32).map(move |step| {
            if step == 2 {
                panic!("frame source failed at step {step}");
            }
            Frame {
                step,
                progress: f64::from(step) / 4.0,
                state: b.clone(),
            }
        });
        let mut stream = TransitionStream::from_frames(Operator::Genesis, 5, source).unwrap();
        let steps: Vec<u32> = stream.by_ref().map(|f| f.step).collect();
        assert_eq!(steps, vec![0, 1]);
        assert_eq!(
            stream.finish(),
            Err(OperatorError::ProducerPanicked { operator: "Genesis" })
        );
    }

    #[test]
    fn empty_source_ends_cleanly() {
        let mut stream =
            TransitionStream::from_frames(Operator::Quench, 0, std::iter::empty()).unwrap();
        assert!(stream.next().is_none());
        assert_eq!(stream.finish(), Ok(0));
    }
}
