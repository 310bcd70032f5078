//! Per-cell blend kernels.
//!
//! Each kernel maps a pair of channel values and a position in the
//! sequence to a new channel value. Results are rounded half away from
//! zero and clamped into `[0, 255]`; overflow is normalised silently,
//! never reported.

/// Round and clamp a blended value into an 8-bit channel.
pub fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Constant-rate blend at frame `step` of `steps`:
/// `(initial * (steps - step) + target * step) / steps`.
///
/// Computed on the integer step ratio so exact halves round up rather
/// than falling to whichever side float error lands on. With zero steps
/// the result is `target`; `step` is capped at `steps`.
pub fn linear(initial: u8, target: u8, step: u32, steps: u32) -> u8 {
    if steps == 0 {
        return target;
    }
    let n = u64::from(steps);
    let i = u64::from(step).min(n);
    let weighted = u64::from(initial) * (n - i) + u64::from(target) * i;
    let rounded = (2 * weighted + n) / (2 * n);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

/// Cubic ease-out decay curve `(1 - t)^3`.
///
/// Equals 1 at `t = 0` and 0 at `t = 1`, falling fastest at the start.
pub fn cubic_decay(t: f64) -> f64 {
    (1.0 - t).powi(3)
}

/// Decay blend: `target + (initial - target) * decay`.
///
/// The value starts from `target` and adds back the initial excess scaled
/// by `decay`, so `decay = 1` reproduces `initial` and `decay = 0`
/// reproduces `target`.
pub fn decay(initial: u8, target: u8, decay: f64) -> u8 {
    let target = f64::from(target);
    to_channel(target + (f64::from(initial) - target) * decay)
}

/// Apply `kernel` cell by cell, writing into `out`.
///
/// All three buffers cover the same domain.
pub(crate) fn blend_into(out: &mut [u8], initial: &[u8], target: &[u8], kernel: impl Fn(u8, u8) -> u8) {
    debug_assert_eq!(initial.len(), target.len());
    debug_assert_eq!(out.len(), target.len());
    for ((cell, &a), &b) in out.iter_mut().zip(initial).zip(target) {
        *cell = kernel(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn to_channel_clamps() {
        assert_eq!(to_channel(-4.2), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(127.5), 128);
        assert_eq!(to_channel(127.49), 127);
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(linear(0, 250, 1, 2), 125);
        assert_eq!(linear(250, 0, 25, 50), 125);
        assert_eq!(linear(0, 255, 1, 2), 128);
    }

    #[test]
    fn linear_rounds_exact_halves_up() {
        // 5 * 1/10 = 0.5 exactly, in both directions.
        assert_eq!(linear(5, 0, 9, 10), 1);
        assert_eq!(linear(0, 5, 1, 10), 1);
        assert_eq!(linear(3, 0, 1, 2), 2);
    }

    #[test]
    fn linear_zero_steps_is_target() {
        assert_eq!(linear(9, 200, 0, 0), 200);
    }

    #[test]
    fn decay_curve_shape() {
        assert_eq!(cubic_decay(0.0), 1.0);
        assert_eq!(cubic_decay(1.0), 0.0);
        assert_eq!(cubic_decay(0.5), 0.125);
    }

    #[test]
    fn decay_drops_fast_then_settles() {
        assert_eq!(decay(250, 0, cubic_decay(0.5)), 31);
        assert_eq!(decay(250, 0, cubic_decay(0.9)), 0);
        assert!(decay(250, 0, cubic_decay(0.25)) < linear(250, 0, 1, 4));
    }

    #[test]
    fn decay_rises_toward_higher_target() {
        assert_eq!(decay(0, 200, cubic_decay(0.5)), 175);
    }

    proptest! {
        #[test]
        fn linear_hits_endpoints(a in any::<u8>(), b in any::<u8>(), n in 1u32..1_000) {
            prop_assert_eq!(linear(a, b, 0, n), a);
            prop_assert_eq!(linear(a, b, n, n), b);
        }

        #[test]
        fn decay_hits_endpoints(a in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(decay(a, b, cubic_decay(0.0)), a);
            prop_assert_eq!(decay(a, b, cubic_decay(1.0)), b);
        }

        #[test]
        fn linear_stays_between(a in any::<u8>(), b in any::<u8>(), n in 1u32..1_000, i in 0u32..1_000) {
            let v = linear(a, b, i.min(n), n);
            prop_assert!(v >= a.min(b) && v <= a.max(b));
        }
    }
}
