//! Reusable domains and states for tests.

use prism_core::{ActiveBand, Domain, StableStates, State};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 100x10 domain the reference scenario runs on.
pub fn reference_domain() -> Domain {
    Domain::new(100, 10).unwrap()
}

/// A small domain that keeps tests fast.
pub fn small_domain() -> Domain {
    Domain::new(8, 6).unwrap()
}

/// Stable templates over `domain` with the default band.
pub fn stable_states(domain: Domain) -> StableStates {
    StableStates::new(domain, ActiveBand::default())
}

/// Every cell set to the same coverage and intensity.
pub fn uniform_state(name: &str, domain: Domain, coverage: u8, intensity: u8) -> State {
    let n = domain.cell_count();
    State::from_buffers(name, domain, vec![coverage; n], vec![intensity; n]).unwrap()
}

/// Coverage rises left to right and intensity rises top to bottom, so
/// every cell holds a distinct-looking pair.
pub fn ramp_state(name: &str, domain: Domain) -> State {
    let (w, h) = (domain.width(), domain.height());
    let mut shape = Vec::with_capacity(domain.cell_count());
    let mut intensity = Vec::with_capacity(domain.cell_count());
    for y in 0..h {
        for x in 0..w {
            shape.push(scale(x, w));
            intensity.push(scale(y, h));
        }
    }
    State::from_buffers(name, domain, shape, intensity).unwrap()
}

/// Deterministic pseudo-random cells from a seed, for tests that want
/// arbitrary-looking but reproducible content.
pub fn scrambled_state(name: &str, domain: Domain, seed: u64) -> State {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = domain.cell_count();
    let mut shape = vec![0u8; n];
    let mut intensity = vec![0u8; n];
    rng.fill_bytes(&mut shape);
    rng.fill_bytes(&mut intensity);
    State::from_buffers(name, domain, shape, intensity).unwrap()
}

fn scale(i: u32, len: u32) -> u8 {
    if len <= 1 {
        return 255;
    }
    ((u64::from(i) * 255) / u64::from(len - 1)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_spans_full_range() {
        let s = ramp_state("ramp", small_domain());
        assert_eq!(s.coverage_at(0, 0), Ok(0));
        assert_eq!(s.coverage_at(7, 0), Ok(255));
        assert_eq!(s.intensity_at(0, 5), Ok(255));
    }

    #[test]
    fn scrambled_is_reproducible() {
        let a = scrambled_state("a", small_domain(), 7);
        let b = scrambled_state("b", small_domain(), 7);
        let c = scrambled_state("c", small_domain(), 8);
        assert!(a.same_cells(&b));
        assert!(!a.same_cells(&c));
    }
}
