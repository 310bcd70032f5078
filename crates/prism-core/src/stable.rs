//! Factories for the three stable configurations.
//!
//! Stable states are transition endpoints. They are pure functions of the
//! domain and the [`ActiveBand`]; nothing here holds process-wide state.
//! [`StableStates`] builds all three once so a driver can hand out shared,
//! read-only references.

use std::fmt;
use std::sync::Arc;

use crate::domain::Domain;
use crate::state::State;

/// One of the canonical stable configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StableConfig {
    /// Zero coverage and zero intensity everywhere.
    Null,
    /// A centred band of full coverage and high intensity.
    Active,
    /// Active's coverage pattern with zero intensity.
    Potential,
}

impl StableConfig {
    /// Every stable configuration, in declaration order.
    pub const ALL: [StableConfig; 3] = [Self::Null, Self::Active, Self::Potential];

    /// Canonical name, also used as the state's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Active => "Active",
            Self::Potential => "Potential",
        }
    }
}

impl fmt::Display for StableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry and levels of the band that Active and Potential occupy.
///
/// The band spans the full width of the domain and is vertically centred:
/// its first row is `(height - rows) / 2`. A band taller than the domain
/// is clamped to the domain height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveBand {
    /// Band height in rows. Default: 2.
    pub rows: u32,
    /// Coverage inside the band. Default: 255.
    pub coverage: u8,
    /// Intensity inside the band for Active. Default: 250.
    pub intensity: u8,
}

impl Default for ActiveBand {
    fn default() -> Self {
        Self {
            rows: 2,
            coverage: 255,
            intensity: 250,
        }
    }
}

impl ActiveBand {
    /// The half-open row range `[first, end)` the band occupies in `domain`.
    pub fn row_range(&self, domain: Domain) -> std::ops::Range<u32> {
        let rows = self.rows.min(domain.height());
        let first = (domain.height() - rows) / 2;
        first..first + rows
    }
}

/// The Null configuration over `domain`.
pub fn null(domain: Domain) -> State {
    State::empty(StableConfig::Null.name(), domain)
}

/// The Active configuration over `domain`.
pub fn active(domain: Domain, band: &ActiveBand) -> State {
    banded(StableConfig::Active, domain, band, band.intensity)
}

/// The Potential configuration over `domain`: Active's shape, no energy.
pub fn potential(domain: Domain, band: &ActiveBand) -> State {
    banded(StableConfig::Potential, domain, band, 0)
}

fn banded(config: StableConfig, domain: Domain, band: &ActiveBand, intensity: u8) -> State {
    let mut state = State::empty(config.name(), domain);
    let rows = band.row_range(domain);
    let width = domain.width() as usize;
    let cells = rows.start as usize * width..rows.end as usize * width;
    state.coverage_mut()[cells.clone()].fill(band.coverage);
    state.intensity_mut()[cells].fill(intensity);
    state
}

/// All three stable configurations for one domain, built once.
///
/// Each state sits behind an [`Arc`] so concurrent operator invocations
/// can read the same template without copying or locking.
#[derive(Clone, Debug)]
pub struct StableStates {
    domain: Domain,
    band: ActiveBand,
    null: Arc<State>,
    active: Arc<State>,
    potential: Arc<State>,
}

impl StableStates {
    /// Build the three templates.
    pub fn new(domain: Domain, band: ActiveBand) -> Self {
        Self {
            domain,
            band,
            null: Arc::new(null(domain)),
            active: Arc::new(active(domain, &band)),
            potential: Arc::new(potential(domain, &band)),
        }
    }

    /// The domain all three templates cover.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The band used for Active and Potential.
    pub fn band(&self) -> &ActiveBand {
        &self.band
    }

    /// Look up a template by configuration.
    pub fn get(&self, config: StableConfig) -> &Arc<State> {
        match config {
            StableConfig::Null => &self.null,
            StableConfig::Active => &self.active,
            StableConfig::Potential => &self.potential,
        }
    }

    /// The Null template.
    pub fn null(&self) -> &Arc<State> {
        &self.null
    }

    /// The Active template.
    pub fn active(&self) -> &Arc<State> {
        &self.active
    }

    /// The Potential template.
    pub fn potential(&self) -> &Arc<State> {
        &self.potential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn active_magnitude_on_reference_domain() {
        let d = Domain::new(100, 10).unwrap();
        let s = active(d, &ActiveBand::default());
        assert_eq!(s.total_magnitude(), 100 * 2 * 250);
        assert_eq!(s.name(), "Active");
    }

    #[test]
    fn band_is_centred() {
        let d = Domain::new(100, 10).unwrap();
        assert_eq!(ActiveBand::default().row_range(d), 4..6);
        let s = active(d, &ActiveBand::default());
        assert_eq!(s.coverage_at(0, 3), Ok(0));
        assert_eq!(s.coverage_at(0, 4), Ok(255));
        assert_eq!(s.intensity_at(99, 5), Ok(250));
        assert_eq!(s.intensity_at(99, 6), Ok(0));
    }

    #[test]
    fn odd_height_rounds_band_up() {
        let d = Domain::new(3, 5).unwrap();
        assert_eq!(ActiveBand::default().row_range(d), 1..3);
    }

    #[test]
    fn tall_band_is_clamped() {
        let d = Domain::new(4, 1).unwrap();
        let band = ActiveBand {
            rows: 6,
            ..ActiveBand::default()
        };
        assert_eq!(band.row_range(d), 0..1);
        assert_eq!(active(d, &band).covered_cells(), 4);
    }

    #[test]
    fn potential_shares_active_shape() {
        let d = Domain::new(20, 8).unwrap();
        let band = ActiveBand::default();
        let a = active(d, &band);
        let p = potential(d, &band);
        assert_eq!(a.shape(), p.shape());
        assert_eq!(p.total_magnitude(), 0);
        assert!(p.intensities().iter().all(|&v| v == 0));
    }

    #[test]
    fn templates_are_shared_not_copied() {
        let d = Domain::new(5, 5).unwrap();
        let stable = StableStates::new(d, ActiveBand::default());
        let a = Arc::clone(stable.get(StableConfig::Active));
        assert!(Arc::ptr_eq(&a, stable.active()));
        assert_eq!(stable.get(StableConfig::Null).name(), "Null");
    }

    proptest! {
        #[test]
        fn null_magnitude_is_zero(w in 1u32..64, h in 1u32..64) {
            let d = Domain::new(w, h).unwrap();
            prop_assert_eq!(null(d).total_magnitude(), 0);
        }

        #[test]
        fn active_magnitude_matches_band(w in 1u32..64, h in 1u32..64, rows in 0u32..8) {
            let d = Domain::new(w, h).unwrap();
            let band = ActiveBand { rows, ..ActiveBand::default() };
            let expected = u64::from(w) * u64::from(rows.min(h)) * 250;
            prop_assert_eq!(active(d, &band).total_magnitude(), expected);
        }
    }
}
