//! # Epoch orbital elements and secular propagation
//!
//! Each planet is described by six Keplerian elements at the J2000.0 epoch plus
//! one linear secular rate per element (units per Julian century). Propagation
//! to an arbitrary Julian Day is the straight line `base + rate · T` — valid
//! within a few centuries of epoch, by construction of the rate fit.
//!
//! The built-in table carries the Standish (1992) approximate elements for the
//! eight planets, referenced to the mean ecliptic and equinox of J2000.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, JulianDay, SolarBody};
use crate::orrery_errors::OrreryError;
use crate::time::julian_centuries;

/// Keplerian orbital elements of one body at one instant.
///
/// Units:
/// * `semi_major_axis`: AU
/// * `eccentricity`: unitless
/// * `inclination`: degrees
/// * `mean_longitude`: degrees
/// * `perihelion_longitude`: degrees (ϖ = Ω + ω)
/// * `ascending_node_longitude`: degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub mean_longitude: Degree,
    pub perihelion_longitude: Degree,
    pub ascending_node_longitude: Degree,
}

/// Secular rates of the six elements, per Julian century.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRates {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub mean_longitude: Degree,
    pub perihelion_longitude: Degree,
    pub ascending_node_longitude: Degree,
}

/// Epoch elements paired with their secular rates.
///
/// Immutable reference data: set once at table construction, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSet {
    pub base: OrbitalElements,
    pub rates: ElementRates,
}

impl ElementSet {
    /// Extrapolate the epoch elements to an arbitrary Julian Day.
    ///
    /// Pure linear propagation `base + rate · T` with
    /// `T = (JD − 2451545.0)/36525`. No bounds checking: callers are
    /// responsible for staying within a few centuries of epoch.
    pub fn propagate(&self, jd: JulianDay) -> OrbitalElements {
        let t = julian_centuries(jd);
        OrbitalElements {
            semi_major_axis: self.base.semi_major_axis + self.rates.semi_major_axis * t,
            eccentricity: self.base.eccentricity + self.rates.eccentricity * t,
            inclination: self.base.inclination + self.rates.inclination * t,
            mean_longitude: self.base.mean_longitude + self.rates.mean_longitude * t,
            perihelion_longitude: self.base.perihelion_longitude
                + self.rates.perihelion_longitude * t,
            ascending_node_longitude: self.base.ascending_node_longitude
                + self.rates.ascending_node_longitude * t,
        }
    }
}

/// Per-body table of epoch elements and rates.
///
/// An explicit value constructed once and passed by reference to consumers;
/// there is no module-level singleton, so independent simulation instances can
/// carry independent (possibly overridden) tables.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    entries: AHashMap<SolarBody, ElementSet>,
}

impl ElementTable {
    /// An empty table. Useful for tests and for consumers supplying their own data.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Standish (1992) J2000 elements and rates for the eight planets.
    pub fn standish_j2000() -> Self {
        let mut table = Self::new();
        for (body, set) in STANDISH_J2000 {
            table.insert(body, set);
        }
        table
    }

    /// Register or override the element set of one body.
    pub fn insert(&mut self, body: SolarBody, set: ElementSet) {
        self.entries.insert(body, set);
    }

    /// Look up the element set of one body.
    ///
    /// A missing entry is a configuration problem reported to the caller;
    /// other bodies' computations proceed unaffected.
    pub fn get(&self, body: SolarBody) -> Result<&ElementSet, OrreryError> {
        self.entries
            .get(&body)
            .ok_or(OrreryError::MissingElements(body))
    }

    /// Propagate one body's elements to the given Julian Day.
    pub fn propagate(&self, body: SolarBody, jd: JulianDay) -> Result<OrbitalElements, OrreryError> {
        Ok(self.get(body)?.propagate(jd))
    }

    /// Bodies present in the table, in heliocentric order for the planets.
    pub fn bodies(&self) -> Vec<SolarBody> {
        let mut bodies: Vec<SolarBody> = self.entries.keys().copied().collect();
        bodies.sort();
        bodies
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Standish (1992) approximate elements, valid 1800 AD – 2050 AD.
/// Order per entry: a, e, I, L, ϖ, Ω and the matching rates per century.
const STANDISH_J2000: [(SolarBody, ElementSet); 8] = [
    (
        SolarBody::Mercury,
        element_set(
            [
                0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593,
            ],
            [
                0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081,
            ],
        ),
    ),
    (
        SolarBody::Venus,
        element_set(
            [
                0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255,
            ],
            [
                0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418,
            ],
        ),
    ),
    (
        SolarBody::Earth,
        element_set(
            [
                1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0,
            ],
            [
                0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0,
            ],
        ),
    ),
    (
        SolarBody::Mars,
        element_set(
            [
                1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891,
            ],
            [
                0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343,
            ],
        ),
    ),
    (
        SolarBody::Jupiter,
        element_set(
            [
                5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909,
            ],
            [
                -0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106,
            ],
        ),
    ),
    (
        SolarBody::Saturn,
        element_set(
            [
                9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448,
            ],
            [
                -0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794,
            ],
        ),
    ),
    (
        SolarBody::Uranus,
        element_set(
            [
                19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503,
            ],
            [
                -0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589,
            ],
        ),
    ),
    (
        SolarBody::Neptune,
        element_set(
            [
                30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574,
            ],
            [
                0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664,
            ],
        ),
    ),
];

const fn element_set(base: [f64; 6], rates: [f64; 6]) -> ElementSet {
    ElementSet {
        base: OrbitalElements {
            semi_major_axis: base[0],
            eccentricity: base[1],
            inclination: base[2],
            mean_longitude: base[3],
            perihelion_longitude: base[4],
            ascending_node_longitude: base[5],
        },
        rates: ElementRates {
            semi_major_axis: rates[0],
            eccentricity: rates[1],
            inclination: rates[2],
            mean_longitude: rates[3],
            perihelion_longitude: rates[4],
            ascending_node_longitude: rates[5],
        },
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use crate::constants::{DAYS_PER_CENTURY, JD_J2000};

    #[test]
    fn test_identity_at_epoch() {
        // Propagating to exactly T = 0 returns the unmodified base set
        let table = ElementTable::standish_j2000();
        for body in SolarBody::PLANETS {
            let set = table.get(body).unwrap();
            assert_eq!(set.propagate(JD_J2000), set.base, "{body}");
        }
    }

    #[test]
    fn test_linear_symmetry() {
        // base + rate·T and base − rate·T are symmetric about the base values
        let table = ElementTable::standish_j2000();
        let set = table.get(SolarBody::Mars).unwrap();
        let forward = set.propagate(JD_J2000 + DAYS_PER_CENTURY);
        let backward = set.propagate(JD_J2000 - DAYS_PER_CENTURY);
        let mid = (forward.mean_longitude + backward.mean_longitude) / 2.0;
        assert!((mid - set.base.mean_longitude).abs() < 1e-9);
        let mid_e = (forward.eccentricity + backward.eccentricity) / 2.0;
        assert!((mid_e - set.base.eccentricity).abs() < 1e-12);
    }

    #[test]
    fn test_missing_body_reported() {
        let table = ElementTable::standish_j2000();
        assert_eq!(
            table.get(SolarBody::Moon),
            Err(OrreryError::MissingElements(SolarBody::Moon))
        );
    }

    #[test]
    fn test_table_covers_planets() {
        let table = ElementTable::standish_j2000();
        assert_eq!(table.len(), 8);
        for body in SolarBody::PLANETS {
            assert!(table.get(body).is_ok());
        }
    }

    #[test]
    fn test_eccentricities_stay_bound() {
        // Within two centuries of epoch every planetary eccentricity stays
        // well below 1 (bound orbits only).
        let table = ElementTable::standish_j2000();
        for body in SolarBody::PLANETS {
            for t in [-2.0, -1.0, 1.0, 2.0] {
                let elems = table
                    .propagate(body, JD_J2000 + t * DAYS_PER_CENTURY)
                    .unwrap();
                assert!(elems.eccentricity >= 0.0 && elems.eccentricity < 1.0);
            }
        }
    }

    #[test]
    fn test_override_entry() {
        let mut table = ElementTable::standish_j2000();
        let mut custom = *table.get(SolarBody::Earth).unwrap();
        custom.base.semi_major_axis = 1.5;
        table.insert(SolarBody::Earth, custom);
        assert_eq!(
            table.get(SolarBody::Earth).unwrap().base.semi_major_axis,
            1.5
        );
    }
}
