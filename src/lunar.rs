//! # Geocentric lunar position
//!
//! Standalone closed-form approximation of the Moon's geocentric position:
//! polynomial fundamental arguments plus a truncated series of the dominant
//! periodic corrections (the leading terms of the ELP theory as tabulated by
//! Meeus). Accuracy is on the order of arc-minutes — adequate for
//! visualization, deliberately short of precision ephemeris work.
//!
//! This module does not depend on the Kepler/propagator chain.

use nalgebra::Vector3;

use crate::constants::{Degree, JulianDay, Kilometer, RADEG};
use crate::time::julian_centuries;

/// Geocentric lunar state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarState {
    /// Geocentric position in the ecliptic frame, kilometers
    pub position: Vector3<Kilometer>,
    /// Ecliptic longitude, degrees
    pub longitude: Degree,
    /// Ecliptic latitude, degrees
    pub latitude: Degree,
    /// Geocentric distance, kilometers
    pub distance: Kilometer,
}

/// The five fundamental lunar arguments, degrees.
#[derive(Debug, Clone, Copy)]
struct FundamentalArguments {
    /// Moon's mean longitude L'
    mean_longitude: f64,
    /// Mean elongation of the Moon from the Sun D
    elongation: f64,
    /// Sun's mean anomaly M
    solar_anomaly: f64,
    /// Moon's mean anomaly M'
    lunar_anomaly: f64,
    /// Moon's argument of latitude F
    latitude_argument: f64,
}

/// Linear polynomial arguments in Julian centuries since J2000.0.
///
/// Higher-order polynomial terms are dropped with the rest of the series
/// truncation; they matter only outside the few-century validity window.
fn fundamental_arguments(t: f64) -> FundamentalArguments {
    FundamentalArguments {
        mean_longitude: 218.316_447_7 + 481_267.881_234_21 * t,
        elongation: 297.850_192_1 + 445_267.111_403_4 * t,
        solar_anomaly: 357.529_109_2 + 35_999.050_290_9 * t,
        lunar_anomaly: 134.963_396_4 + 477_198.867_505_5 * t,
        latitude_argument: 93.272_095_0 + 483_202.017_523_3 * t,
    }
}

/// Dominant periodic longitude corrections, degrees.
/// Arguments are integer multiples of (D, M, M').
const LONGITUDE_TERMS: [(f64, i32, i32, i32); 11] = [
    (6.288_774, 0, 0, 1),
    (1.274_027, 2, 0, -1),
    (0.658_314, 2, 0, 0),
    (0.213_618, 0, 0, 2),
    (-0.185_116, 0, 1, 0),
    (0.058_793, 2, 0, -2),
    (0.057_066, 2, -1, -1),
    (0.053_322, 2, 0, 1),
    (0.045_758, 2, -1, 0),
    (-0.040_923, 0, 1, -1),
    (-0.034_720, 1, 0, 0),
];

/// Dominant periodic latitude corrections, degrees.
/// Arguments are integer multiples of (D, M', F).
const LATITUDE_TERMS: [(f64, i32, i32, i32); 6] = [
    (5.128_122, 0, 0, 1),
    (0.280_602, 0, 1, 1),
    (0.277_693, 0, 1, -1),
    (0.173_237, 2, 0, -1),
    (0.055_413, 2, -1, 1),
    (0.046_271, 2, -1, -1),
];

/// Dominant periodic distance corrections, kilometers.
/// Arguments are integer multiples of (D, M').
const DISTANCE_TERMS: [(f64, i32, i32); 5] = [
    (-20_905.355, 0, 1),
    (-3_699.111, 2, -1),
    (-2_955.968, 2, 0),
    (-569.925, 0, 2),
    (48.888, 1, 0),
];

/// Mean Earth–Moon distance of the truncated series, kilometers.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Additional flat latitude correction from the dropped planetary terms, degrees.
const LATITUDE_FLAT_TERM: f64 = -0.002_778;

/// Compute the Moon's geocentric position at a Julian Day.
///
/// Arguments
/// ---------
/// * `jd`: the Julian Day of the evaluation
///
/// Return
/// ------
/// * a [`LunarState`] with the ecliptic Cartesian position (km) and the raw
///   longitude/latitude/distance the series produced
pub fn geocentric_lunar_state(jd: JulianDay) -> LunarState {
    let t = julian_centuries(jd);
    let args = fundamental_arguments(t);

    let d = args.elongation * RADEG;
    let m = args.solar_anomaly * RADEG;
    let mp = args.lunar_anomaly * RADEG;
    let f = args.latitude_argument * RADEG;

    let mut longitude = args.mean_longitude;
    for (amplitude, kd, km, kmp) in LONGITUDE_TERMS {
        longitude += amplitude * (kd as f64 * d + km as f64 * m + kmp as f64 * mp).sin();
    }

    let mut latitude = LATITUDE_FLAT_TERM;
    for (amplitude, kd, kmp, kf) in LATITUDE_TERMS {
        latitude += amplitude * (kd as f64 * d + kmp as f64 * mp + kf as f64 * f).sin();
    }

    let mut distance = MEAN_DISTANCE_KM;
    for (amplitude, kd, kmp) in DISTANCE_TERMS {
        distance += amplitude * (kd as f64 * d + kmp as f64 * mp).cos();
    }

    longitude = longitude.rem_euclid(360.0);

    let lon_rad = longitude * RADEG;
    let lat_rad = latitude * RADEG;
    let position = Vector3::new(
        distance * lat_rad.cos() * lon_rad.cos(),
        distance * lat_rad.cos() * lon_rad.sin(),
        distance * lat_rad.sin(),
    );

    LunarState {
        position,
        longitude,
        latitude,
        distance,
    }
}
