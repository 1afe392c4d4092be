//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `orrery` library. It also defines the identifier enum for
//! the solar-system bodies handled by the simulation core.
//!
//! ## Overview
//!
//! - Astronomical and gravitational constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km/m)
//! - Core type aliases used across the crate
//! - Identifiers and bulk parameters (mass, radius) for solar system bodies
//!
//! These definitions are used by all main modules, including element propagation, the lunar
//! model, and the N-body solver.

use serde::{Deserialize, Serialize};

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU_KM: f64 = 149_597_870.7;

/// Astronomical Unit in meters
pub const AU_M: f64 = AU_KM * 1000.0;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const JD_J2000: f64 = 2_451_545.0;

/// MJD epoch of J2000.0
pub const MJD_J2000: f64 = 51_544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2_400_000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Newtonian gravitational constant in m³·kg⁻¹·s⁻² (CODATA 2018)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Speed of light in m/s
pub const VLIGHT: f64 = 2.997_924_58e8;

/// Heliocentric gravitational parameter GM☉ in m³/s²
pub const GM_SUN: f64 = 1.327_124_400_18e20;

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Time as a Julian Day number (days)
pub type JulianDay = f64;
/// Time as a Modified Julian Date (days)
pub type MJD = f64;
/// Time interval in Julian centuries since J2000.0
pub type JulianCentury = f64;

// -------------------------------------------------------------------------------------------------
// Body identifiers and bulk parameters
// -------------------------------------------------------------------------------------------------

/// Identifier of a solar system body handled by the simulation core.
///
/// The eight planets carry epoch orbital elements; the Sun anchors the
/// heliocentric frame and the Moon is handled by the dedicated lunar model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SolarBody {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl SolarBody {
    /// The eight planets, in heliocentric order.
    pub const PLANETS: [SolarBody; 8] = [
        SolarBody::Mercury,
        SolarBody::Venus,
        SolarBody::Earth,
        SolarBody::Mars,
        SolarBody::Jupiter,
        SolarBody::Saturn,
        SolarBody::Uranus,
        SolarBody::Neptune,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SolarBody::Sun => "Sun",
            SolarBody::Mercury => "Mercury",
            SolarBody::Venus => "Venus",
            SolarBody::Earth => "Earth",
            SolarBody::Moon => "Moon",
            SolarBody::Mars => "Mars",
            SolarBody::Jupiter => "Jupiter",
            SolarBody::Saturn => "Saturn",
            SolarBody::Uranus => "Uranus",
            SolarBody::Neptune => "Neptune",
        }
    }

    /// Body mass in kilograms (NASA planetary fact sheet)
    pub fn mass(&self) -> Kilogram {
        match self {
            SolarBody::Sun => 1.989e30,
            SolarBody::Mercury => 3.301e23,
            SolarBody::Venus => 4.867e24,
            SolarBody::Earth => 5.972e24,
            SolarBody::Moon => 7.342e22,
            SolarBody::Mars => 6.417e23,
            SolarBody::Jupiter => 1.898e27,
            SolarBody::Saturn => 5.683e26,
            SolarBody::Uranus => 8.681e25,
            SolarBody::Neptune => 1.024e26,
        }
    }

    /// Mean body radius in meters (NASA planetary fact sheet)
    pub fn radius(&self) -> Meter {
        match self {
            SolarBody::Sun => 6.957e8,
            SolarBody::Mercury => 2.4397e6,
            SolarBody::Venus => 6.0518e6,
            SolarBody::Earth => 6.371e6,
            SolarBody::Moon => 1.7374e6,
            SolarBody::Mars => 3.3895e6,
            SolarBody::Jupiter => 6.9911e7,
            SolarBody::Saturn => 5.8232e7,
            SolarBody::Uranus => 2.5362e7,
            SolarBody::Neptune => 2.4622e7,
        }
    }

    /// Whether this body carries epoch orbital elements (the eight planets).
    pub fn is_planet(&self) -> bool {
        !matches!(self, SolarBody::Sun | SolarBody::Moon)
    }
}

impl std::fmt::Display for SolarBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SolarBody {
    type Err = crate::orrery_errors::OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sun" => Ok(SolarBody::Sun),
            "mercury" => Ok(SolarBody::Mercury),
            "venus" => Ok(SolarBody::Venus),
            "earth" => Ok(SolarBody::Earth),
            "moon" => Ok(SolarBody::Moon),
            "mars" => Ok(SolarBody::Mars),
            "jupiter" => Ok(SolarBody::Jupiter),
            "saturn" => Ok(SolarBody::Saturn),
            "uranus" => Ok(SolarBody::Uranus),
            "neptune" => Ok(SolarBody::Neptune),
            _ => Err(crate::orrery_errors::OrreryError::UnknownBody(
                s.to_string(),
            )),
        }
    }
}
