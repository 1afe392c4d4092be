use thiserror::Error;

use crate::constants::SolarBody;

/// Crate-wide error type.
///
/// Documented-imprecision paths (e.g. a Kepler solve that exhausts its iteration
/// budget) are deliberately **not** represented here: they return structured
/// diagnostics instead of failing. Errors below indicate configuration problems
/// or state corruption that the caller must handle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("No orbital elements registered for body: {0}")]
    MissingElements(SolarBody),

    #[error("Body not present in the n-body system: {0}")]
    BodyNotInSystem(SolarBody),

    #[error("Degenerate body pair: {0} and {1} are coincident")]
    DegenerateBodyPair(SolarBody, SolarBody),

    #[error("N-body system has not been seeded")]
    SystemNotSeeded,

    #[error("Invalid timestep bounds: min {min} s must be positive and not exceed max {max} s")]
    InvalidTimestepBounds { min: f64, max: f64 },

    #[error("Invalid physical-to-display scale factor: {0}")]
    InvalidScaleFactor(f64),

    #[error("Non-finite state detected for body: {0}")]
    NonFiniteState(SolarBody),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
}
