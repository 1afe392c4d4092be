use crate::constants::{Radian, DPI};
use std::f64::consts::PI;

/// Convergence tolerance on the Kepler-equation residual `E − e·sin E − M`.
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Iteration budget of the Newton–Raphson loop. Physically realistic
/// eccentricities converge in well under ten iterations.
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Returns the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Returns the principal difference between two angles, in [-π, π].
pub fn angle_diff(a: Radian, b: Radian) -> Radian {
    let a = principal_angle(a);
    let b = principal_angle(b);

    let mut diff = a - b;

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Result of a Kepler-equation solve, with convergence diagnostics.
///
/// A solve that exhausts its iteration budget still carries the last iterate in
/// `eccentric_anomaly`; `converged` is the only signal of that documented
/// imprecision. Callers that care inspect `residual` and `iterations`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly E in radians
    pub eccentric_anomaly: Radian,
    /// Number of Newton iterations performed
    pub iterations: usize,
    /// Final residual `E − e·sin E − M`
    pub residual: f64,
    /// Whether the residual dropped below [`KEPLER_TOLERANCE`]
    pub converged: bool,
}

/// Solve Kepler's equation `M = E − e·sin E` for the eccentric anomaly.
///
/// Newton–Raphson starting from `E₀ = M`, iterating
/// `E ← E − (E − e·sin E − M) / (1 − e·cos E)` until the residual falls below
/// [`KEPLER_TOLERANCE`] or [`KEPLER_MAX_ITERATIONS`] elapse. Non-convergence
/// returns the last iterate flagged `converged: false` rather than an error.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly M in radians
/// * `eccentricity`: orbital eccentricity, expected in [0, 1) for bound orbits
///
/// Return
/// ------
/// * a [`KeplerSolution`] carrying E and the convergence diagnostics
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> KeplerSolution {
    let m = mean_anomaly;
    let mut e_anom = m;
    let mut residual = e_anom - eccentricity * e_anom.sin() - m;

    for iteration in 0..KEPLER_MAX_ITERATIONS {
        if residual.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: e_anom,
                iterations: iteration,
                residual,
                converged: true,
            };
        }

        let derivative = 1.0 - eccentricity * e_anom.cos();
        e_anom -= residual / derivative;
        residual = e_anom - eccentricity * e_anom.sin() - m;
    }

    let converged = residual.abs() < KEPLER_TOLERANCE;
    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations: KEPLER_MAX_ITERATIONS,
        residual,
        converged,
    }
}

/// True anomaly ν from eccentric anomaly, via the half-angle atan2 form.
///
/// Numerically stable for all quadrants and for eccentricities approaching 1.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = eccentric_anomaly / 2.0;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}
