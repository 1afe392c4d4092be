//! # Physics integration manager
//!
//! The façade wiring the closed-form chain and the N-body solver together.
//! It owns the element table, the optional seeded [`NBodySystem`], the unit
//! scaling between physical meters and the presentation layer, and the
//! snapshot buffer the renderer consumes.
//!
//! ## Modes
//!
//! * **Kepler** (default): every `update` recomputes each body's position
//!   from the closed-form chain — cheap and unconditionally stable.
//! * **NBody**: the solver is seeded once from Kepler state and stepped on a
//!   monotonic-clock gate, accumulating physical coupling (and drift).
//!
//! Mode transitions and resets only take effect between discrete steps: a
//! request is recorded and applied at the next `update` boundary, never
//! mid-integration. Snapshots are rebuilt only after a completed step, so
//! consumers never observe partially-updated state.

use std::time::Instant;

use nalgebra::Vector3;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::constants::{JulianDay, SolarBody, SECONDS_PER_DAY};
use crate::elements::ElementTable;
use crate::heliocentric::heliocentric_state;
use crate::lunar::geocentric_lunar_state;
use crate::nbody::body::{BodySet, CelestialBody};
use crate::nbody::gravity::RelativisticConfig;
use crate::nbody::integrator::refresh_accelerations;
use crate::nbody::lagrange::LagrangePointSet;
use crate::nbody::tidal::TidalFieldSample;
use crate::nbody::validation::{validate, ValidationReport};
use crate::nbody::NBodySystem;
use crate::orrery_errors::OrreryError;

/// Finite-difference interval used to derive velocities from the closed-form
/// chain, seconds.
const VELOCITY_FD_SECONDS: f64 = 3_600.0;

/// Active propagation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Kepler,
    NBody,
}

/// Physical-to-display scaling.
///
/// One canonical, uniform factor applied only at the snapshot boundary:
/// 1 display unit = 10⁹ m (≈ 1/150 AU) by default. Internally everything
/// stays in SI meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    pub meters_per_display_unit: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            meters_per_display_unit: 1e9,
        }
    }
}

/// Clamp bounds for the internal N-body timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepBounds {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl Default for TimestepBounds {
    fn default() -> Self {
        Self {
            min_seconds: 60.0,
            max_seconds: 21_600.0,
        }
    }
}

/// Static configuration of one manager instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub scale: ScaleConfig,
    pub timestep: TimestepBounds,
    /// Timestep at playback speed 1.0, seconds
    pub base_timestep_seconds: f64,
    /// Minimum wall-clock interval between N-body steps, seconds. Zero steps
    /// on every update call; the default decouples the integrator from a
    /// 60 Hz render loop.
    pub step_interval_seconds: f64,
    pub relativity: RelativisticConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            scale: ScaleConfig::default(),
            timestep: TimestepBounds::default(),
            base_timestep_seconds: 3_600.0,
            step_interval_seconds: 1.0 / 30.0,
            relativity: RelativisticConfig::default(),
        }
    }
}

/// Immutable per-body state published after each completed step.
///
/// Positions and velocities are expressed in display units (see
/// [`ScaleConfig`]); mass stays in kilograms and force in newtons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub body: SolarBody,
    /// The Julian Day this state represents
    pub jd: JulianDay,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub mass: f64,
    pub force: Vector3<f64>,
}

/// Buffer sized for the Sun, eight planets, and the Moon.
pub type Snapshots = SmallVec<[BodySnapshot; 10]>;

/// The two-state orchestrator over the closed-form chain and the N-body
/// solver. Constructed explicitly and passed by reference — multiple
/// independent instances can coexist (e.g. in tests).
#[derive(Debug)]
pub struct PhysicsManager {
    mode: Mode,
    pending_mode: Option<Mode>,
    pending_reset: bool,
    elements: ElementTable,
    config: PhysicsConfig,
    system: Option<NBodySystem>,
    /// JD of the N-body seed; the solver clock is relative to it
    seed_jd: JulianDay,
    snapshots: Snapshots,
    last_step_at: Option<Instant>,
}

impl PhysicsManager {
    pub fn new(elements: ElementTable, config: PhysicsConfig) -> Result<Self, OrreryError> {
        let bounds = config.timestep;
        if !(bounds.min_seconds > 0.0 && bounds.min_seconds <= bounds.max_seconds) {
            return Err(OrreryError::InvalidTimestepBounds {
                min: bounds.min_seconds,
                max: bounds.max_seconds,
            });
        }
        if !(config.scale.meters_per_display_unit > 0.0)
            || !config.scale.meters_per_display_unit.is_finite()
        {
            return Err(OrreryError::InvalidScaleFactor(
                config.scale.meters_per_display_unit,
            ));
        }

        Ok(Self {
            mode: Mode::Kepler,
            pending_mode: None,
            pending_reset: false,
            elements,
            config,
            system: None,
            seed_jd: 0.0,
            snapshots: Snapshots::new(),
            last_step_at: None,
        })
    }

    /// Construct with the built-in planetary table and default configuration.
    pub fn with_defaults() -> Self {
        // Default bounds and scale are valid by construction
        Self::new(ElementTable::standish_j2000(), PhysicsConfig::default())
            .expect("default physics configuration is valid")
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Request a mode switch, applied at the next `update` boundary.
    pub fn request_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(?mode, "mode switch requested");
            self.pending_mode = Some(mode);
        } else {
            self.pending_mode = None;
        }
    }

    /// Request a reset (tear down N-body state, reseed on next NBody update),
    /// applied at the next `update` boundary.
    pub fn request_reset(&mut self) {
        self.pending_reset = true;
    }

    /// The snapshots published after the most recent completed step.
    pub fn snapshots(&self) -> &[BodySnapshot] {
        &self.snapshots
    }

    /// Advance the simulation. Called by the external scheduler roughly 60
    /// times per second with the current simulation time and playback speed.
    ///
    /// In Kepler mode every call re-evaluates the closed-form chain at `jd`.
    /// In NBody mode the integrator is stepped only when the monotonic-clock
    /// gate opens; between steps the previous snapshots remain valid.
    pub fn update(&mut self, jd: JulianDay, playback_speed: f64) -> Result<(), OrreryError> {
        self.apply_pending(jd)?;

        match self.mode {
            Mode::Kepler => {
                self.snapshots = self.kepler_snapshots(jd);
                Ok(())
            }
            Mode::NBody => self.update_nbody(playback_speed),
        }
    }

    /// Current simulated Julian Day. In Kepler mode this is whatever the
    /// caller last supplied; in NBody mode it advances with the integrator.
    pub fn current_jd(&self) -> JulianDay {
        match (&self.system, self.mode) {
            (Some(system), Mode::NBody) => {
                self.seed_jd + system.elapsed_seconds / SECONDS_PER_DAY
            }
            _ => self
                .snapshots
                .first()
                .map(|s| s.jd)
                .unwrap_or(self.seed_jd),
        }
    }

    /// Lagrange points of a body pair, from N-body state when seeded.
    pub fn lagrange_points(
        &self,
        primary: SolarBody,
        secondary: SolarBody,
    ) -> Result<LagrangePointSet, OrreryError> {
        self.system
            .as_ref()
            .ok_or(OrreryError::SystemNotSeeded)?
            .lagrange_points(primary, secondary)
    }

    /// Tidal-field sample of a body pair, from N-body state when seeded.
    pub fn tidal_sample(
        &self,
        primary: SolarBody,
        secondary: SolarBody,
    ) -> Result<TidalFieldSample, OrreryError> {
        self.system
            .as_ref()
            .ok_or(OrreryError::SystemNotSeeded)?
            .tidal_sample(primary, secondary)
    }

    /// Run the reference self-check against the seeded N-body system.
    pub fn validate(&self) -> Result<ValidationReport, OrreryError> {
        Ok(validate(
            self.system.as_ref().ok_or(OrreryError::SystemNotSeeded)?,
        ))
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    /// Apply deferred mode switches and resets. Only ever runs at the start
    /// of `update`, i.e. between discrete steps.
    fn apply_pending(&mut self, jd: JulianDay) -> Result<(), OrreryError> {
        if self.pending_reset {
            self.pending_reset = false;
            self.system = None;
            self.last_step_at = None;
            debug!("n-body state torn down");
        }

        if let Some(mode) = self.pending_mode.take() {
            self.mode = mode;
            debug!(?mode, "mode switch applied");
        }

        if self.mode == Mode::NBody && self.system.is_none() {
            let system = self.seed_nbody(jd)?;
            self.seed_jd = jd;
            self.system = Some(system);
            self.last_step_at = None;
            self.snapshots = self.nbody_snapshots();
        }
        Ok(())
    }

    /// Build the N-body initial state from the closed-form chain at `jd`.
    ///
    /// Velocity is finite-differenced from two Kepler-mode positions one hour
    /// apart; the Sun anchors the frame as a fixed body at the origin.
    fn seed_nbody(&self, jd: JulianDay) -> Result<NBodySystem, OrreryError> {
        let fd_days = VELOCITY_FD_SECONDS / SECONDS_PER_DAY;
        let mut bodies = BodySet::new();
        bodies.insert(CelestialBody::new(SolarBody::Sun, true));

        for body in SolarBody::PLANETS {
            let Ok(now) = self.kepler_position_m(body, jd) else {
                warn!(%body, "no orbital elements; excluded from n-body seed");
                continue;
            };
            let later = self.kepler_position_m(body, jd + fd_days)?;
            let velocity = (later - now) / VELOCITY_FD_SECONDS;
            bodies.insert(CelestialBody::new(body, false).with_state(now, velocity));
        }

        // The Moon rides on Earth's state plus the geocentric lunar model.
        if let Some(earth) = bodies.get(SolarBody::Earth).copied() {
            let moon_now = earth.position + geocentric_lunar_state(jd).position * 1_000.0;
            let moon_later = self.kepler_position_m(SolarBody::Earth, jd + fd_days)?
                + geocentric_lunar_state(jd + fd_days).position * 1_000.0;
            let velocity = (moon_later - moon_now) / VELOCITY_FD_SECONDS;
            bodies.insert(CelestialBody::new(SolarBody::Moon, false).with_state(moon_now, velocity));
        }

        if bodies.len() <= 1 {
            return Err(OrreryError::SystemNotSeeded);
        }

        let mut system = NBodySystem::new(bodies, self.config.relativity.clone());
        refresh_accelerations(&mut system.bodies, &system.relativity);
        debug!(bodies = system.bodies.len(), jd, "n-body system seeded");
        Ok(system)
    }

    /// Heliocentric position of one body in meters, from the closed-form chain.
    fn kepler_position_m(&self, body: SolarBody, jd: JulianDay) -> Result<Vector3<f64>, OrreryError> {
        let elements = self.elements.propagate(body, jd)?;
        Ok(heliocentric_state(&elements).position * 1_000.0)
    }

    /// Closed-form snapshots for every configured body at `jd`. Bodies with
    /// missing elements are skipped; the others proceed unaffected.
    fn kepler_snapshots(&self, jd: JulianDay) -> Snapshots {
        let fd_days = VELOCITY_FD_SECONDS / SECONDS_PER_DAY;
        let scale = self.config.scale.meters_per_display_unit;
        let mut snapshots = Snapshots::new();

        let mut earth_state = None;
        for body in SolarBody::PLANETS {
            let (Ok(now), Ok(later)) = (
                self.kepler_position_m(body, jd),
                self.kepler_position_m(body, jd + fd_days),
            ) else {
                warn!(%body, "no orbital elements; skipped");
                continue;
            };
            let velocity = (later - now) / VELOCITY_FD_SECONDS;
            if body == SolarBody::Earth {
                earth_state = Some((now, later));
            }
            snapshots.push(BodySnapshot {
                body,
                jd,
                position: now / scale,
                velocity: velocity / scale,
                mass: body.mass(),
                force: Vector3::zeros(),
            });
        }

        // Sun pinned at the heliocentric origin
        snapshots.push(BodySnapshot {
            body: SolarBody::Sun,
            jd,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            mass: SolarBody::Sun.mass(),
            force: Vector3::zeros(),
        });

        if let Some((earth_now, earth_later)) = earth_state {
            let now = earth_now + geocentric_lunar_state(jd).position * 1_000.0;
            let later = earth_later + geocentric_lunar_state(jd + fd_days).position * 1_000.0;
            snapshots.push(BodySnapshot {
                body: SolarBody::Moon,
                jd,
                position: now / scale,
                velocity: (later - now) / VELOCITY_FD_SECONDS / scale,
                mass: SolarBody::Moon.mass(),
                force: Vector3::zeros(),
            });
        }

        snapshots
    }

    /// Step the N-body solver when the monotonic gate opens, then republish.
    fn update_nbody(&mut self, playback_speed: f64) -> Result<(), OrreryError> {
        let gate_open = match self.last_step_at {
            Some(at) => at.elapsed().as_secs_f64() >= self.config.step_interval_seconds,
            None => true,
        };
        if !gate_open {
            return Ok(());
        }

        let requested = self.config.base_timestep_seconds * playback_speed.abs();
        let dt = requested.clamp(
            self.config.timestep.min_seconds,
            self.config.timestep.max_seconds,
        );
        if dt != requested {
            debug!(requested, dt, "timestep clamped");
        }

        let system = self.system.as_mut().ok_or(OrreryError::SystemNotSeeded)?;
        system.step(dt);
        system.check_finite()?;
        self.last_step_at = Some(Instant::now());
        self.snapshots = self.nbody_snapshots();
        Ok(())
    }

    /// Publish the current N-body state. Only called after a completed step.
    fn nbody_snapshots(&self) -> Snapshots {
        let Some(system) = self.system.as_ref() else {
            return Snapshots::new();
        };
        let scale = self.config.scale.meters_per_display_unit;
        let jd = self.seed_jd + system.elapsed_seconds / SECONDS_PER_DAY;

        system
            .bodies
            .iter()
            .map(|body| BodySnapshot {
                body: body.id,
                jd,
                position: body.position / scale,
                velocity: body.velocity / scale,
                mass: body.mass,
                force: body.force,
            })
            .collect()
    }
}
