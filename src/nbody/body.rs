use ahash::AHashMap;
use nalgebra::Vector3;

use crate::constants::{Kilogram, Meter, SolarBody};

/// Index of a body inside the [`BodySet`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyIndex(pub usize);

/// Full Cartesian N-body state of one body, SI units.
///
/// Created at N-body-mode initialization from Kepler-derived state, mutated
/// every integration step, torn down on mode switch or reset.
#[derive(Debug, Clone, Copy)]
pub struct CelestialBody {
    pub id: SolarBody,
    /// Mass in kilograms, strictly positive
    pub mass: Kilogram,
    /// Mean radius in meters, strictly positive
    pub radius: Meter,
    /// Position in meters, heliocentric ecliptic frame
    pub position: Vector3<f64>,
    /// Velocity in m/s
    pub velocity: Vector3<f64>,
    /// Acceleration in m/s², carried between steps for the Verlet update
    pub acceleration: Vector3<f64>,
    /// Net force accumulator in newtons, rebuilt from scratch every step
    pub force: Vector3<f64>,
    /// Anchor bodies are excluded from integration
    pub fixed: bool,
}

impl CelestialBody {
    /// A body at rest at the origin; position and velocity are filled in by
    /// the seeding path.
    pub fn new(id: SolarBody, fixed: bool) -> Self {
        Self {
            id,
            mass: id.mass(),
            radius: id.radius(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            force: Vector3::zeros(),
            fixed,
        }
    }

    pub fn with_state(mut self, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        self.position = position;
        self.velocity = velocity;
        self
    }

    /// Scalar speed in m/s
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Surface gravitational acceleration in m/s²
    pub fn surface_gravity(&self) -> f64 {
        crate::constants::GRAVITATIONAL_CONSTANT * self.mass / (self.radius * self.radius)
    }
}

/// Dense arena of bodies with an id-indexed lookup.
///
/// Iteration order is insertion order, which keeps the O(n²) pairwise force
/// loop cache-friendly; identifier lookups go through the side map.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<CelestialBody>,
    index: AHashMap<SolarBody, usize>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, replacing any previous body with the same id.
    pub fn insert(&mut self, body: CelestialBody) -> BodyIndex {
        if let Some(&i) = self.index.get(&body.id) {
            self.bodies[i] = body;
            BodyIndex(i)
        } else {
            let i = self.bodies.len();
            self.index.insert(body.id, i);
            self.bodies.push(body);
            BodyIndex(i)
        }
    }

    pub fn get(&self, id: SolarBody) -> Option<&CelestialBody> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, id: SolarBody) -> Option<&mut CelestialBody> {
        self.index.get(&id).copied().map(|i| &mut self.bodies[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.iter_mut()
    }

    /// Direct slice access for the pairwise loops.
    pub fn as_slice(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.index.clear();
    }
}
