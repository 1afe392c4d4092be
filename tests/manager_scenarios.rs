//! End-to-end scenarios through the physics manager: mode bridging,
//! Lagrange/tidal derivation, and the reference self-check.

use orrery::constants::{JD_J2000, SECONDS_PER_DAY, SolarBody};
use orrery::elements::ElementTable;
use orrery::manager::{Mode, PhysicsConfig, PhysicsManager};
use orrery::orrery_errors::OrreryError;

fn manager() -> PhysicsManager {
    let config = PhysicsConfig {
        step_interval_seconds: 0.0,
        ..PhysicsConfig::default()
    };
    PhysicsManager::new(ElementTable::standish_j2000(), config).unwrap()
}

#[test]
fn kepler_mode_tracks_supplied_time() {
    let mut m = manager();
    m.update(JD_J2000, 1.0).unwrap();
    let at_epoch: Vec<_> = m.snapshots().to_vec();

    m.update(JD_J2000 + 100.0, 1.0).unwrap();
    let later: Vec<_> = m.snapshots().to_vec();

    assert_eq!(at_epoch.len(), later.len());
    let earth_epoch = at_epoch.iter().find(|s| s.body == SolarBody::Earth).unwrap();
    let earth_later = later.iter().find(|s| s.body == SolarBody::Earth).unwrap();
    // 100 days is more than a quarter orbit; the position must move
    assert!((earth_later.position - earth_epoch.position).norm() > 10.0);
}

#[test]
fn nbody_mode_self_check_passes() {
    let mut m = manager();
    m.request_mode(Mode::NBody);
    m.update(JD_J2000, 1.0).unwrap();

    let report = m.validate().unwrap();
    assert!(
        report.passed(),
        "failures: {:?}",
        report.failures().collect::<Vec<_>>()
    );
}

#[test]
fn nbody_month_keeps_self_check_green() {
    let mut m = manager();
    m.request_mode(Mode::NBody);
    m.update(JD_J2000, 1.0).unwrap();

    // one simulated month at max playback (6 h clamped steps)
    let steps = (30.0 * SECONDS_PER_DAY / 21_600.0) as usize;
    for _ in 0..steps {
        m.update(JD_J2000, 1_000.0).unwrap();
    }
    assert!(m.validate().unwrap().passed());
}

#[test]
fn earth_moon_lagrange_geometry() {
    let mut m = manager();
    m.request_mode(Mode::NBody);
    m.update(JD_J2000, 1.0).unwrap();

    let points = m.lagrange_points(SolarBody::Earth, SolarBody::Moon).unwrap();
    let earth = m
        .snapshots()
        .iter()
        .find(|s| s.body == SolarBody::Earth)
        .unwrap()
        .position
        * 1e9;
    let moon = m
        .snapshots()
        .iter()
        .find(|s| s.body == SolarBody::Moon)
        .unwrap()
        .position
        * 1e9;

    // L1 strictly between the two bodies
    let d = (moon - earth).norm();
    let l1_to_earth = (points.l1 - earth).norm();
    let l1_to_moon = (points.l1 - moon).norm();
    assert!(l1_to_earth < d && l1_to_moon < d);
    assert!((l1_to_earth + l1_to_moon - d).abs() / d < 1e-9);

    // L4/L5 equilateral with the pair
    for point in [points.l4, points.l5] {
        let side_a = (point - earth).norm();
        let side_b = (point - moon).norm();
        assert!((side_a - d).abs() / d < 1e-9);
        assert!((side_b - d).abs() / d < 1e-9);
    }
}

#[test]
fn lunar_tide_sample_through_manager() {
    let mut m = manager();
    m.request_mode(Mode::NBody);
    m.update(JD_J2000, 1.0).unwrap();

    let sample = m.tidal_sample(SolarBody::Earth, SolarBody::Moon).unwrap();
    assert!(sample.gradient < 0.0);
    assert!(sample.bulge_height > 0.05 && sample.bulge_height < 1.5);
    assert!((sample.direction.norm() - 1.0).abs() < 1e-12);
}

#[test]
fn derived_quantities_require_nbody_state() {
    let m = manager();
    assert_eq!(
        m.lagrange_points(SolarBody::Earth, SolarBody::Moon),
        Err(OrreryError::SystemNotSeeded)
    );
    assert_eq!(
        m.tidal_sample(SolarBody::Earth, SolarBody::Moon),
        Err(OrreryError::SystemNotSeeded)
    );
}

#[test]
fn switching_back_to_kepler_restores_closed_form() {
    let mut m = manager();
    m.request_mode(Mode::NBody);
    m.update(JD_J2000, 1.0).unwrap();
    m.update(JD_J2000, 1.0).unwrap();

    m.request_mode(Mode::Kepler);
    m.update(JD_J2000 + 50.0, 1.0).unwrap();
    assert_eq!(m.mode(), Mode::Kepler);
    assert!(m.snapshots().iter().all(|s| s.jd == JD_J2000 + 50.0));
}
