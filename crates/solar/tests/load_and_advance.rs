//! End-to-end tests: description file in, simulation, report and snapshot out.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use solar::codec;
use solar::config::{GravityConfig, SimulationConfig};
use solar::engine::Engine;
use solar::forces::{DirectGravity, SingularityPolicy};
use solar::integrator::{self, IntegratorKind};
use solar::Error;

const SUN_EARTH: &str = "\
# Sun and Earth in SI units
Star    30 yellow 1.989e30 0        0 0 0
Planet   5 blue   5.974e24 1.496e11 0 0 29783
Moon     1 grey   7.35e22  1.4998e11 0 0 30805
";

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("solar-{}-{}", std::process::id(), name))
}

#[test]
fn load_advance_and_save() {
    let input = scratch_path("input.txt");
    let report = scratch_path("report.txt");
    fs::write(&input, SUN_EARTH).unwrap();

    let loaded = codec::load(&input).unwrap();
    assert_eq!(loaded.system.body_count(), 2);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].line, 4);

    let mut system = loaded.system;
    let engine = Engine::from_config(&SimulationConfig::default()).unwrap();

    // one day in one-hour steps
    let elapsed = engine.run(&mut system, 3600.0, 24).unwrap();
    assert_relative_eq!(elapsed, 86_400.0);

    let earth = &system.bodies()[1];
    let r = earth.position.coords.norm();
    assert!((r - 1.496e11).abs() / 1.496e11 < 1e-3, "radius drifted to {r}");
    assert!(earth.position.y > 0.0, "earth should move prograde");

    codec::save(&report, &system).unwrap();
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("Body 1: type=Star radius=30 color=yellow mass="));
    assert!(text.contains("\n\nBody 2: type=Planet radius=5 color=blue mass="));
    assert_eq!(text.matches("Body ").count(), 2);

    fs::remove_file(&input).ok();
    fs::remove_file(&report).ok();
}

#[test]
fn snapshot_resumes_where_it_left_off() {
    let snapshot = scratch_path("snapshot.txt");
    let config = SimulationConfig::new(
        GravityConfig {
            g: 1.0,
            singularity: SingularityPolicy::default(),
        },
        IntegratorKind::SemiImplicitEuler,
        0.01,
    );
    let engine = Engine::from_config(&config).unwrap();

    let text = "Star 10 yellow 1 0 0 0 0\nPlanet 2 blue 0.001 1 0 0 1 -1\n";
    let mut straight = codec::parse_str(text).unwrap().system;
    let mut resumed = straight.clone();

    engine.run(&mut straight, 0.01, 200).unwrap();

    engine.run(&mut resumed, 0.01, 100).unwrap();
    codec::save_description(&snapshot, &resumed).unwrap();
    let mut resumed = codec::load(&snapshot).unwrap().system;
    assert_eq!(resumed.bodies()[1].orbit_parity, -1);
    engine.run(&mut resumed, 0.01, 100).unwrap();

    for (a, b) in straight.iter().zip(resumed.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }

    fs::remove_file(&snapshot).ok();
}

#[test]
fn free_advance_matches_engine_default() {
    let text = "Star 1 red 1000 0 0 0 0\nPlanet 1 blue 1 10 0 0 10\n";
    let mut via_fn = codec::parse_str(text).unwrap().system;
    let mut via_engine = via_fn.clone();

    let gravity = DirectGravity::new(1.0);
    let config = SimulationConfig::new(
        GravityConfig {
            g: 1.0,
            ..GravityConfig::default()
        },
        IntegratorKind::default(),
        1.0,
    );
    let engine = Engine::from_config(&config).unwrap();

    for _ in 0..50 {
        integrator::advance(&mut via_fn, 0.05, &gravity).unwrap();
        engine.advance(&mut via_engine, 0.05).unwrap();
    }

    assert_eq!(via_fn, via_engine);
}

#[test]
fn malformed_file_reports_path_free_parse_error() {
    let input = scratch_path("broken.txt");
    fs::write(&input, "Star 10 red 1000 0 0 0 0\nPlanet 5 blue 1 x 0 0 0\n").unwrap();

    let err = codec::load(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedField { line: 2, field: "x", .. }));

    fs::remove_file(&input).ok();
}

#[test]
fn unwritable_report_is_an_io_error() {
    let system = codec::parse_str("Star 1 red 1 0 0 0 0\n").unwrap().system;
    let target = scratch_path("no-such-dir").join("report.txt");

    let err = codec::save(&target, &system).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
