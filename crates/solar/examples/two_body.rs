//! Sun and Earth for one year
//!
//! Compares the default semi-implicit Euler step with leapfrog and
//! explicit Euler by energy drift and how well the orbit closes.
//!
//! Run with: cargo run --package solar --example two_body

use solar::codec;
use solar::config::{GravityConfig, SimulationConfig};
use solar::engine::Engine;
use solar::integrator::IntegratorKind;

const SYSTEM: &str = "\
Star   30 yellow 1.989e30 0        0 0 0
Planet  5 blue   5.974e24 1.496e11 0 0 29783
";

fn main() -> solar::Result<()> {
    let year: f64 = 365.25 * 86_400.0;
    let dt = 3_600.0;
    let steps = (year / dt).round() as usize;

    println!("Sun + Earth, {steps} steps of {dt} s\n");
    println!(
        "{:<22} {:>14} {:>14}",
        "integrator", "energy drift", "miss (km)"
    );
    println!("{}", "-".repeat(52));

    for kind in [
        IntegratorKind::SemiImplicitEuler,
        IntegratorKind::Leapfrog,
        IntegratorKind::Euler,
    ] {
        let config = SimulationConfig::new(GravityConfig::default(), kind, dt);
        let engine = Engine::from_config(&config)?;

        let mut system = codec::parse_str(SYSTEM)?.system;
        system.move_to_center_of_mass_frame();
        let start = system.bodies()[1].position;
        let e0 = engine.total_energy(&system);

        engine.run(&mut system, dt, steps)?;

        let e1 = engine.total_energy(&system);
        let miss = (system.bodies()[1].position - start).norm() / 1_000.0;
        println!(
            "{:<22} {:>14.3e} {:>14.0}",
            format!("{kind:?}"),
            (e1 - e0) / e0.abs(),
            miss
        );
    }

    Ok(())
}
