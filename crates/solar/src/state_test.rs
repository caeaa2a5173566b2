use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId, BodyKind};
use crate::state::SystemState;

fn make_body(mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Body {
    Body::new(
        BodyKind::Planet,
        5.0,
        "blue",
        mass,
        Point2::new(position[0], position[1]),
        Vector2::new(velocity[0], velocity[1]),
    )
    .unwrap()
}

#[test]
fn test_new_system() {
    let system = SystemState::new();

    assert_eq!(system.time, 0.0);
    assert_eq!(system.body_count(), 0);
    assert!(system.is_empty());
}

#[test]
fn test_add_body_assigns_sequential_ids() {
    let mut system = SystemState::new();

    let id1 = system.add_body(make_body(1.0, [1.0, 0.0], [0.0, 1.0]));
    let id2 = system.add_body(make_body(2.0, [2.0, 0.0], [0.0, 1.0]));

    assert_eq!(system.body_count(), 2);
    assert_eq!(id1, BodyId(0));
    assert_eq!(id2, BodyId(1));
}

#[test]
fn test_insertion_order_preserved() {
    let system = SystemState::from_bodies(vec![
        make_body(3.0, [0.0, 0.0], [0.0, 0.0]),
        make_body(1.0, [0.0, 0.0], [0.0, 0.0]),
        make_body(2.0, [0.0, 0.0], [0.0, 0.0]),
    ]);

    let masses: Vec<f64> = system.iter().map(|b| b.mass()).collect();
    assert_eq!(masses, vec![3.0, 1.0, 2.0]);
}

#[test]
fn test_remove_body() {
    let mut system = SystemState::new();
    let a = system.add_body(make_body(1.0, [1.0, 0.0], [0.0, 0.0]));
    let b = system.add_body(make_body(2.0, [2.0, 0.0], [0.0, 0.0]));
    let c = system.add_body(make_body(3.0, [3.0, 0.0], [0.0, 0.0]));

    let removed = system.remove_body(b).unwrap();
    assert_eq!(removed.id, b);
    assert_eq!(system.body_count(), 2);

    let remaining: Vec<BodyId> = system.iter().map(|b| b.id).collect();
    assert_eq!(remaining, vec![a, c]);
}

#[test]
fn test_remove_nonexistent_body() {
    let mut system = SystemState::new();
    assert!(system.remove_body(BodyId(999)).is_none());
}

#[test]
fn test_ids_not_reused_after_removal() {
    let mut system = SystemState::new();
    let first = system.add_body(make_body(1.0, [0.0, 0.0], [0.0, 0.0]));
    system.remove_body(first);
    let second = system.add_body(make_body(1.0, [0.0, 0.0], [0.0, 0.0]));
    assert_ne!(first, second);
}

#[test]
fn test_get_body_mut() {
    let mut system = SystemState::new();
    let id = system.add_body(make_body(1.0, [1.0, 0.0], [0.0, 0.0]));

    if let Some(body) = system.get_body_mut(id) {
        body.color = "orange".to_string();
    }

    assert_eq!(system.get_body(id).unwrap().color, "orange");
}

#[test]
fn test_total_mass() {
    let system = SystemState::from_bodies(vec![
        make_body(0.5, [1.0, 0.0], [0.0, 0.0]),
        make_body(1.5, [2.0, 0.0], [0.0, 0.0]),
    ]);
    assert_eq!(system.total_mass(), 2.0);
}

#[test]
fn test_total_momentum_zero() {
    let system = SystemState::from_bodies(vec![
        make_body(2.0, [1.0, 0.0], [0.0, 10.0]),
        make_body(2.0, [-1.0, 0.0], [0.0, -10.0]),
    ]);
    assert!(system.total_momentum().magnitude() < 1e-12);
}

#[test]
fn test_total_angular_momentum() {
    let system = SystemState::from_bodies(vec![
        make_body(1.0, [1.0, 0.0], [0.0, 2.0]),
        make_body(2.0, [0.0, 3.0], [-1.0, 0.0]),
    ]);
    // 1 * (1 * 2) + 2 * (0 - 3 * -1) = 2 + 6
    assert_relative_eq!(system.total_angular_momentum(), 8.0);
}

#[test]
fn test_kinetic_energy() {
    let system = SystemState::from_bodies(vec![
        make_body(2.0, [0.0, 0.0], [1.0, 0.0]),
        make_body(1.0, [0.0, 0.0], [0.0, 2.0]),
    ]);
    assert_relative_eq!(system.kinetic_energy(), 1.0 + 2.0);
}

#[test]
fn test_center_of_mass() {
    let system = SystemState::from_bodies(vec![
        make_body(3.0, [0.0, 0.0], [1.0, 0.0]),
        make_body(1.0, [4.0, 4.0], [-3.0, 4.0]),
    ]);

    let com = system.center_of_mass().unwrap();
    assert_relative_eq!(com.x, 1.0);
    assert_relative_eq!(com.y, 1.0);

    let vcom = system.center_of_mass_velocity().unwrap();
    assert_relative_eq!(vcom.x, 0.0);
    assert_relative_eq!(vcom.y, 1.0);
}

#[test]
fn test_center_of_mass_empty() {
    let system = SystemState::new();
    assert!(system.center_of_mass().is_none());
    assert!(system.center_of_mass_velocity().is_none());
}

#[test]
fn test_move_to_center_of_mass_frame() {
    let mut system = SystemState::from_bodies(vec![
        make_body(3.0, [1.0, 2.0], [1.0, 0.0]),
        make_body(1.0, [5.0, -2.0], [-3.0, 4.0]),
    ]);

    system.move_to_center_of_mass_frame();

    let com = system.center_of_mass().unwrap();
    assert!(com.coords.magnitude() < 1e-12);
    assert!(system.total_momentum().magnitude() < 1e-12);
}

#[test]
fn test_max_extent() {
    let system = SystemState::from_bodies(vec![
        make_body(1.0, [3.0, -1.0], [0.0, 0.0]),
        make_body(1.0, [-2.0, -7.5], [0.0, 0.0]),
    ]);
    assert_eq!(system.max_extent(), 7.5);
    assert_eq!(SystemState::new().max_extent(), 0.0);
}

#[test]
fn test_reset_forces() {
    let mut system = SystemState::from_bodies(vec![make_body(1.0, [0.0, 0.0], [0.0, 0.0])]);
    system.bodies_mut()[0].add_force(Vector2::new(1.0, 1.0));

    system.reset_forces();

    assert_eq!(system.bodies()[0].force(), Vector2::zeros());
}

#[test]
fn test_bodies_mut_keeps_ids() {
    let mut system = SystemState::from_bodies(vec![
        make_body(1.0, [0.0, 0.0], [0.0, 0.0]),
        make_body(2.0, [1.0, 0.0], [0.0, 0.0]),
    ]);

    for body in system.bodies_mut() {
        body.position.x += 10.0;
    }

    let ids: Vec<BodyId> = system.bodies().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![BodyId(0), BodyId(1)]);
    assert_eq!(system.get_body(BodyId(1)).unwrap().position.x, 11.0);
}

#[test]
fn test_system_clone() {
    let mut system1 = SystemState::new();
    system1.add_body(make_body(1.0, [1.0, 0.0], [0.0, 1.0]));
    system1.time = 12.5;

    let system2 = system1.clone();

    assert_eq!(system1, system2);
}
