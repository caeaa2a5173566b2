//! Force models for N-body simulations
//!
//! A force model adds its contribution to the force each body accumulates
//! during a step. Integrators reset those accumulators, ask the model to
//! fill them, then read them back as `F / m`.

use crate::state::SystemState;

pub mod gravity;


pub use gravity::{DirectGravity, SingularityPolicy};

/// A source of force on the bodies of a system
///
/// # Examples
///
/// ```
/// use solar::body::{Body, BodyKind};
/// use solar::forces::{DirectGravity, ForceModel};
/// use solar::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// for x in [0.0, 1.0] {
///     let body = Body::new(BodyKind::Star, 1.0, "white", 1.0, Point2::new(x, 0.0), Vector2::zeros());
///     system.add_body(body.unwrap());
/// }
///
/// let gravity = DirectGravity::new(1.0);
/// system.reset_forces();
/// gravity.accumulate(&mut system);
///
/// // Each body is pulled toward the other
/// assert!(system.bodies()[0].force().x > 0.0);
/// assert!(system.bodies()[1].force().x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Adds this model's force to every body's accumulator.
    ///
    /// Must not touch positions or velocities, and must not reset the
    /// accumulators; that is the integrator's job.
    fn accumulate(&self, state: &mut SystemState);

    /// Potential energy of the current configuration
    ///
    /// Default implementation returns 0.0 for models without a potential.
    fn potential_energy(&self, _state: &SystemState) -> f64 {
        0.0
    }
}
