//! Time integration for N-body systems
//!
//! Every integrator follows the same outline per step: zero the force
//! accumulators, let the force model fill them, then update velocities and
//! positions from `F / m`. The default is semi-implicit (symplectic) Euler,
//! which moves positions with the velocity it has just updated.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forces::ForceModel;
use crate::state::SystemState;

/// A time integrator for N-body systems
///
/// Integrators keep no state of their own between steps; everything they
/// touch lives in the `SystemState` passed in.
pub trait Integrator: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep, in the time unit implied by G
    /// * `force` - Force model that fills the accumulators
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel);

    /// Advance the system by `n_steps` fixed timesteps
    ///
    /// # Returns
    ///
    /// Simulation time after the last step
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Recompute every body's accumulated force from scratch
fn refresh_forces(state: &mut SystemState, force: &dyn ForceModel) {
    state.reset_forces();
    force.accumulate(state);
}

/// Semi-implicit (symplectic) Euler integrator, 1st order
///
/// 1. v(t + dt) = v(t) + F(t)/m * dt
/// 2. x(t + dt) = x(t) + v(t + dt) * dt
///
/// One force evaluation per step. Unlike explicit Euler it keeps orbits
/// bounded over long runs.
///
/// # Examples
///
/// ```
/// use solar::body::{Body, BodyKind};
/// use solar::forces::DirectGravity;
/// use solar::integrator::{Integrator, SemiImplicitEuler};
/// use solar::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(Body::new(BodyKind::Star, 10.0, "yellow", 1.0, Point2::origin(), Vector2::zeros()).unwrap());
/// system.add_body(Body::new(BodyKind::Planet, 2.0, "blue", 1e-6, Point2::new(1.0, 0.0), Vector2::new(0.0, 1.0)).unwrap());
///
/// SemiImplicitEuler.step(&mut system, 0.01, &DirectGravity::new(1.0));
/// assert_eq!(system.time, 0.01);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        refresh_forces(state, force);

        state.bodies_mut().iter_mut().for_each(|body| {
            body.velocity += body.acceleration() * dt;
            body.position += body.velocity * dt;
        });

        state.time += dt;
    }
}

/// Explicit Euler integrator (1st order, for testing/comparison only)
///
/// Moves positions with the velocity from before the kick, so energy
/// drifts steadily. Use `SemiImplicitEuler` or `Leapfrog` for real runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl Integrator for Euler {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        refresh_forces(state, force);

        state.bodies_mut().iter_mut().for_each(|body| {
            let accel = body.acceleration();
            body.position += body.velocity * dt;
            body.velocity += accel * dt;
        });

        state.time += dt;
    }
}

/// Symplectic leapfrog integrator (2nd order)
///
/// Kick-drift-kick form:
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
///
/// Two force evaluations per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog;

impl Leapfrog {
    fn kick(&self, state: &mut SystemState, dt_half: f64, force: &dyn ForceModel) {
        refresh_forces(state, force);
        state.bodies_mut().iter_mut().for_each(|body| {
            body.velocity += body.acceleration() * dt_half;
        });
    }

    fn drift(&self, state: &mut SystemState, dt: f64) {
        state.bodies_mut().iter_mut().for_each(|body| {
            body.position += body.velocity * dt;
        });
    }
}

impl Integrator for Leapfrog {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        self.kick(state, dt / 2.0, force);
        self.drift(state, dt);
        self.kick(state, dt / 2.0, force);

        state.time += dt;
    }
}

/// Integration scheme selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[default]
    SemiImplicitEuler,
    Euler,
    Leapfrog,
}

impl IntegratorKind {
    pub fn build(&self) -> Box<dyn Integrator> {
        match self {
            IntegratorKind::SemiImplicitEuler => Box::new(SemiImplicitEuler),
            IntegratorKind::Euler => Box::new(Euler),
            IntegratorKind::Leapfrog => Box::new(Leapfrog),
        }
    }
}

/// Rejects time steps that would poison the state with NaN or infinity
pub fn validate_time_step(dt: f64) -> Result<()> {
    if !dt.is_finite() {
        return Err(Error::InvalidParam(format!("time step must be finite, got {dt}")));
    }
    Ok(())
}

/// One semi-implicit Euler step of length `dt`
///
/// The time step is checked before anything is written, so a rejected
/// call leaves the system untouched. `dt` may differ from call to call,
/// and `dt = 0` leaves positions and velocities unchanged.
///
/// # Examples
///
/// ```
/// use solar::body::{Body, BodyKind};
/// use solar::forces::DirectGravity;
/// use solar::integrator::advance;
/// use solar::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(Body::new(BodyKind::Star, 1.0, "red", 1.0, Point2::origin(), Vector2::zeros()).unwrap());
///
/// let gravity = DirectGravity::new(1.0);
/// advance(&mut system, 0.5, &gravity).unwrap();
/// assert!(advance(&mut system, f64::NAN, &gravity).is_err());
/// assert_eq!(system.time, 0.5);
/// ```
pub fn advance(state: &mut SystemState, dt: f64, force: &dyn ForceModel) -> Result<()> {
    validate_time_step(dt)?;
    SemiImplicitEuler.step(state, dt, force);
    Ok(())
}
