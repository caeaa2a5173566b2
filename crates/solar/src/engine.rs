//! Configured force model and integrator, ready to step a system
//!
//! The engine does not own a system. Drivers keep their `SystemState`
//! and hand it in on every call; pausing is simply not calling
//! [`Engine::advance`].

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{validate_time_step, Integrator};
use crate::state::SystemState;

pub struct Engine {
    force: DirectGravity,
    integrator: Box<dyn Integrator>,
}

impl Engine {
    /// Validates the configuration and builds the matching engine
    ///
    /// # Examples
    ///
    /// ```
    /// use solar::config::SimulationConfig;
    /// use solar::engine::Engine;
    /// use solar::state::SystemState;
    ///
    /// let engine = Engine::from_config(&SimulationConfig::default()).unwrap();
    /// let mut system = SystemState::new();
    /// engine.advance(&mut system, 60.0).unwrap();
    /// assert_eq!(system.time, 60.0);
    /// ```
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            force: config.gravity.force_model(),
            integrator: config.integrator.build(),
        })
    }

    pub fn force(&self) -> &DirectGravity {
        &self.force
    }

    /// One step of length `dt`
    ///
    /// A non-finite `dt` is rejected before the system is touched.
    pub fn advance(&self, state: &mut SystemState, dt: f64) -> Result<()> {
        validate_time_step(dt)?;
        self.integrator.step(state, dt, &self.force);
        Ok(())
    }

    /// `steps` fixed steps of length `dt`; returns the final simulation time
    pub fn run(&self, state: &mut SystemState, dt: f64, steps: usize) -> Result<f64> {
        validate_time_step(dt)?;
        Ok(self.integrator.integrate(state, dt, steps, &self.force))
    }

    pub fn potential_energy(&self, state: &SystemState) -> f64 {
        self.force.potential_energy(state)
    }

    pub fn total_energy(&self, state: &SystemState) -> f64 {
        state.kinetic_energy() + self.potential_energy(state)
    }
}
