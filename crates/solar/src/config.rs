//! Simulation configuration loaded from YAML.
//!
//! The engine reads nothing from global state: the gravitational constant,
//! the zero-distance policy and the integration scheme all come from a
//! [`SimulationConfig`] handed to [`crate::engine::Engine::from_config`].
//!
//! # YAML format
//!
//! Every field is optional and falls back to [`SimulationConfig::default`]:
//!
//! ```yaml
//! gravity:
//!   g: 6.67408e-11          # gravitational constant
//!   singularity:
//!     policy: skip          # skip | clamp | soften
//!     epsilon: 1.0e-9       # clamp uses min_distance, soften uses length
//! integrator: semi_implicit_euler   # or euler, leapfrog
//! time_step: 1.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forces::gravity::{DirectGravity, SingularityPolicy};
use crate::integrator::{validate_time_step, IntegratorKind};

/// Gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.67408e-11;

/// Physical parameters of the force model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GravityConfig {
    /// Gravitational constant, in the units the description file uses
    pub g: f64,
    /// Handling of near-coincident pairs
    pub singularity: SingularityPolicy,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            g: G_SI,
            singularity: SingularityPolicy::default(),
        }
    }
}

impl GravityConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.g.is_finite() || self.g <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "gravitational constant must be finite and > 0, got {}",
                self.g
            )));
        }
        self.singularity.validate()
    }

    pub fn force_model(&self) -> DirectGravity {
        DirectGravity::with_policy(self.g, self.singularity)
    }
}

/// Top-level configuration for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub gravity: GravityConfig,
    pub integrator: IntegratorKind,
    /// Default step length for drivers that do not pick their own
    pub time_step: f64,
}

impl SimulationConfig {
    pub fn new(gravity: GravityConfig, integrator: IntegratorKind, time_step: f64) -> Self {
        Self {
            gravity,
            integrator,
            time_step,
        }
    }

    /// Parses and validates a YAML document
    ///
    /// # Examples
    ///
    /// ```
    /// use solar::config::SimulationConfig;
    /// use solar::forces::SingularityPolicy;
    ///
    /// let config = SimulationConfig::from_yaml_str(
    ///     "gravity:\n  g: 1.0\n  singularity:\n    policy: clamp\n    min_distance: 0.01\n",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.gravity.g, 1.0);
    /// assert_eq!(
    ///     config.gravity.singularity,
    ///     SingularityPolicy::Clamp { min_distance: 0.01 }
    /// );
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.gravity.validate()?;
        validate_time_step(self.time_step)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(GravityConfig::default(), IntegratorKind::default(), 1.0)
    }
}
