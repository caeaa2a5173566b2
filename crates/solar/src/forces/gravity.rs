//! Direct N-body gravity (O(N²) implementation)

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::{Error, Result};
use crate::forces::ForceModel;
use crate::state::SystemState;

/// Distance below which [`SingularityPolicy::Skip`] ignores a pair by default
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// What to do when two bodies get so close that `G m₁ m₂ / r²` blows up
///
/// Whatever the policy, an exactly coincident pair (r = 0) has no
/// direction and contributes no force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case", deny_unknown_fields)]
pub enum SingularityPolicy {
    /// Pairs closer than `epsilon` contribute nothing.
    Skip { epsilon: f64 },
    /// The distance used for the magnitude never drops below `min_distance`.
    Clamp { min_distance: f64 },
    /// Plummer softening: r² becomes r² + length².
    Soften { length: f64 },
}

impl Default for SingularityPolicy {
    fn default() -> Self {
        SingularityPolicy::Skip {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SingularityPolicy {
    pub fn validate(&self) -> Result<()> {
        let (name, value, allow_zero) = match *self {
            SingularityPolicy::Skip { epsilon } => ("epsilon", epsilon, true),
            SingularityPolicy::Clamp { min_distance } => ("min_distance", min_distance, false),
            SingularityPolicy::Soften { length } => ("length", length, false),
        };
        let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
        if !ok {
            return Err(Error::InvalidParam(format!(
                "singularity {name} must be finite and {}, got {value}",
                if allow_zero { ">= 0" } else { "> 0" }
            )));
        }
        Ok(())
    }

    /// Scale `s` such that the force on the first body is `s * dr`,
    /// or `None` when the pair is ignored.
    ///
    /// `gmm` is `G m₁ m₂`, `r2` the squared separation.
    fn force_factor(&self, gmm: f64, r2: f64) -> Option<f64> {
        if r2 == 0.0 {
            return None;
        }
        let r = r2.sqrt();
        match *self {
            SingularityPolicy::Skip { epsilon } => {
                if r < epsilon {
                    None
                } else {
                    Some(gmm / (r2 * r))
                }
            }
            SingularityPolicy::Clamp { min_distance } => {
                let rc = r.max(min_distance);
                Some(gmm / (rc * rc * r))
            }
            SingularityPolicy::Soften { length } => {
                let s2 = r2 + length * length;
                Some(gmm / (s2 * s2.sqrt()))
            }
        }
    }

    /// Pair potential `-G m₁ m₂ / r` under the same policy.
    fn potential(&self, gmm: f64, r2: f64) -> f64 {
        let r = r2.sqrt();
        match *self {
            SingularityPolicy::Skip { epsilon } => {
                if r == 0.0 || r < epsilon {
                    0.0
                } else {
                    -gmm / r
                }
            }
            SingularityPolicy::Clamp { min_distance } => -gmm / r.max(min_distance),
            SingularityPolicy::Soften { length } => -gmm / (r2 + length * length).sqrt(),
        }
    }
}

/// Direct O(N²) gravitational force computation
///
/// Every unordered pair is visited once, in insertion order (`i < j`);
/// the force is computed once and applied with opposite signs to both
/// bodies, so the pair contributions cancel exactly.
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
/// let a = Body::new(BodyKind::Star, 1.0, "red", 2.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// let b = Body::new(BodyKind::Planet, 1.0, "blue", 3.0, Point2::new(2.0, 0.0), Vector2::zeros()).unwrap();
/// system.add_body(a);
/// system.add_body(b);
///
/// DirectGravity::new(1.0).accumulate(&mut system);
///
/// // F = G m₁ m₂ / r² = 6 / 4
/// assert_eq!(system.bodies()[0].force(), Vector2::new(1.5, 0.0));
/// assert_eq!(system.bodies()[1].force(), Vector2::new(-1.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant in whatever units the system uses
    pub g: f64,
    /// Handling of near-coincident pairs
    pub singularity: SingularityPolicy,
}

impl DirectGravity {
    /// Creates direct gravity with the default singularity policy
    pub fn new(g: f64) -> Self {
        Self {
            g,
            singularity: SingularityPolicy::default(),
        }
    }

    pub fn with_policy(g: f64, singularity: SingularityPolicy) -> Self {
        Self { g, singularity }
    }

    /// Creates direct gravity with Plummer softening
    pub fn with_softening(g: f64, length: f64) -> Self {
        Self::with_policy(g, SingularityPolicy::Soften { length })
    }

    /// Force exerted on `a` by `b`, or `None` if the policy drops the pair.
    ///
    /// The force on `b` by `a` is the exact negation.
    pub fn pair_force(&self, a: &Body, b: &Body) -> Option<Vector2<f64>> {
        let dr = b.position - a.position;
        let gmm = self.g * a.mass() * b.mass();
        self.singularity
            .force_factor(gmm, dr.magnitude_squared())
            .map(|s| dr * s)
    }
}

impl ForceModel for DirectGravity {
    fn accumulate(&self, state: &mut SystemState) {
        let bodies = state.bodies_mut();
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if let Some(f) = self.pair_force(a, b) {
                    a.add_force(f);
                    b.add_force(-f);
                }
            }
        }
    }

    fn potential_energy(&self, state: &SystemState) -> f64 {
        state
            .bodies()
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                state.bodies()[i + 1..].iter().map(move |b| {
                    let r2 = (b.position - a.position).magnitude_squared();
                    self.singularity
                        .potential(self.g * a.mass() * b.mass(), r2)
                })
            })
            .sum()
    }
}

/// Speed of a circular orbit of radius `r` around a mass `central_mass`.
///
/// Treats the central body as fixed; for two comparable masses use
/// the reduced problem (`central_mass` = m₁ + m₂, `r` = separation).
///
/// ```
/// use solar::forces::gravity::circular_speed;
///
/// assert_eq!(circular_speed(1.0, 4.0, 1.0), 2.0);
/// ```
pub fn circular_speed(g: f64, central_mass: f64, r: f64) -> f64 {
    (g * central_mass / r).sqrt()
}
