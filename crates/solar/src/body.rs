use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Tag distinguishing stars from planets.
///
/// Physics treats both the same; the tag only matters to whoever draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
}

impl BodyKind {
    /// Matches a description-file type token, ignoring case.
    ///
    /// ```
    /// use solar::body::BodyKind;
    ///
    /// assert_eq!(BodyKind::from_token("STAR"), Some(BodyKind::Star));
    /// assert_eq!(BodyKind::from_token("planet"), Some(BodyKind::Planet));
    /// assert_eq!(BodyKind::from_token("Moon"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("star") {
            Some(BodyKind::Star)
        } else if token.eq_ignore_ascii_case("planet") {
            Some(BodyKind::Planet)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A star or planet treated as a point mass.
///
/// Mass is private so the `mass > 0` invariant set up by [`Body::new`]
/// cannot be broken afterwards; use [`Body::set_mass`] to change it.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub radius: f64, // display radius, no physical effect
    pub color: String,
    mass: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    force: Vector2<f64>, // accumulated during the current step only
    pub orbit_parity: i32,
}

impl Body {
    /// Creates a body after validating its physical state.
    ///
    /// # Errors
    ///
    /// `Error::InvalidBody` if `mass` is not finite and positive, `radius`
    /// is negative or not finite, `color` is empty or contains whitespace,
    /// or any position/velocity component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use solar::body::{Body, BodyKind};
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let sun = Body::new(
    ///     BodyKind::Star,
    ///     10.0,
    ///     "yellow",
    ///     1.99e30,
    ///     Point2::origin(),
    ///     Vector2::zeros(),
    /// )
    /// .unwrap();
    /// assert_eq!(sun.mass(), 1.99e30);
    ///
    /// let ghost = Body::new(BodyKind::Planet, 1.0, "grey", 0.0, Point2::origin(), Vector2::zeros());
    /// assert!(ghost.is_err());
    /// ```
    pub fn new(
        kind: BodyKind,
        radius: f64,
        color: impl Into<String>,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Result<Self> {
        let color: String = color.into();
        validate_mass(mass)?;
        validate_color(&color)?;
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidBody(format!(
                "radius must be finite and >= 0, got {radius}"
            )));
        }
        if !position.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidBody("position must be finite".into()));
        }
        if !velocity.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidBody("velocity must be finite".into()));
        }

        Ok(Body {
            id: BodyId(0),
            kind,
            radius,
            color,
            mass,
            position,
            velocity,
            force: Vector2::zeros(),
            orbit_parity: 0,
        })
    }

    pub fn with_orbit_parity(mut self, orbit_parity: i32) -> Self {
        self.orbit_parity = orbit_parity;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Replaces the mass, keeping the old one if the new value is invalid.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// Force accumulated so far in the current step.
    pub fn force(&self) -> Vector2<f64> {
        self.force
    }

    pub(crate) fn add_force(&mut self, force: Vector2<f64>) {
        self.force += force;
    }

    pub(crate) fn reset_force(&mut self) {
        self.force = Vector2::zeros();
    }

    /// Acceleration implied by the accumulated force, F / m.
    pub fn acceleration(&self) -> Vector2<f64> {
        self.force / self.mass
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).magnitude()
    }

    /// z-component of r × p about the origin.
    pub fn angular_momentum(&self) -> f64 {
        self.mass * (self.position.x * self.velocity.y - self.position.y * self.velocity.x)
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(Error::InvalidBody(format!(
            "mass must be finite and > 0, got {mass}"
        )));
    }
    Ok(())
}

/// Colors are single tokens in a description file.
pub(crate) fn validate_color(color: &str) -> Result<()> {
    if color.is_empty() || color.contains(char::is_whitespace) {
        return Err(Error::InvalidBody(format!(
            "color must be a single non-empty token, got `{color}`"
        )));
    }
    Ok(())
}
