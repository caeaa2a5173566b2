use crate::body::{Body, BodyId};
use nalgebra::{Point2, Vector2};

/// Ordered collection of bodies plus the elapsed simulation time.
///
/// Bodies keep their insertion order; force summation walks them in that
/// order, so two runs over the same input produce the same numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemState {
    /// Simulation time accumulated over all steps so far
    pub time: f64,
    /// Bodies in insertion order; only `add_body` and `remove_body` change the set
    bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    /// Bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable view of the bodies
    ///
    /// Bodies can be edited in place but not added or removed, so every body
    /// keeps the ID `add_body` gave it.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Creates an empty system at time zero
    ///
    /// # Examples
    ///
    /// ```
    /// use solar::state::SystemState;
    ///
    /// let system = SystemState::new();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a system from bodies, assigning IDs in order
    pub fn from_bodies<I: IntoIterator<Item = Body>>(bodies: I) -> Self {
        let mut system = Self::new();
        for body in bodies {
            system.add_body(body);
        }
        system
    }

    /// Appends a body and returns the ID it was given
    ///
    /// Any ID already set on `body` is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use solar::body::{Body, BodyKind};
    /// use solar::state::SystemState;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new();
    /// let earth = Body::new(
    ///     BodyKind::Planet,
    ///     5.0,
    ///     "blue",
    ///     5.97e24,
    ///     Point2::new(1.496e11, 0.0),
    ///     Vector2::new(0.0, 29_780.0),
    /// )
    /// .unwrap();
    ///
    /// let id = system.add_body(earth);
    /// assert_eq!(system.body_count(), 1);
    /// assert!(system.get_body(id).is_some());
    /// ```
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Removes a body, preserving the order of the rest
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    /// Zeroes the accumulated force on every body
    pub fn reset_forces(&mut self) {
        self.bodies.iter_mut().for_each(|b| b.reset_force());
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Constant for an isolated system; drift measures integration error.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Returns the total angular momentum about the origin
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies.iter().map(|b| b.angular_momentum()).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Mass-weighted mean position, `None` for an empty system
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        if self.bodies.is_empty() {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass());
        Some(Point2::from(weighted / self.total_mass()))
    }

    /// Mass-weighted mean velocity, `None` for an empty system
    pub fn center_of_mass_velocity(&self) -> Option<Vector2<f64>> {
        if self.bodies.is_empty() {
            return None;
        }
        Some(self.total_momentum() / self.total_mass())
    }

    /// Shifts positions and velocities so the center of mass sits at rest at the origin
    pub fn move_to_center_of_mass_frame(&mut self) {
        let (Some(com), Some(vcom)) = (self.center_of_mass(), self.center_of_mass_velocity())
        else {
            return;
        };
        for body in self.bodies.iter_mut() {
            body.position -= com.coords;
            body.velocity -= vcom;
        }
    }

    /// Largest |x| or |y| over all bodies
    ///
    /// A renderer uses this as the characteristic size of the system when
    /// picking its scale; zero for an empty system.
    pub fn max_extent(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.position.x.abs().max(b.position.y.abs()))
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a SystemState {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
