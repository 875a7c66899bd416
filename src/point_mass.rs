//! Point masses: the vertices every soft body is made of.

use crate::float::Float;
use crate::vec::Vec2;

/// A point mass with explicit velocity, advanced by semi-implicit Euler.
///
/// An infinite (or zero) mass yields a zero inverse mass; such points ignore
/// forces and never move on their own.
#[derive(Clone, Debug)]
pub struct PointMass<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub force: Vec2<F>,
    pub mass: F,
    pub inv_mass: F,
}

impl<F: Float> PointMass<F> {
    pub fn new(position: Vec2<F>, mass: F) -> Self {
        PointMass {
            position,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            mass,
            inv_mass: inverse_mass(mass),
        }
    }

    /// `true` when forces cannot move this point.
    pub fn is_immovable(&self) -> bool {
        self.inv_mass.is_near_zero(F::from_f32(1e-12))
    }

    pub fn apply_force(&mut self, force: Vec2<F>) {
        if !self.is_immovable() {
            self.force += force;
        }
    }

    pub fn integrate(&mut self, dt: F) {
        if self.is_immovable() {
            self.force = Vec2::zero();
            return;
        }
        self.velocity += self.force.scale(self.inv_mass * dt);
        self.position += self.velocity.scale(dt);
        self.force = Vec2::zero();
    }

    pub fn set_mass(&mut self, mass: F) {
        self.mass = mass;
        self.inv_mass = inverse_mass(mass);
    }
}

fn inverse_mass<F: Float>(mass: F) -> F {
    if !mass.is_finite() || mass.is_near_zero(F::from_f32(1e-10)) {
        F::zero()
    } else {
        F::one() / mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_mass_never_moves() {
        let mut p = PointMass::new(Vec2::new(5.0f64, 5.0), f64::INFINITY);
        p.apply_force(Vec2::new(1000.0, 1000.0));
        p.integrate(1.0 / 60.0);
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
        assert_eq!(p.velocity, Vec2::zero());
    }

    #[test]
    fn force_is_cleared_after_integration() {
        let mut p = PointMass::new(Vec2::new(0.0f32, 0.0), 2.0);
        p.apply_force(Vec2::new(4.0, 0.0));
        p.integrate(0.5);
        // a = 2, v = 1, x = 0.5
        assert!((p.velocity.x - 1.0).abs() < 1e-6);
        assert!((p.position.x - 0.5).abs() < 1e-6);
        assert_eq!(p.force, Vec2::zero());
    }
}
