//! Damped Hookean springs between point masses.

use crate::float::Float;
use crate::point_mass::PointMass;
use crate::vec::Vec2;

/// Force on the first endpoint of a damped spring.
///
/// The second endpoint receives the negation. Returns zero when the
/// endpoints coincide, since no direction is defined.
pub fn spring_force<F: Float>(
    pos_a: Vec2<F>,
    vel_a: Vec2<F>,
    pos_b: Vec2<F>,
    vel_b: Vec2<F>,
    rest_length: F,
    stiffness: F,
    damping: F,
) -> Vec2<F> {
    let delta = pos_a - pos_b;
    let dist = delta.length();
    if dist.is_near_zero(F::from_f32(1e-10)) {
        return Vec2::zero();
    }
    let dir = delta.scale(F::one() / dist);
    let stretch = dist - rest_length;
    let closing = (vel_a - vel_b).dot(dir);
    dir.scale(-(stretch * stiffness + closing * damping))
}

/// A spring joining two point masses of the same body by index.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalSpring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
}

impl<F: Float> InternalSpring<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F, damping: F) -> Self {
        InternalSpring { a, b, rest_length, stiffness, damping }
    }

    /// Spring whose rest length is the current distance between `a` and `b`.
    pub fn at_current_length(
        points: &[PointMass<F>],
        a: usize,
        b: usize,
        stiffness: F,
        damping: F,
    ) -> Self {
        let rest_length = points[a].position.distance(points[b].position);
        InternalSpring { a, b, rest_length, stiffness, damping }
    }

    pub fn apply(&self, points: &mut [PointMass<F>]) {
        let (pa, pb) = (&points[self.a], &points[self.b]);
        let force = spring_force(
            pa.position,
            pa.velocity,
            pb.position,
            pb.velocity,
            self.rest_length,
            self.stiffness,
            self.damping,
        );
        points[self.a].apply_force(force);
        points[self.b].apply_force(-force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretched_spring_pulls_together() {
        let f = spring_force(
            Vec2::new(0.0f64, 0.0),
            Vec2::zero(),
            Vec2::new(2.0, 0.0),
            Vec2::zero(),
            1.0,
            10.0,
            0.0,
        );
        // a sits left of b, so the pull on a points right.
        assert!((f.x - 10.0).abs() < 1e-9, "f = {:?}", f);
        assert!(f.y.abs() < 1e-9);
    }

    #[test]
    fn coincident_endpoints_produce_no_force() {
        let p = Vec2::new(1.0f32, 1.0);
        let f = spring_force(p, Vec2::zero(), p, Vec2::zero(), 1.0, 10.0, 1.0);
        assert_eq!(f, Vec2::zero());
    }

    #[test]
    fn damping_opposes_separation_speed() {
        let f = spring_force(
            Vec2::new(0.0f64, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::zero(),
            1.0,
            0.0,
            5.0,
        );
        assert!(f.x > 0.0, "damping should push a back toward b, got {:?}", f);
    }
}
