//! Deformable bodies: a ring of point masses with attached force components.

use crate::collision::Aabb;
use crate::component::{Component, ForceContext};
use crate::float::Float;
use crate::point_mass::PointMass;
use crate::shape::ClosedShape;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// A soft body.
///
/// The body's point masses start on its [`ClosedShape`] placed at the spawn
/// position. Every step the body derives a position, velocity and angle from
/// its points; shape matching then pulls the points toward the rest shape
/// placed at that derived frame.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    base_shape: ClosedShape<F>,
    global_shape: AllocVec<Vec2<F>>,
    points: AllocVec<PointMass<F>>,
    components: AllocVec<Component<F>>,
    position: Vec2<F>,
    velocity: Vec2<F>,
    angle: F,
    aabb: Aabb<F>,
    /// Per-step velocity multiplier. 1.0 keeps all momentum.
    pub vel_damping: F,
    /// Static bodies never move; their points carry infinite mass.
    pub is_static: bool,
    /// Kinematic bodies keep the position set from outside instead of deriving it.
    pub is_kinematic: bool,
    /// Pinned bodies deform but their frame stays at the spawn position.
    pub is_pinned: bool,
    /// When false the derived angle stays at zero.
    pub free_rotate: bool,
}

impl<F: Float> Body<F> {
    /// Place `shape` at `position` and attach `components`.
    ///
    /// `point_masses` holds one mass per vertex; a single entry applies to
    /// every vertex and an empty slice means mass 1.
    pub fn new(
        shape: ClosedShape<F>,
        point_masses: &[F],
        position: Vec2<F>,
        kinematic: bool,
        components: AllocVec<Component<F>>,
    ) -> Self {
        let global_shape = shape.transformed(position, F::zero());
        let points: AllocVec<PointMass<F>> = global_shape
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mass = match point_masses {
                    [] => F::one(),
                    [single] => *single,
                    many => many.get(i).copied().unwrap_or(many[many.len() - 1]),
                };
                PointMass::new(*v, mass)
            })
            .collect();
        let aabb = Aabb::from_points(points.iter().map(|p| p.position));
        let is_static = points.iter().all(|p| p.is_immovable()) && !points.is_empty();

        let mut body = Body {
            base_shape: shape,
            global_shape,
            points,
            components,
            position,
            velocity: Vec2::zero(),
            angle: F::zero(),
            aabb,
            vel_damping: F::from_f32(0.999),
            is_static,
            is_kinematic: kinematic,
            is_pinned: false,
            free_rotate: true,
        };
        for component in body.components.iter_mut() {
            component.prepare(&body.points);
        }
        body
    }

    /// Add an internal spring between two point masses at their current
    /// distance. Does nothing when the body has no spring component.
    pub fn add_internal_spring(&mut self, a: usize, b: usize, stiffness: F, damping: F) {
        let points = &self.points;
        if let Some(spring) = self.components.iter_mut().find_map(|c| match c {
            Component::Spring(s) => Some(s),
            _ => None,
        }) {
            spring.add_internal_spring(points, a, b, stiffness, damping);
        }
    }

    /// Recompute position, velocity and angle from the current point masses.
    pub fn derive_frame(&mut self) {
        if self.points.is_empty() || self.is_static {
            return;
        }
        let n = F::from_f32(self.points.len() as f32);
        let mut center = Vec2::zero();
        let mut velocity = Vec2::zero();
        for p in &self.points {
            center += p.position;
            velocity += p.velocity;
        }
        let center = center.scale(F::one() / n);
        self.velocity = velocity.scale(F::one() / n);

        if !self.is_kinematic && !self.is_pinned {
            self.position = center;
        }
        self.angle = if self.free_rotate { self.mean_rotation(center) } else { F::zero() };
        self.global_shape = self.base_shape.transformed(self.position, self.angle);
    }

    /// Average signed angle between the rest shape and the current points.
    fn mean_rotation(&self, center: Vec2<F>) -> F {
        let two_pi = F::two() * F::pi();
        let mut first = None;
        let mut total = F::zero();
        let mut count = 0usize;
        for (p, rest) in self.points.iter().zip(self.base_shape.vertices()) {
            let current = p.position - center;
            if current.length_sq().is_near_zero(F::from_f32(1e-12))
                || rest.length_sq().is_near_zero(F::from_f32(1e-12))
            {
                continue;
            }
            let mut angle = F::atan2(rest.cross(current), rest.dot(current));
            // Keep every sample on the same side of the +-pi seam as the first.
            match first {
                None => first = Some(angle),
                Some(reference) => {
                    if angle - reference > F::pi() {
                        angle = angle - two_pi;
                    } else if reference - angle > F::pi() {
                        angle = angle + two_pi;
                    }
                }
            }
            total = total + angle;
            count += 1;
        }
        if count == 0 {
            F::zero()
        } else {
            total / F::from_f32(count as f32)
        }
    }

    pub fn accumulate_forces(&mut self, gravity: Vec2<F>) {
        let ctx = ForceContext {
            global_shape: &self.global_shape,
            derived_velocity: self.velocity,
            gravity,
            is_kinematic: self.is_kinematic,
        };
        for component in &self.components {
            component.accumulate(&mut self.points, &ctx);
        }
    }

    pub fn integrate(&mut self, dt: F) {
        if self.is_static {
            for p in self.points.iter_mut() {
                p.force = Vec2::zero();
            }
            return;
        }
        for p in self.points.iter_mut() {
            p.integrate(dt);
        }
    }

    pub fn dampen_velocity(&mut self) {
        if self.is_static {
            return;
        }
        for p in self.points.iter_mut() {
            p.velocity = p.velocity.scale(self.vel_damping);
        }
    }

    pub fn update_aabb(&mut self) {
        self.aabb = Aabb::from_points(self.points.iter().map(|p| p.position));
    }

    /// Move a kinematic body's frame. Other bodies derive their position.
    pub fn set_position(&mut self, position: Vec2<F>) {
        self.position = position;
    }

    /// Check if a point is inside the body outline using ray casting.
    pub fn contains(&self, point: Vec2<F>) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i].position;
            let pj = self.points[j].position;
            let dy = pj.y - pi.y;
            if !dy.is_near_zero(F::from_f32(1e-10))
                && ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / dy + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn points(&self) -> &[PointMass<F>] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [PointMass<F>] {
        &mut self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn components(&self) -> &[Component<F>] {
        &self.components
    }

    pub fn position(&self) -> Vec2<F> {
        self.position
    }

    pub fn velocity(&self) -> Vec2<F> {
        self.velocity
    }

    pub fn angle(&self) -> F {
        self.angle
    }

    pub fn aabb(&self) -> &Aabb<F> {
        &self.aabb
    }

    pub fn base_shape(&self) -> &ClosedShape<F> {
        &self.base_shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::GravityComponent;

    fn unit_box(position: Vec2<f64>) -> Body<f64> {
        Body::new(
            ClosedShape::rectangle(Vec2::new(2.0, 2.0)),
            &[1.0],
            position,
            false,
            alloc::vec![Component::Gravity(GravityComponent)],
        )
    }

    #[test]
    fn contains_center() {
        let body = unit_box(Vec2::new(5.0, 5.0));
        assert!(body.contains(Vec2::new(5.0, 5.0)), "Center should be inside");
        assert!(!body.contains(Vec2::new(100.0, 100.0)), "Far point should be outside");
    }

    #[test]
    fn infinite_mass_marks_body_static() {
        let body = Body::new(
            ClosedShape::rectangle(Vec2::new(2.0f64, 2.0)),
            &[f64::INFINITY],
            Vec2::zero(),
            false,
            AllocVec::new(),
        );
        assert!(body.is_static);
    }

    #[test]
    fn derived_angle_tracks_rotation() {
        let mut body = unit_box(Vec2::zero());
        let turn = 0.3f64;
        for p in body.points_mut() {
            p.position = p.position.rotate(turn);
        }
        body.derive_frame();
        assert!((body.angle() - turn).abs() < 1e-9, "angle = {}", body.angle());
    }

    #[test]
    fn pinned_body_keeps_spawn_position() {
        let mut body = unit_box(Vec2::new(3.0, 3.0));
        body.is_pinned = true;
        for p in body.points_mut() {
            p.position += Vec2::new(1.0, 0.0);
        }
        body.derive_frame();
        assert_eq!(body.position(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn fixed_rotation_keeps_angle_zero() {
        let mut body = unit_box(Vec2::zero());
        body.free_rotate = false;
        for p in body.points_mut() {
            p.position = p.position.rotate(0.5);
        }
        body.derive_frame();
        assert_eq!(body.angle(), 0.0);
    }
}
