//! Force components attached to soft bodies: springs, pressure, gravity.

use crate::float::Float;
use crate::point_mass::PointMass;
use crate::shape::{outward_normal, signed_area};
use crate::spring::{spring_force, InternalSpring};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Per-body state the components read while accumulating forces.
pub struct ForceContext<'a, F: Float> {
    /// Rest shape placed at the body's derived position and angle.
    pub global_shape: &'a [Vec2<F>],
    /// Average velocity of the body's point masses.
    pub derived_velocity: Vec2<F>,
    pub gravity: Vec2<F>,
    pub is_kinematic: bool,
}

/// A force source attached to a body.
#[derive(Clone, Debug)]
pub enum Component<F: Float> {
    Spring(SpringComponent<F>),
    Pressure(PressureComponent<F>),
    Gravity(GravityComponent),
}

impl<F: Float> Component<F> {
    /// Called once when the owning body has placed its point masses.
    pub fn prepare(&mut self, points: &[PointMass<F>]) {
        if let Component::Spring(c) = self {
            c.build_edge_springs(points);
        }
    }

    pub fn accumulate(&self, points: &mut [PointMass<F>], ctx: &ForceContext<'_, F>) {
        match self {
            Component::Spring(c) => c.accumulate(points, ctx),
            Component::Pressure(c) => c.accumulate(points),
            Component::Gravity(c) => c.accumulate(points, ctx),
        }
    }
}

/// Edge springs around the outline, optional internal braces, and optional
/// shape matching toward the rest pose.
#[derive(Clone, Debug)]
pub struct SpringComponent<F: Float> {
    pub shape_matching: bool,
    pub edge_stiffness: F,
    pub edge_damping: F,
    pub shape_stiffness: F,
    pub shape_damping: F,
    edge_springs: AllocVec<InternalSpring<F>>,
    internal_springs: AllocVec<InternalSpring<F>>,
}

impl<F: Float> SpringComponent<F> {
    pub fn new(
        shape_matching: bool,
        edge_stiffness: F,
        edge_damping: F,
        shape_stiffness: F,
        shape_damping: F,
    ) -> Self {
        SpringComponent {
            shape_matching,
            edge_stiffness,
            edge_damping,
            shape_stiffness,
            shape_damping,
            edge_springs: AllocVec::new(),
            internal_springs: AllocVec::new(),
        }
    }

    /// Link two point masses at their current distance.
    pub fn add_internal_spring(
        &mut self,
        points: &[PointMass<F>],
        a: usize,
        b: usize,
        stiffness: F,
        damping: F,
    ) {
        self.internal_springs
            .push(InternalSpring::at_current_length(points, a, b, stiffness, damping));
    }

    pub fn edge_springs(&self) -> &[InternalSpring<F>] {
        &self.edge_springs
    }

    pub fn internal_springs(&self) -> &[InternalSpring<F>] {
        &self.internal_springs
    }

    fn build_edge_springs(&mut self, points: &[PointMass<F>]) {
        let n = points.len();
        self.edge_springs.clear();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let j = (i + 1) % n;
            self.edge_springs.push(InternalSpring::at_current_length(
                points,
                i,
                j,
                self.edge_stiffness,
                self.edge_damping,
            ));
        }
    }

    fn accumulate(&self, points: &mut [PointMass<F>], ctx: &ForceContext<'_, F>) {
        for spring in self.edge_springs.iter().chain(self.internal_springs.iter()) {
            spring.apply(points);
        }

        if !self.shape_matching {
            return;
        }
        for (p, target) in points.iter_mut().zip(ctx.global_shape.iter()) {
            // Kinematic bodies are driven from outside, so their anchor moves with the point.
            let anchor_velocity = if ctx.is_kinematic { p.velocity } else { ctx.derived_velocity };
            let force = spring_force(
                p.position,
                p.velocity,
                *target,
                anchor_velocity,
                F::zero(),
                self.shape_stiffness,
                self.shape_damping,
            );
            p.apply_force(force);
        }
    }
}

/// Enclosed gas pushing every edge outward, inversely proportional to area.
#[derive(Clone, Debug)]
pub struct PressureComponent<F: Float> {
    pub gas_amount: F,
}

impl<F: Float> PressureComponent<F> {
    pub fn new(gas_amount: F) -> Self {
        PressureComponent { gas_amount }
    }

    fn accumulate(&self, points: &mut [PointMass<F>]) {
        let n = points.len();
        if n < 3 {
            return;
        }
        let positions: AllocVec<Vec2<F>> = points.iter().map(|p| p.position).collect();
        let area = signed_area(&positions);
        let volume = area.abs().max(F::half());

        for i in 0..n {
            let j = (i + 1) % n;
            let edge_len = positions[i].distance(positions[j]);
            let normal = outward_normal(positions[i], positions[j], area);
            let force = normal.scale(edge_len * self.gas_amount / volume * F::half());
            points[i].apply_force(force);
            points[j].apply_force(force);
        }
    }
}

/// Constant acceleration from the world's gravity.
#[derive(Clone, Debug, Default)]
pub struct GravityComponent;

impl GravityComponent {
    fn accumulate<F: Float>(&self, points: &mut [PointMass<F>], ctx: &ForceContext<'_, F>) {
        for p in points.iter_mut() {
            let mass = p.mass;
            p.apply_force(ctx.gravity.scale(mass));
        }
    }
}
