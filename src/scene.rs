//! Assembling bodies into a world: boxes, bouncy balls and the demo layout.

use crate::body::Body;
use crate::component::{Component, GravityComponent, PressureComponent, SpringComponent};
use crate::float::Float;
use crate::shape::ClosedShape;
use crate::vec::Vec2;
use crate::world::World;
use alloc::vec::Vec as AllocVec;

/// Screen pixels per world unit in scene layouts.
pub const PIXELS_PER_UNIT: f64 = 32.0;

/// Convert a layout position given in screen pixels to world units.
pub fn screen_to_world<F: Float>(x: F, y: F) -> Vec2<F> {
    let ppu = F::from_f64(PIXELS_PER_UNIT);
    Vec2::new(x / ppu, y / ppu)
}

/// Options for [`SceneBuilder::create_box`].
#[derive(Clone, Copy, Debug)]
pub struct BoxOptions<F: Float> {
    pub pinned: bool,
    pub kinematic: bool,
    pub is_static: bool,
    pub angle: F,
    pub mass: F,
}

impl<F: Float> Default for BoxOptions<F> {
    fn default() -> Self {
        BoxOptions {
            pinned: false,
            kinematic: false,
            is_static: false,
            angle: F::zero(),
            mass: F::half(),
        }
    }
}

/// Options for [`SceneBuilder::create_bouncy_ball`].
#[derive(Clone, Copy, Debug)]
pub struct BallOptions<F: Float> {
    pub pinned: bool,
    pub kinematic: bool,
    pub radius: F,
    pub mass: F,
    pub segments: usize,
}

impl<F: Float> Default for BallOptions<F> {
    fn default() -> Self {
        BallOptions {
            pinned: false,
            kinematic: false,
            radius: F::one(),
            mass: F::half(),
            segments: 12,
        }
    }
}

/// Adds pre-configured soft bodies to a [`World`].
///
/// Inputs are not validated: a zero size or a single segment produces a
/// degenerate body rather than an error.
pub struct SceneBuilder<'w, F: Float> {
    world: &'w mut World<F>,
    ball_scale: Vec2<F>,
}

impl<'w, F: Float> SceneBuilder<'w, F> {
    pub fn new(world: &'w mut World<F>) -> Self {
        SceneBuilder {
            world,
            ball_scale: Vec2::new(F::from_f64(0.3), F::from_f64(0.24)),
        }
    }

    /// Per-axis scale applied to every ball outline. Default: (0.3, 0.24).
    pub fn with_ball_scale(mut self, scale: Vec2<F>) -> Self {
        self.ball_scale = scale;
        self
    }

    pub fn ball_scale(&self) -> Vec2<F> {
        self.ball_scale
    }

    /// A spring-braced box centred on `position`.
    ///
    /// Pinned boxes get no gravity; static boxes carry infinite mass.
    pub fn create_box(
        &mut self,
        position: Vec2<F>,
        size: Vec2<F>,
        options: BoxOptions<F>,
    ) -> &mut Body<F> {
        let shape = ClosedShape::rectangle(size).rotated(options.angle);

        let mut components = alloc::vec![Component::Spring(SpringComponent::new(
            true,
            F::from_f32(600.0),
            F::from_f32(20.0),
            F::from_f32(100.0),
            F::from_f32(60.0),
        ))];
        if !options.pinned {
            components.push(Component::Gravity(GravityComponent));
        }

        let mass = if options.is_static { F::infinity() } else { options.mass };
        let mut body = Body::new(shape, &[mass], position, options.kinematic, components);
        body.is_pinned = options.pinned;
        body.is_static = options.is_static || body.is_static;

        // Cross braces keep the box from shearing flat.
        let (k, damping) = (F::from_f32(100.0), F::from_f32(10.0));
        body.add_internal_spring(0, 2, k, damping);
        body.add_internal_spring(1, 3, k, damping);

        self.insert(body)
    }

    /// A pressurised, flattened ball centred on `position`.
    pub fn create_bouncy_ball(&mut self, position: Vec2<F>, options: BallOptions<F>) -> &mut Body<F> {
        let shape = ClosedShape::circle(options.radius, options.segments).scaled(self.ball_scale);

        let components = alloc::vec![
            Component::Spring(SpringComponent::new(
                true,
                F::from_f32(600.0),
                F::from_f32(20.0),
                F::from_f32(10.0),
                F::from_f32(20.0),
            )),
            Component::Pressure(PressureComponent::new(F::from_f32(90.0))),
            Component::Gravity(GravityComponent),
        ];

        let mut body = Body::new(shape, &[options.mass], position, options.kinematic, components);
        body.is_pinned = options.pinned;
        self.insert(body)
    }

    /// An immovable polygon with no force components.
    pub fn create_static_polygon(
        &mut self,
        position: Vec2<F>,
        vertices: AllocVec<Vec2<F>>,
    ) -> &mut Body<F> {
        let shape = ClosedShape::from_vertices(vertices);
        let mut body = Body::new(shape, &[F::infinity()], position, false, AllocVec::new());
        body.is_static = true;
        self.insert(body)
    }

    /// Lay out the start scene for a 1024x768 view at 32 pixels per unit:
    /// four balls, a pinned box, a tilted box and a ground platform.
    pub fn populate_demo(&mut self) {
        let f = F::from_f64;
        let base = screen_to_world(f(512.0), f(250.0));

        for i in 2..6 {
            let step = f(i as f64);
            let position = base + Vec2::new(step * f(1.5) - f(4.5), -step * f(1.6));
            let ball = self.create_bouncy_ball(
                position,
                BallOptions {
                    radius: f(1.0) + step * f(0.2),
                    mass: f(0.1) + step * f(0.2),
                    ..BallOptions::default()
                },
            );
            ball.free_rotate = false;
        }

        let pinned = self.create_box(
            screen_to_world(f(512.0), f(384.0)),
            Vec2::splat(f(2.3)),
            BoxOptions { pinned: true, ..BoxOptions::default() },
        );
        // Extra damping so the pinned box settles instead of jiggling.
        pinned.vel_damping = f(0.99);

        let tilted = self.create_box(
            screen_to_world(f(768.0), f(300.0)),
            Vec2::splat(f(3.1)),
            BoxOptions { angle: f(0.5), mass: f(1.0), ..BoxOptions::default() },
        );
        tilted.free_rotate = false;

        // Top edge dips slightly toward the middle.
        self.create_static_polygon(
            screen_to_world(f(512.0), f(640.0)),
            alloc::vec![
                Vec2::new(f(-10.0), f(-1.0)),
                Vec2::new(f(0.0), f(-0.6)),
                Vec2::new(f(10.0), f(-1.0)),
                Vec2::new(f(10.0), f(1.0)),
                Vec2::new(f(-10.0), f(1.0)),
            ],
        );

        tracing::debug!(bodies = self.world.body_count(), "demo scene assembled");
    }

    fn insert(&mut self, body: Body<F>) -> &mut Body<F> {
        let index = self.world.add_body(body);
        &mut self.world.bodies_mut()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_gets_cross_braces() {
        let mut world: World<f64> = World::default();
        let mut scene = SceneBuilder::new(&mut world);
        let body = scene.create_box(
            Vec2::new(1.0, 1.0),
            Vec2::splat(2.0),
            BoxOptions::default(),
        );
        assert_eq!(body.point_count(), 4);
        let springs = match &body.components()[0] {
            Component::Spring(s) => s,
            other => panic!("expected spring component, got {:?}", other),
        };
        assert_eq!(springs.internal_springs().len(), 2);
        assert_eq!(springs.edge_springs().len(), 4);
        assert_eq!(body.components().len(), 2);
    }

    #[test]
    fn pinned_box_has_no_gravity() {
        let mut world: World<f64> = World::default();
        let mut scene = SceneBuilder::new(&mut world);
        let body = scene.create_box(
            Vec2::zero(),
            Vec2::splat(2.0),
            BoxOptions { pinned: true, ..BoxOptions::default() },
        );
        assert!(body.is_pinned);
        assert!(!body.components().iter().any(|c| matches!(c, Component::Gravity(_))));
    }

    #[test]
    fn static_box_is_immovable() {
        let mut world: World<f64> = World::default();
        let mut scene = SceneBuilder::new(&mut world);
        let body = scene.create_box(
            Vec2::zero(),
            Vec2::splat(2.0),
            BoxOptions { is_static: true, ..BoxOptions::default() },
        );
        assert!(body.is_static);
        assert!(body.points().iter().all(|p| p.is_immovable()));
    }

    #[test]
    fn ball_is_flattened() {
        let mut world: World<f64> = World::default();
        let mut scene = SceneBuilder::new(&mut world);
        let body = scene.create_bouncy_ball(Vec2::zero(), BallOptions::default());
        assert_eq!(body.point_count(), 12);
        let max_x = body.base_shape().vertices().iter().map(|v| v.x.abs()).fold(0.0, f64::max);
        let max_y = body.base_shape().vertices().iter().map(|v| v.y.abs()).fold(0.0, f64::max);
        assert!((max_x - 0.3).abs() < 1e-9, "max_x = {}", max_x);
        assert!((max_y - 0.24).abs() < 1e-9, "max_y = {}", max_y);
    }
}
