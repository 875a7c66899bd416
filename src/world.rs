//! The soft-body world: owns every body and advances them together.

use crate::body::Body;
use crate::collision::{self, Contact};
use crate::config::WorldConfig;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use alloc::vec::Vec as AllocVec;

/// A container of soft bodies advanced in fixed increments.
pub struct World<F: Float> {
    bodies: AllocVec<Body<F>>,
    config: WorldConfig<F>,
    contacts: AllocVec<Contact<F>>,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Self {
        World {
            bodies: AllocVec::new(),
            config,
            contacts: AllocVec::new(),
        }
    }

    /// Add a body and return its index. Indices are stable; bodies are never removed.
    pub fn add_body(&mut self, body: Body<F>) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    pub fn step(&mut self, dt: F) {
        self.step_observed(dt, &mut NoOpStepObserver);
    }

    /// Advance every body by `dt`.
    ///
    /// Order: derive frames, accumulate component forces and integrate, once
    /// per integration pass; then resolve penetrations against the
    /// post-integration positions and damp.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        let gravity = self.config.gravity;
        let passes = self.config.integration_steps.max(1);
        let pass_dt = dt / F::from_f32(passes as f32);
        for _ in 0..passes {
            for body in self.bodies.iter_mut() {
                body.derive_frame();
                body.accumulate_forces(gravity);
            }
            observer.on_forces();

            for body in self.bodies.iter_mut() {
                body.integrate(pass_dt);
            }
            observer.on_integrate();
        }
        for body in self.bodies.iter_mut() {
            body.update_aabb();
        }

        self.contacts.clear();
        let n = self.bodies.len();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if (a.is_static && b.is_static) || !a.aabb().intersects(b.aabb()) {
                    continue;
                }
                collision::detect(
                    i,
                    a,
                    j,
                    b,
                    self.config.penetration_threshold,
                    &mut self.contacts,
                );
            }
        }
        collision::resolve(&mut self.bodies, &self.contacts, &self.config);
        observer.on_contacts(self.contacts.len());

        for body in self.bodies.iter_mut() {
            body.dampen_velocity();
        }
        observer.on_step_complete();
    }

    pub fn bodies(&self) -> &[Body<F>] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body<F>] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body<F>> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body<F>> {
        self.bodies.get_mut(index)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    /// Contacts found during the last step.
    pub fn contacts(&self) -> &[Contact<F>] {
        &self.contacts
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        World::new(WorldConfig::new())
    }
}
