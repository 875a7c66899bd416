//! The periodic step-and-render loop.

use crate::body::Body;
use crate::config::LoopConfig;
use crate::error::JellyError;
use crate::float::Float;
use crate::point::WorldPoint;
use crate::scheduler::{Scheduler, TickHandle};
use crate::surface::DrawSurface;
use crate::transform::{TransformHandle, TransformingSurface};
use crate::world::World;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec as AllocVec;
use core::cell::{Ref, RefCell, RefMut};

/// Read access to one body's outline.
pub trait BodyView {
    /// Current vertices in order. The outline closes from the last back to
    /// the first.
    fn vertices(&self) -> AllocVec<WorldPoint>;
}

/// The physics the loop drives: a list of bodies and a fixed-step advance.
pub trait PhysicsWorld {
    type Body: BodyView;

    fn bodies(&self) -> &[Self::Body];
    fn step(&mut self, dt: f64);
}

impl<F: Float> BodyView for Body<F> {
    fn vertices(&self) -> AllocVec<WorldPoint> {
        self.points().iter().map(|p| WorldPoint::from(p.position)).collect()
    }
}

impl<F: Float> PhysicsWorld for World<F> {
    type Body = Body<F>;

    fn bodies(&self) -> &[Body<F>] {
        World::bodies(self)
    }

    fn step(&mut self, dt: f64) {
        World::step(self, F::from_f64(dt));
    }
}

/// `vertices` followed by its first vertex. Empty input stays empty.
pub fn closed_outline(vertices: &[WorldPoint]) -> AllocVec<WorldPoint> {
    let mut outline = AllocVec::with_capacity(vertices.len() + 1);
    outline.extend_from_slice(vertices);
    if let Some(first) = vertices.first() {
        outline.push(*first);
    }
    outline
}

struct Frame<W, S: DrawSurface> {
    world: W,
    surface: TransformingSurface<S>,
    config: LoopConfig,
    ticks: u64,
}

impl<W: PhysicsWorld, S: DrawSurface> Frame<W, S> {
    fn tick(&mut self) {
        self.surface.update_size();

        let dt = self.config.timestep();
        for _ in 0..self.config.sub_steps {
            self.world.step(dt);
        }

        self.surface.clear();
        self.surface.fill(&self.config.background);

        for (index, body) in self.world.bodies().iter().enumerate() {
            let vertices = body.vertices();
            self.surface.set_stroke(self.config.stroke_for(index));
            self.surface.draw_path(&closed_outline(&vertices));
            for vertex in &vertices {
                self.surface.draw_circle(*vertex, self.config.marker_radius);
            }
            self.surface.set_stroke(&self.config.default_stroke);
        }

        self.ticks += 1;
        tracing::trace!(tick = self.ticks, bodies = self.world.bodies().len(), "frame drawn");
    }
}

/// Steps a [`PhysicsWorld`] and redraws it on every scheduler tick.
///
/// The loop owns the world and the surface. Dropping it stops the timer.
pub struct SimulationLoop<W: PhysicsWorld + 'static, S: DrawSurface + 'static, T: Scheduler> {
    frame: Rc<RefCell<Frame<W, S>>>,
    scheduler: T,
    handle: Option<T::Handle>,
}

impl<W: PhysicsWorld + 'static, S: DrawSurface + 'static, T: Scheduler> SimulationLoop<W, S, T> {
    /// Wrap `surface` in a [`TransformingSurface`] zoomed to
    /// `config.initial_zoom`. The loop starts stopped.
    pub fn new(world: W, surface: S, scheduler: T, config: LoopConfig) -> Result<Self, JellyError> {
        let surface = TransformingSurface::with_zoom(surface, config.initial_zoom)?;
        Ok(SimulationLoop {
            frame: Rc::new(RefCell::new(Frame {
                world,
                surface,
                config,
                ticks: 0,
            })),
            scheduler,
            handle: None,
        })
    }

    /// Live pan/zoom control for input handlers.
    pub fn transform_handle(&self) -> TransformHandle {
        self.frame.borrow().surface.handle()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Paint the start fill and begin ticking.
    ///
    /// Starting a running loop does nothing. When the scheduler cannot
    /// schedule, the loop stays stopped.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            tracing::warn!("start called on a running simulation");
            return;
        }

        let interval_ms = {
            let mut frame = self.frame.borrow_mut();
            let Frame { surface, config, .. } = &mut *frame;
            surface.fill(&config.start_fill);
            config.iteration_interval_ms()
        };

        let weak = Rc::downgrade(&self.frame);
        let callback = Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            // A tick never re-enters itself; skip if the frame is already borrowed.
            let Ok(mut frame) = state.try_borrow_mut() else {
                return;
            };
            frame.tick();
        });

        match self.scheduler.schedule(interval_ms, callback) {
            Some(handle) => {
                self.handle = Some(handle);
                tracing::debug!(interval_ms, "simulation started");
            }
            None => tracing::warn!("no timer available; simulation not started"),
        }
    }

    /// Stop ticking. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            tracing::debug!(ticks = self.ticks(), "simulation stopped");
        }
    }

    /// Run one tick now, outside the scheduler.
    pub fn tick(&self) {
        self.frame.borrow_mut().tick();
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.frame.borrow().ticks
    }

    pub fn world(&self) -> Ref<'_, W> {
        Ref::map(self.frame.borrow(), |f| &f.world)
    }

    pub fn world_mut(&self) -> RefMut<'_, W> {
        RefMut::map(self.frame.borrow_mut(), |f| &mut f.world)
    }

    pub fn surface(&self) -> Ref<'_, TransformingSurface<S>> {
        Ref::map(self.frame.borrow(), |f| &f.surface)
    }

    pub fn config(&self) -> Ref<'_, LoopConfig> {
        Ref::map(self.frame.borrow(), |f| &f.config)
    }
}

impl<W: PhysicsWorld + 'static, S: DrawSurface + 'static, T: Scheduler> Drop for SimulationLoop<W, S, T> {
    fn drop(&mut self) {
        self.stop();
    }
}
