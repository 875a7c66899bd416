//! World-to-device mapping and the surface that applies it.
//!
//! Every transformed draw call reads the transform when it is issued, so a
//! pan or zoom made between two calls affects the second one and nothing
//! drawn before it.

use crate::color::Color;
use crate::error::JellyError;
use crate::point::{DevicePoint, Dimension, WorldPoint};
use crate::surface::DrawSurface;
use alloc::rc::Rc;
use alloc::vec::Vec as AllocVec;
use core::cell::Cell;

/// Uniform zoom plus a world-space offset: `device = (world + offset) * zoom`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub zoom: f64,
    pub offset: WorldPoint,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { zoom: 1.0, offset: WorldPoint::ZERO };

    pub fn to_device(&self, p: WorldPoint) -> DevicePoint {
        let scaled = (p + self.offset) * self.zoom;
        DevicePoint::new(scaled.x, scaled.y)
    }

    pub fn to_world(&self, p: DevicePoint) -> WorldPoint {
        WorldPoint::new(p.x / self.zoom, p.y / self.zoom) - self.offset
    }

    pub fn scale_radius(&self, radius: f64) -> f64 {
        radius * self.zoom
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

fn validate_zoom(zoom: f64) -> Result<f64, JellyError> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(zoom)
    } else {
        Err(JellyError::InvalidZoom(zoom))
    }
}

/// Shared, live access to a [`TransformingSurface`]'s transform.
///
/// Cloned into input handlers; changes are visible to the next draw call.
#[derive(Clone, Debug)]
pub struct TransformHandle {
    state: Rc<Cell<Transform>>,
}

impl TransformHandle {
    pub fn get(&self) -> Transform {
        self.state.get()
    }

    pub fn zoom(&self) -> f64 {
        self.state.get().zoom
    }

    pub fn offset(&self) -> WorldPoint {
        self.state.get().offset
    }

    pub fn set_zoom(&self, zoom: f64) -> Result<(), JellyError> {
        let zoom = validate_zoom(zoom)?;
        let mut t = self.state.get();
        t.zoom = zoom;
        self.state.set(t);
        Ok(())
    }

    pub fn set_offset(&self, offset: WorldPoint) {
        let mut t = self.state.get();
        t.offset = offset;
        self.state.set(t);
    }

    /// Move the view by a drag of `delta` device pixels.
    pub fn pan_by(&self, delta: DevicePoint) {
        let mut t = self.state.get();
        t.offset = t.offset + WorldPoint::new(delta.x, delta.y) / t.zoom;
        self.state.set(t);
    }

    /// Multiply the zoom by `factor`, keeping the world point under
    /// `anchor` where it is on screen.
    pub fn zoom_at(&self, anchor: DevicePoint, factor: f64) -> Result<(), JellyError> {
        let t = self.state.get();
        let new_zoom = validate_zoom(t.zoom * factor)?;
        let pinned = t.to_world(anchor);
        let offset = WorldPoint::new(anchor.x / new_zoom, anchor.y / new_zoom) - pinned;
        self.state.set(Transform { zoom: new_zoom, offset });
        Ok(())
    }

    pub fn to_world(&self, p: DevicePoint) -> WorldPoint {
        self.state.get().to_world(p)
    }
}

/// Wraps a device-space [`DrawSurface`] and draws in world coordinates.
pub struct TransformingSurface<S: DrawSurface> {
    inner: S,
    transform: Rc<Cell<Transform>>,
}

impl<S: DrawSurface> TransformingSurface<S> {
    pub fn new(inner: S) -> Self {
        TransformingSurface {
            inner,
            transform: Rc::new(Cell::new(Transform::IDENTITY)),
        }
    }

    pub fn with_zoom(inner: S, zoom: f64) -> Result<Self, JellyError> {
        let surface = TransformingSurface::new(inner);
        surface.handle().set_zoom(zoom)?;
        Ok(surface)
    }

    pub fn handle(&self) -> TransformHandle {
        TransformHandle {
            state: Rc::clone(&self.transform),
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform.get()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn update_size(&mut self) {
        self.inner.update_size();
    }

    pub fn size(&self) -> Dimension {
        self.inner.size()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn fill(&mut self, color: &Color) {
        self.inner.fill(color);
    }

    pub fn set_fill(&mut self, color: &Color) {
        self.inner.set_fill(color);
    }

    pub fn set_stroke(&mut self, color: &Color) {
        self.inner.set_stroke(color);
    }

    pub fn set_stroke_gradient(&mut self, start: (&Color, WorldPoint), end: (&Color, WorldPoint)) {
        let t = self.transform.get();
        self.inner
            .set_stroke_gradient((start.0, t.to_device(start.1)), (end.0, t.to_device(end.1)));
    }

    pub fn draw_circle(&mut self, origin: WorldPoint, radius: f64) {
        let t = self.transform.get();
        self.inner.draw_circle(t.to_device(origin), t.scale_radius(radius));
    }

    pub fn draw_fill_circle(&mut self, origin: WorldPoint, radius: f64) {
        let t = self.transform.get();
        self.inner.draw_fill_circle(t.to_device(origin), t.scale_radius(radius));
    }

    pub fn draw_line(&mut self, from: WorldPoint, to: WorldPoint) {
        let t = self.transform.get();
        self.inner.draw_line(t.to_device(from), t.to_device(to));
    }

    pub fn draw_path(&mut self, points: &[WorldPoint]) {
        let t = self.transform.get();
        let device: AllocVec<DevicePoint> = points.iter().map(|p| t.to_device(*p)).collect();
        self.inner.draw_path(&device);
    }
}
