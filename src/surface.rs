//! Device-space drawing: the host canvas contract and the surface built on it.

use crate::color::Color;
use crate::point::{DevicePoint, Dimension};
use core::f64::consts::TAU;

/// The host's immediate-mode 2D context and its pixel buffer.
///
/// Mirrors the browser canvas: a backing buffer with a settable size, a
/// client (CSS) size and a device pixel ratio reported by the host. An
/// implementation whose context is unavailable turns every call into a no-op.
pub trait Canvas2d {
    /// Displayed size in CSS pixels, or `None` when the host cannot report it.
    fn client_size(&self) -> Option<Dimension>;
    fn device_pixel_ratio(&self) -> f64;
    fn set_buffer_size(&mut self, size: Dimension);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_fill_style(&mut self, color: &Color);
    fn set_stroke_style(&mut self, color: &Color);
    /// Linear two-stop gradient from `start` at `from` to `end` at `to`.
    fn set_stroke_gradient(&mut self, from: DevicePoint, to: DevicePoint, start: &Color, end: &Color);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
}

/// Drawing primitives in device pixels.
pub trait DrawSurface {
    /// Resize the backing buffer to the host's client size times its
    /// device pixel ratio. Call before drawing after the host resizes.
    fn update_size(&mut self);
    /// Current backing buffer size.
    fn size(&self) -> Dimension;
    /// Erase the whole buffer.
    fn clear(&mut self);
    /// Set the fill color and paint the whole buffer with it.
    fn fill(&mut self, color: &Color);
    /// Set the fill color for subsequent filled shapes.
    fn set_fill(&mut self, color: &Color);
    fn set_stroke(&mut self, color: &Color);
    fn set_stroke_gradient(&mut self, start: (&Color, DevicePoint), end: (&Color, DevicePoint));
    fn draw_circle(&mut self, origin: DevicePoint, radius: f64);
    fn draw_fill_circle(&mut self, origin: DevicePoint, radius: f64);
    fn draw_line(&mut self, from: DevicePoint, to: DevicePoint);
    /// Stroke a polyline. Fewer than two points draws nothing.
    fn draw_path(&mut self, points: &[DevicePoint]);
}

/// A [`DrawSurface`] painting straight onto a host [`Canvas2d`].
pub struct PixelSurface<C: Canvas2d> {
    canvas: C,
    size: Dimension,
    device_pixel_ratio: f64,
}

impl<C: Canvas2d> PixelSurface<C> {
    /// The device pixel ratio is sampled once, here.
    pub fn new(canvas: C) -> Self {
        let device_pixel_ratio = canvas.device_pixel_ratio();
        PixelSurface {
            canvas,
            size: Dimension::ZERO,
            device_pixel_ratio,
        }
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    fn arc_path(&mut self, origin: DevicePoint, radius: f64) {
        self.canvas.begin_path();
        self.canvas.arc(origin.x, origin.y, radius, 0.0, TAU);
    }
}

impl<C: Canvas2d> DrawSurface for PixelSurface<C> {
    fn update_size(&mut self) {
        let Some(client) = self.canvas.client_size() else {
            return;
        };
        let size = client * self.device_pixel_ratio;
        if size != self.size {
            tracing::debug!(width = size.width, height = size.height, "resizing pixel buffer");
        }
        self.size = size;
        self.canvas.set_buffer_size(size);
    }

    fn size(&self) -> Dimension {
        self.size
    }

    fn clear(&mut self) {
        self.canvas.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill(&mut self, color: &Color) {
        self.canvas.set_fill_style(color);
        self.canvas.fill_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn set_fill(&mut self, color: &Color) {
        self.canvas.set_fill_style(color);
    }

    fn set_stroke(&mut self, color: &Color) {
        self.canvas.set_stroke_style(color);
    }

    fn set_stroke_gradient(&mut self, start: (&Color, DevicePoint), end: (&Color, DevicePoint)) {
        self.canvas.set_stroke_gradient(start.1, end.1, start.0, end.0);
    }

    fn draw_circle(&mut self, origin: DevicePoint, radius: f64) {
        self.arc_path(origin, radius);
        self.canvas.stroke();
    }

    fn draw_fill_circle(&mut self, origin: DevicePoint, radius: f64) {
        self.arc_path(origin, radius);
        self.canvas.fill();
        self.canvas.stroke();
    }

    fn draw_line(&mut self, from: DevicePoint, to: DevicePoint) {
        self.canvas.begin_path();
        self.canvas.move_to(from.x, from.y);
        self.canvas.line_to(to.x, to.y);
        self.canvas.stroke();
    }

    fn draw_path(&mut self, points: &[DevicePoint]) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        self.canvas.begin_path();
        self.canvas.move_to(first.x, first.y);
        for p in rest {
            self.canvas.line_to(p.x, p.y);
        }
        self.canvas.stroke();
    }
}
