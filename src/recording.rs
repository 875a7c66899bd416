//! A headless [`Canvas2d`] that records every call.
//!
//! Clones share the same log, so a test can hand one clone to a surface and
//! inspect the other after the surface has been moved into a loop.

use crate::color::Color;
use crate::point::{DevicePoint, Dimension};
use crate::surface::Canvas2d;
use alloc::rc::Rc;
use alloc::vec::Vec as AllocVec;
use core::cell::RefCell;

/// One recorded canvas operation.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCall {
    Resize(Dimension),
    ClearRect { origin: DevicePoint, size: Dimension },
    FillRect { origin: DevicePoint, size: Dimension },
    FillStyle(Color),
    StrokeStyle(Color),
    StrokeGradient { from: DevicePoint, to: DevicePoint, start: Color, end: Color },
    BeginPath,
    MoveTo(DevicePoint),
    LineTo(DevicePoint),
    Arc { center: DevicePoint, radius: f64 },
    Stroke,
    Fill,
}

/// A polyline that reached `stroke`, with the stroke color active at the time.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokedPath {
    pub style: Option<Color>,
    pub points: AllocVec<DevicePoint>,
}

#[derive(Debug, Default)]
struct Recording {
    client_size: Option<Dimension>,
    device_pixel_ratio: f64,
    buffer_size: Dimension,
    calls: AllocVec<CanvasCall>,
}

#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingCanvas {
    pub fn new(client_size: Dimension, device_pixel_ratio: f64) -> Self {
        RecordingCanvas {
            inner: Rc::new(RefCell::new(Recording {
                client_size: Some(client_size),
                device_pixel_ratio,
                ..Recording::default()
            })),
        }
    }

    /// A canvas whose host cannot report a client size.
    pub fn detached(device_pixel_ratio: f64) -> Self {
        RecordingCanvas {
            inner: Rc::new(RefCell::new(Recording {
                device_pixel_ratio,
                ..Recording::default()
            })),
        }
    }

    /// Simulate the host element being resized.
    pub fn set_client_size(&self, size: Dimension) {
        self.inner.borrow_mut().client_size = Some(size);
    }

    pub fn buffer_size(&self) -> Dimension {
        self.inner.borrow().buffer_size
    }

    pub fn calls(&self) -> AllocVec<CanvasCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Every arc drawn, as (center, radius).
    pub fn arcs(&self) -> AllocVec<(DevicePoint, f64)> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                CanvasCall::Arc { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Every move_to/line_to polyline that was stroked, in order.
    pub fn stroked_paths(&self) -> AllocVec<StrokedPath> {
        let recording = self.inner.borrow();
        let mut paths = AllocVec::new();
        let mut current = AllocVec::new();
        let mut style = None;
        for call in &recording.calls {
            match call {
                CanvasCall::StrokeStyle(color) => style = Some(color.clone()),
                CanvasCall::BeginPath | CanvasCall::Arc { .. } => current.clear(),
                CanvasCall::MoveTo(p) | CanvasCall::LineTo(p) => current.push(*p),
                CanvasCall::Stroke if !current.is_empty() => paths.push(StrokedPath {
                    style: style.clone(),
                    points: core::mem::take(&mut current),
                }),
                _ => {}
            }
        }
        paths
    }

    fn record(&self, call: CanvasCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl Canvas2d for RecordingCanvas {
    fn client_size(&self) -> Option<Dimension> {
        self.inner.borrow().client_size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.inner.borrow().device_pixel_ratio
    }

    fn set_buffer_size(&mut self, size: Dimension) {
        self.inner.borrow_mut().buffer_size = size;
        self.record(CanvasCall::Resize(size));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(CanvasCall::ClearRect {
            origin: DevicePoint::new(x, y),
            size: Dimension::new(width, height),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(CanvasCall::FillRect {
            origin: DevicePoint::new(x, y),
            size: Dimension::new(width, height),
        });
    }

    fn set_fill_style(&mut self, color: &Color) {
        self.record(CanvasCall::FillStyle(color.clone()));
    }

    fn set_stroke_style(&mut self, color: &Color) {
        self.record(CanvasCall::StrokeStyle(color.clone()));
    }

    fn set_stroke_gradient(&mut self, from: DevicePoint, to: DevicePoint, start: &Color, end: &Color) {
        self.record(CanvasCall::StrokeGradient {
            from,
            to,
            start: start.clone(),
            end: end.clone(),
        });
    }

    fn begin_path(&mut self) {
        self.record(CanvasCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(CanvasCall::MoveTo(DevicePoint::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(CanvasCall::LineTo(DevicePoint::new(x, y)));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start_angle: f64, _end_angle: f64) {
        self.record(CanvasCall::Arc {
            center: DevicePoint::new(x, y),
            radius,
        });
    }

    fn stroke(&mut self) {
        self.record(CanvasCall::Stroke);
    }

    fn fill(&mut self) {
        self.record(CanvasCall::Fill);
    }
}
