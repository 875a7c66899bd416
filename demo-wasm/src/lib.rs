use gloo::timers::callback::Interval;
use jelly_canvas::scheduler::TickCallback;
use jelly_canvas::{
    Canvas2d, Color, DevicePoint, Dimension, JellyError, LoopConfig, PixelSurface, Scheduler,
    SceneBuilder, SimulationLoop, TickHandle, TransformHandle, World, WorldConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn to_js(err: JellyError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ---- Host canvas ----

/// [`Canvas2d`] over a browser `<canvas>` element.
///
/// Without a 2d context every drawing call is a no-op.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    device_pixel_ratio: f64,
}

impl WebCanvas {
    pub fn new(element: HtmlCanvasElement, device_pixel_ratio: f64) -> Self {
        let context = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        WebCanvas {
            element,
            context,
            device_pixel_ratio,
        }
    }

    /// Attach to the canvas element with the given id in the current document.
    pub fn from_element_id(id: &str) -> Result<Self, JellyError> {
        let window = web_sys::window().ok_or(JellyError::HostUnavailable("window"))?;
        let document = window
            .document()
            .ok_or(JellyError::HostUnavailable("document"))?;
        let element = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(JellyError::HostUnavailable("canvas element"))?;
        let canvas = WebCanvas::new(element, window.device_pixel_ratio());
        if canvas.context.is_none() {
            return Err(JellyError::HostUnavailable("2d context"));
        }
        Ok(canvas)
    }

    fn with_context(&self, draw: impl FnOnce(&CanvasRenderingContext2d)) {
        if let Some(ctx) = &self.context {
            draw(ctx);
        }
    }
}

impl Canvas2d for WebCanvas {
    fn client_size(&self) -> Option<Dimension> {
        Some(Dimension::new(
            self.element.client_width() as f64,
            self.element.client_height() as f64,
        ))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn set_buffer_size(&mut self, size: Dimension) {
        self.element.set_width(size.width as u32);
        self.element.set_height(size.height as u32);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.with_context(|ctx| ctx.clear_rect(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.with_context(|ctx| ctx.fill_rect(x, y, width, height));
    }

    fn set_fill_style(&mut self, color: &Color) {
        self.with_context(|ctx| ctx.set_fill_style_str(color.as_css()));
    }

    fn set_stroke_style(&mut self, color: &Color) {
        self.with_context(|ctx| ctx.set_stroke_style_str(color.as_css()));
    }

    fn set_stroke_gradient(&mut self, from: DevicePoint, to: DevicePoint, start: &Color, end: &Color) {
        self.with_context(|ctx| {
            let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
            gradient.add_color_stop(0.0, start.as_css()).ok();
            gradient.add_color_stop(1.0, end.as_css()).ok();
            ctx.set_stroke_style_canvas_gradient(&gradient);
        });
    }

    fn begin_path(&mut self) {
        self.with_context(|ctx| ctx.begin_path());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.with_context(|ctx| ctx.move_to(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.with_context(|ctx| ctx.line_to(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.with_context(|ctx| {
            ctx.arc(x, y, radius, start_angle, end_angle).ok();
        });
    }

    fn stroke(&mut self) {
        self.with_context(|ctx| ctx.stroke());
    }

    fn fill(&mut self) {
        self.with_context(|ctx| ctx.fill());
    }
}

// ---- Host timer ----

/// [`Scheduler`] backed by `setInterval`.
pub struct IntervalScheduler;

pub struct IntervalHandle(Interval);

impl TickHandle for IntervalHandle {
    fn cancel(self) {
        // Dropping an Interval clears it.
        drop(self.0);
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn schedule(&mut self, interval_ms: u32, callback: TickCallback) -> Option<IntervalHandle> {
        web_sys::window()?;
        Some(IntervalHandle(Interval::new(interval_ms, callback)))
    }
}

// ---- Jello Demo ----

type DemoLoop = SimulationLoop<World<f64>, PixelSurface<WebCanvas>, IntervalScheduler>;

#[wasm_bindgen]
pub struct JellyDemo {
    simulation: DemoLoop,
    view: TransformHandle,
}

#[wasm_bindgen]
impl JellyDemo {
    /// Build the demo scene on the `<canvas>` with id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<JellyDemo, JsValue> {
        init_panic_hook();

        let canvas = WebCanvas::from_element_id(canvas_id).map_err(to_js)?;
        let mut world = World::new(WorldConfig::new());
        SceneBuilder::new(&mut world).populate_demo();
        let body_count = world.body_count() as u32;

        let simulation = SimulationLoop::new(
            world,
            PixelSurface::new(canvas),
            IntervalScheduler,
            LoopConfig::new(),
        )
        .map_err(to_js)?;
        let view = simulation.transform_handle();

        gloo::console::log!("jelly demo ready", canvas_id, body_count);
        Ok(JellyDemo { simulation, view })
    }

    pub fn start(&mut self) {
        self.simulation.start();
        gloo::console::log!("jelly demo running", self.simulation.is_running());
    }

    pub fn stop(&mut self) {
        self.simulation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    /// Zoom by `factor` around the device pixel (`x`, `y`).
    pub fn zoom_at(&self, x: f64, y: f64, factor: f64) -> Result<(), JsValue> {
        self.view.zoom_at(DevicePoint::new(x, y), factor).map_err(to_js)
    }

    /// Pan by a drag of (`dx`, `dy`) device pixels.
    pub fn pan_by(&self, dx: f64, dy: f64) {
        self.view.pan_by(DevicePoint::new(dx, dy));
    }

    pub fn set_zoom(&self, zoom: f64) -> Result<(), JsValue> {
        self.view.set_zoom(zoom).map_err(to_js)
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    pub fn body_count(&self) -> usize {
        self.simulation.world().body_count()
    }
}
