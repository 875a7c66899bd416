use jelly_canvas::recording::CanvasCall;
use jelly_canvas::scheduler::TickCallback;
use jelly_canvas::{
    BodyView, Color, DevicePoint, Dimension, LoopConfig, ManualScheduler, PhysicsWorld,
    PixelSurface, RecordingCanvas, Scheduler, SimulationLoop, TickHandle, WorldPoint,
};

struct FakeBody(Vec<WorldPoint>);

impl BodyView for FakeBody {
    fn vertices(&self) -> Vec<WorldPoint> {
        self.0.clone()
    }
}

#[derive(Default)]
struct FakeWorld {
    bodies: Vec<FakeBody>,
    steps: Vec<f64>,
}

impl PhysicsWorld for FakeWorld {
    type Body = FakeBody;

    fn bodies(&self) -> &[FakeBody] {
        &self.bodies
    }

    fn step(&mut self, dt: f64) {
        self.steps.push(dt);
    }
}

fn triangle() -> Vec<WorldPoint> {
    vec![WorldPoint::new(1.0, 1.0), WorldPoint::new(3.0, 1.0), WorldPoint::new(2.0, 2.0)]
}

type TestLoop = SimulationLoop<FakeWorld, PixelSurface<RecordingCanvas>, ManualScheduler>;

fn simulation(world: FakeWorld) -> (TestLoop, RecordingCanvas, ManualScheduler) {
    let canvas = RecordingCanvas::new(Dimension::new(800.0, 600.0), 1.0);
    let scheduler = ManualScheduler::new();
    let sim = SimulationLoop::new(
        world,
        PixelSurface::new(canvas.clone()),
        scheduler.clone(),
        LoopConfig::new(),
    )
    .unwrap();
    (sim, canvas, scheduler)
}

#[test]
fn one_tick_runs_five_steps_of_a_hundredth() {
    let (mut sim, _canvas, scheduler) = simulation(FakeWorld::default());
    sim.start();
    assert_eq!(scheduler.intervals(), vec![10]);
    assert_eq!(scheduler.fire(), 1);

    let world = sim.world();
    assert_eq!(world.steps.len(), 5);
    for dt in &world.steps {
        assert!((dt - 0.01).abs() < 1e-15, "unexpected timestep {}", dt);
    }
}

#[test]
fn stop_is_idempotent_and_ends_ticking() {
    let (mut sim, _canvas, scheduler) = simulation(FakeWorld::default());
    sim.stop();
    sim.start();
    scheduler.fire_n(2);
    sim.stop();
    sim.stop();

    assert!(!sim.is_running());
    assert_eq!(scheduler.fire_n(3), 0);
    assert_eq!(sim.ticks(), 2);
    assert_eq!(sim.world().steps.len(), 10);
}

#[test]
fn triangle_outline_is_closed_and_zoomed() {
    let world = FakeWorld { bodies: vec![FakeBody(triangle())], ..FakeWorld::default() };
    let (sim, canvas, _scheduler) = simulation(world);
    sim.tick();

    let paths = canvas.stroked_paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].points,
        vec![
            DevicePoint::new(32.0, 32.0),
            DevicePoint::new(96.0, 32.0),
            DevicePoint::new(64.0, 64.0),
            DevicePoint::new(32.0, 32.0),
        ]
    );
}

#[test]
fn markers_drawn_once_per_vertex_scaled_by_zoom() {
    let world = FakeWorld { bodies: vec![FakeBody(triangle())], ..FakeWorld::default() };
    let (sim, canvas, _scheduler) = simulation(world);
    sim.tick();

    let arcs = canvas.arcs();
    assert_eq!(arcs.len(), 3);
    assert!(arcs.iter().all(|(_, r)| *r == 3.2), "radii: {:?}", arcs);
    assert_eq!(arcs[1].0, DevicePoint::new(96.0, 32.0));
}

#[test]
fn stroke_color_cycles_by_body_index() {
    let bodies = (0..8).map(|_| FakeBody(triangle())).collect();
    let (sim, canvas, _scheduler) = simulation(FakeWorld { bodies, ..FakeWorld::default() });
    sim.tick();

    let paths = canvas.stroked_paths();
    assert_eq!(paths.len(), 8);
    let config = LoopConfig::new();
    assert_eq!(paths[7].style.as_ref(), Some(&config.palette()[1]));
    assert_eq!(paths[0].style, Some(Color::BLUE));
    assert_eq!(canvas.calls().last(), Some(&CanvasCall::StrokeStyle(Color::BLACK)));
}

#[test]
fn tick_resizes_then_clears_and_paints_background() {
    let (sim, canvas, _scheduler) = simulation(FakeWorld::default());
    sim.tick();
    assert_eq!(
        canvas.calls(),
        vec![
            CanvasCall::Resize(Dimension::new(800.0, 600.0)),
            CanvasCall::ClearRect { origin: DevicePoint::ZERO, size: Dimension::new(800.0, 600.0) },
            CanvasCall::FillStyle(Color::WHITE),
            CanvasCall::FillRect { origin: DevicePoint::ZERO, size: Dimension::new(800.0, 600.0) },
        ]
    );
}

#[test]
fn start_paints_start_fill_and_ignores_second_start() {
    let (mut sim, canvas, scheduler) = simulation(FakeWorld::default());
    sim.start();
    sim.start();

    assert!(sim.is_running());
    assert_eq!(scheduler.active(), 1);
    assert_eq!(canvas.calls()[0], CanvasCall::FillStyle(Color::BLACK));
    let start_fills = canvas
        .calls()
        .iter()
        .filter(|c| **c == CanvasCall::FillStyle(Color::BLACK))
        .count();
    assert_eq!(start_fills, 1);
}

#[test]
fn pan_applies_to_following_ticks() {
    let world = FakeWorld { bodies: vec![FakeBody(triangle())], ..FakeWorld::default() };
    let (sim, canvas, _scheduler) = simulation(world);
    let view = sim.transform_handle();
    assert_eq!(view.zoom(), 32.0);

    view.pan_by(DevicePoint::new(32.0, 0.0));
    sim.tick();
    assert_eq!(canvas.stroked_paths()[0].points[0], DevicePoint::new(64.0, 32.0));
}

#[test]
fn dropping_the_loop_cancels_the_timer() {
    let (mut sim, _canvas, scheduler) = simulation(FakeWorld::default());
    sim.start();
    assert_eq!(scheduler.active(), 1);
    drop(sim);
    assert_eq!(scheduler.active(), 0);
    assert_eq!(scheduler.fire(), 0);
}

struct NoTimer;
struct NoHandle;

impl TickHandle for NoHandle {
    fn cancel(self) {}
}

impl Scheduler for NoTimer {
    type Handle = NoHandle;

    fn schedule(&mut self, _interval_ms: u32, _callback: TickCallback) -> Option<NoHandle> {
        None
    }
}

#[test]
fn missing_timer_schedules_nothing() {
    let canvas = RecordingCanvas::new(Dimension::new(10.0, 10.0), 1.0);
    let mut sim = SimulationLoop::new(
        FakeWorld::default(),
        PixelSurface::new(canvas),
        NoTimer,
        LoopConfig::new(),
    )
    .unwrap();
    sim.start();
    assert!(!sim.is_running());
    assert_eq!(sim.ticks(), 0);
    sim.stop();
}

#[test]
fn invalid_initial_zoom_is_rejected() {
    let mut config = LoopConfig::new();
    config.initial_zoom = -1.0;
    let canvas = RecordingCanvas::new(Dimension::new(10.0, 10.0), 1.0);
    let result = SimulationLoop::new(FakeWorld::default(), PixelSurface::new(canvas), ManualScheduler::new(), config);
    assert!(result.is_err());
}
