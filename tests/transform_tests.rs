use jelly_canvas::recording::CanvasCall;
use jelly_canvas::{
    Color, DevicePoint, Dimension, PixelSurface, RecordingCanvas, TransformingSurface,
    WorldPoint,
};

fn transformed(zoom: f64, offset: WorldPoint) -> (TransformingSurface<PixelSurface<RecordingCanvas>>, RecordingCanvas) {
    let canvas = RecordingCanvas::new(Dimension::new(200.0, 100.0), 1.0);
    let surface = TransformingSurface::with_zoom(PixelSurface::new(canvas.clone()), zoom).unwrap();
    surface.handle().set_offset(offset);
    (surface, canvas)
}

#[test]
fn circle_center_and_radius_are_mapped() {
    let (mut surface, canvas) = transformed(2.0, WorldPoint::new(10.0, -5.0));
    surface.draw_circle(WorldPoint::new(3.0, 4.0), 1.0);
    assert_eq!(canvas.arcs(), vec![(DevicePoint::new(26.0, -2.0), 2.0)]);
}

#[test]
fn transform_change_applies_to_next_call_only() {
    let (mut surface, canvas) = transformed(1.0, WorldPoint::ZERO);
    let handle = surface.handle();

    surface.draw_line(WorldPoint::new(1.0, 1.0), WorldPoint::new(2.0, 1.0));
    handle.set_zoom(10.0).unwrap();
    surface.draw_line(WorldPoint::new(1.0, 1.0), WorldPoint::new(2.0, 1.0));

    let paths = canvas.stroked_paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].points, vec![DevicePoint::new(1.0, 1.0), DevicePoint::new(2.0, 1.0)]);
    assert_eq!(paths[1].points, vec![DevicePoint::new(10.0, 10.0), DevicePoint::new(20.0, 10.0)]);
}

#[test]
fn path_points_are_each_mapped() {
    let (mut surface, canvas) = transformed(4.0, WorldPoint::new(1.0, 0.0));
    surface.draw_path(&[WorldPoint::new(0.0, 0.0), WorldPoint::new(1.0, 1.0), WorldPoint::new(0.0, 2.0)]);
    let paths = canvas.stroked_paths();
    assert_eq!(
        paths[0].points,
        vec![DevicePoint::new(4.0, 0.0), DevicePoint::new(8.0, 4.0), DevicePoint::new(4.0, 8.0)]
    );
}

#[test]
fn paint_state_passes_through_untransformed() {
    let (mut surface, canvas) = transformed(3.0, WorldPoint::new(5.0, 5.0));
    surface.update_size();
    surface.clear();
    surface.fill(&Color::WHITE);
    surface.set_stroke(&Color::RED);

    let calls = canvas.calls();
    assert!(calls.contains(&CanvasCall::ClearRect {
        origin: DevicePoint::ZERO,
        size: Dimension::new(200.0, 100.0),
    }));
    assert!(calls.contains(&CanvasCall::FillRect {
        origin: DevicePoint::ZERO,
        size: Dimension::new(200.0, 100.0),
    }));
    assert_eq!(calls.last(), Some(&CanvasCall::StrokeStyle(Color::RED)));
    assert_eq!(surface.inner().canvas().calls(), calls);
}

#[test]
fn gradient_endpoints_are_mapped() {
    let (mut surface, canvas) = transformed(2.0, WorldPoint::ZERO);
    surface.set_stroke_gradient(
        (&Color::RED, WorldPoint::new(1.0, 0.0)),
        (&Color::BLUE, WorldPoint::new(0.0, 3.0)),
    );
    assert_eq!(
        canvas.calls(),
        vec![CanvasCall::StrokeGradient {
            from: DevicePoint::new(2.0, 0.0),
            to: DevicePoint::new(0.0, 6.0),
            start: Color::RED,
            end: Color::BLUE,
        }]
    );
}

#[test]
fn filled_circle_radius_scales_with_zoom() {
    let (mut surface, canvas) = transformed(32.0, WorldPoint::ZERO);
    surface.set_fill(&Color::GREEN);
    surface.draw_fill_circle(WorldPoint::new(1.0, 1.0), 0.1);
    assert_eq!(canvas.arcs(), vec![(DevicePoint::new(32.0, 32.0), 3.2)]);
    assert!(canvas.calls().contains(&CanvasCall::Fill));
}
