use jelly_canvas::recording::CanvasCall;
use jelly_canvas::{Color, DevicePoint, Dimension, DrawSurface, PixelSurface, RecordingCanvas};

fn surface(width: f64, height: f64, dpr: f64) -> (PixelSurface<RecordingCanvas>, RecordingCanvas) {
    let canvas = RecordingCanvas::new(Dimension::new(width, height), dpr);
    (PixelSurface::new(canvas.clone()), canvas)
}

#[test]
fn empty_and_single_point_paths_draw_nothing() {
    let (mut surface, canvas) = surface(100.0, 100.0, 1.0);
    surface.draw_path(&[]);
    surface.draw_path(&[DevicePoint::new(5.0, 5.0)]);
    assert!(canvas.calls().is_empty(), "unexpected calls: {:?}", canvas.calls());
}

#[test]
fn buffer_follows_client_size_times_pixel_ratio() {
    let (mut surface, canvas) = surface(800.0, 600.0, 2.0);
    surface.update_size();
    assert_eq!(canvas.buffer_size().width, 1600.0);

    canvas.set_client_size(Dimension::new(400.0, 300.0));
    surface.update_size();
    assert_eq!(surface.size(), Dimension::new(800.0, 600.0));
    assert_eq!(canvas.buffer_size(), Dimension::new(800.0, 600.0));
}

#[test]
fn pixel_ratio_is_sampled_once() {
    let (surface, _canvas) = surface(10.0, 10.0, 1.5);
    assert_eq!(surface.device_pixel_ratio(), 1.5);
}

#[test]
fn clear_covers_the_whole_buffer() {
    let (mut surface, canvas) = surface(30.0, 20.0, 1.0);
    surface.update_size();
    canvas.clear_calls();
    surface.clear();
    assert_eq!(
        canvas.calls(),
        vec![CanvasCall::ClearRect { origin: DevicePoint::ZERO, size: Dimension::new(30.0, 20.0) }]
    );
}

#[test]
fn path_is_one_stroked_polyline() {
    let (mut surface, canvas) = surface(100.0, 100.0, 1.0);
    let points = [DevicePoint::new(0.0, 0.0), DevicePoint::new(10.0, 0.0), DevicePoint::new(10.0, 10.0)];
    surface.set_stroke(&Color::BLUE);
    surface.draw_path(&points);

    assert_eq!(
        canvas.calls(),
        vec![
            CanvasCall::StrokeStyle(Color::BLUE),
            CanvasCall::BeginPath,
            CanvasCall::MoveTo(points[0]),
            CanvasCall::LineTo(points[1]),
            CanvasCall::LineTo(points[2]),
            CanvasCall::Stroke,
        ]
    );
    let paths = canvas.stroked_paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].style, Some(Color::BLUE));
}

#[test]
fn circles_are_full_arcs() {
    let (mut surface, canvas) = surface(100.0, 100.0, 1.0);
    surface.draw_circle(DevicePoint::new(50.0, 40.0), 7.0);
    assert_eq!(
        canvas.calls(),
        vec![
            CanvasCall::BeginPath,
            CanvasCall::Arc { center: DevicePoint::new(50.0, 40.0), radius: 7.0 },
            CanvasCall::Stroke,
        ]
    );
}

#[test]
fn line_is_two_point_stroke() {
    let (mut surface, canvas) = surface(100.0, 100.0, 1.0);
    surface.draw_line(DevicePoint::new(1.0, 2.0), DevicePoint::new(3.0, 4.0));
    let paths = canvas.stroked_paths();
    assert_eq!(paths[0].points, vec![DevicePoint::new(1.0, 2.0), DevicePoint::new(3.0, 4.0)]);
    assert_eq!(paths[0].style, None);
}
