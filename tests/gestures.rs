use sticky_board::board::gesture::{
    GestureCommit, GestureController, GesturePreview, GestureState, PointerTarget,
};
use sticky_board::board::note::Note;
use sticky_board::board::{Point, ViewportTransform};

fn note_at(x: f64, y: f64) -> Note {
    serde_json::from_value(serde_json::json!({
        "id": 7,
        "content": "drag me",
        "x": x,
        "y": y,
        "width": 250.0,
        "height": 200.0,
        "z_index": 1,
    }))
    .unwrap()
}

#[test]
fn drag_distance_is_divided_by_scale() {
    let viewport = ViewportTransform::new(Point::default(), Point::default(), 2.0);
    let note = note_at(10.0, 20.0);
    let mut gestures = GestureController::default();
    assert!(gestures.pointer_down(
        PointerTarget::DragHandle(7),
        Point::new(100.0, 100.0),
        Some(&note),
        &viewport,
    ));

    let commit = gestures.pointer_up(Point::new(150.0, 100.0), &viewport);
    assert_eq!(
        commit,
        Some(GestureCommit::Move {
            id: 7,
            x: 35.0,
            y: 20.0
        })
    );
    assert_eq!(gestures.state(), GestureState::Idle);
}

#[test]
fn only_one_gesture_at_a_time() {
    let mut viewport = ViewportTransform::default();
    let note = note_at(0.0, 0.0);
    let mut gestures = GestureController::default();
    assert!(gestures.pointer_down(PointerTarget::Background, Point::new(5.0, 5.0), None, &viewport));
    assert!(!gestures.pointer_down(
        PointerTarget::ResizeHandle(7),
        Point::new(240.0, 190.0),
        Some(&note),
        &viewport,
    ));
    assert!(matches!(gestures.state(), GestureState::Panning { .. }));

    assert_eq!(gestures.pointer_move(Point::new(25.0, 0.0), &mut viewport), None);
    assert_eq!(viewport.pan, Point::new(20.0, -5.0));
    assert_eq!(gestures.pointer_up(Point::new(25.0, 0.0), &viewport), None);
}

#[test]
fn resize_preview_follows_pointer_at_scale() {
    let mut viewport = ViewportTransform::new(Point::default(), Point::default(), 0.5);
    let note = note_at(0.0, 0.0);
    let mut gestures = GestureController::default();
    gestures.pointer_down(
        PointerTarget::ResizeHandle(7),
        Point::new(120.0, 95.0),
        Some(&note),
        &viewport,
    );
    let preview = gestures.pointer_move(Point::new(145.0, 105.0), &mut viewport);
    assert_eq!(
        preview,
        Some(GesturePreview::Size {
            id: 7,
            width: 300.0,
            height: 220.0
        })
    );
}

#[test]
fn body_press_starts_nothing() {
    let viewport = ViewportTransform::default();
    let note = note_at(0.0, 0.0);
    let mut gestures = GestureController::default();
    assert!(!gestures.pointer_down(
        PointerTarget::NoteBody(7),
        Point::new(50.0, 80.0),
        Some(&note),
        &viewport,
    ));
    assert!(gestures.is_idle());
}

#[test]
fn screen_canvas_round_trip_at_any_zoom() {
    for scale in [0.25, 0.6, 1.0, 1.75, 3.0] {
        let viewport =
            ViewportTransform::new(Point::new(30.0, 40.0), Point::new(-120.5, 88.0), scale);
        let p = Point::new(333.0, -71.25);
        let back = viewport.to_screen(viewport.to_canvas(p));
        assert!((back.x - p.x).abs() < 1e-9, "scale {scale}");
        assert!((back.y - p.y).abs() < 1e-9, "scale {scale}");
    }
}

#[test]
fn scale_is_clamped() {
    let mut viewport = ViewportTransform::default();
    for _ in 0..50 {
        viewport.zoom_wheel(-1.0, Point::new(10.0, 10.0));
    }
    assert_eq!(viewport.scale(), 3.0);
    for _ in 0..50 {
        viewport.zoom_wheel(1.0, Point::new(10.0, 10.0));
    }
    assert_eq!(viewport.scale(), 0.25);
}
