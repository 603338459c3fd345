use std::sync::Arc;

use binroute_core::{BinMarker, EditEvent, EventFilter, GeometryError, Point, WaypointKind};
use binroute_editor::{EditSessionController, SessionLoad, SessionState};
use parking_lot::Mutex;

fn recorded(controller: &EditSessionController) -> Arc<Mutex<Vec<EditEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    controller
        .event_bus()
        .subscribe(EventFilter::All, move |event| sink.lock().push(event.clone()));
    events
}

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
    ]
}

#[test]
fn test_set_then_clear_boundary() {
    let mut controller = EditSessionController::new();
    controller
        .set_boundary(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]])
        .unwrap();

    let snapshot = controller.snapshot();
    let ring = snapshot.boundary.as_ref().unwrap().ring();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
    assert_eq!(&ring[..4], square().as_slice());

    controller.clear_boundary();
    assert!(controller.snapshot().boundary.is_none());
    assert!(controller.dirty().boundary);
}

#[test]
fn test_boundary_from_json_text() {
    let mut controller = EditSessionController::new();
    controller
        .set_boundary_json("[[79.85,6.92],[79.87,6.92],[79.87,6.94],[79.85,6.92]]")
        .unwrap();
    assert_eq!(controller.boundary().unwrap().vertex_count(), 3);

    let err = controller.set_boundary_json("not json").unwrap_err();
    assert!(matches!(err, GeometryError::InvalidGeometry { .. }));
    assert_eq!(controller.boundary().unwrap().vertex_count(), 3);
}

#[test]
fn test_select_bin_is_idempotent() {
    let mut controller = EditSessionController::new();
    controller.load(SessionLoad::new().with_bins(vec![
        BinMarker::new("X", Point::new(0.1, 0.1), 30.0),
        BinMarker::new("Y", Point::new(0.2, 0.2), 60.0),
    ]));
    let events = recorded(&controller);

    assert_eq!(controller.select_bin("X"), Some("X"));
    assert_eq!(controller.select_bin("X"), Some("X"));
    assert_eq!(controller.select_bin("nonexistent"), None);

    let events = events.lock();
    assert_eq!(
        *events,
        vec![
            EditEvent::SelectionChanged {
                bin_id: Some("X".to_string())
            },
            EditEvent::SelectionChanged {
                bin_id: Some("X".to_string())
            },
            EditEvent::SelectionChanged { bin_id: None },
        ]
    );
}

#[test]
fn test_waypoint_outside_boundary_is_accepted() {
    let mut controller = EditSessionController::new();
    controller.load(
        SessionLoad::new()
            .with_boundary(square())
            .with_start(Point::new(0.5, 0.5)),
    );
    let events = recorded(&controller);

    controller
        .set_waypoint(WaypointKind::Start, Point::new(2.0, 2.0))
        .unwrap();

    assert_eq!(
        *events.lock(),
        vec![EditEvent::WaypointChanged {
            which: WaypointKind::Start,
            point: Point::new(2.0, 2.0),
        }]
    );
    assert_eq!(
        controller.waypoint(WaypointKind::Start),
        Some(Point::new(2.0, 2.0))
    );
    assert!(controller.dirty().start);
    assert!(!controller.dirty().boundary);
}

#[test]
fn test_set_route_reports_distance() {
    let mut controller = EditSessionController::new();
    let distance = controller
        .set_route(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();

    assert!((distance - 222.4).abs() < 0.05);
    assert_eq!(controller.route_distance_km(), distance);
    assert!(controller.dirty().route);
}

#[test]
fn test_rejected_route_publishes_nothing() {
    let mut controller = EditSessionController::new();
    let events = recorded(&controller);

    let result = controller.set_route(vec![Point::new(0.0, 0.0), Point::new(f64::INFINITY, 1.0)]);
    assert!(result.is_err());
    assert!(controller.route().is_none());
    assert!(events.lock().is_empty());
}

#[test]
fn test_load_replaces_everything() {
    let mut controller = EditSessionController::new();
    controller.load(
        SessionLoad::new()
            .with_boundary(square())
            .with_start(Point::new(0.5, 0.5))
            .with_end(Point::new(0.9, 0.9))
            .with_route(vec![Point::new(0.5, 0.5), Point::new(0.9, 0.9)]),
    );
    controller
        .set_waypoint(WaypointKind::End, Point::new(0.8, 0.8))
        .unwrap();
    assert!(controller.is_dirty());
    assert_eq!(controller.state(), SessionState::Loaded);

    controller.load(SessionLoad::new().with_start(Point::new(0.1, 0.1)));

    let snapshot = controller.snapshot();
    assert!(snapshot.boundary.is_none());
    assert!(snapshot.end.is_none());
    assert!(snapshot.route.is_none());
    assert_eq!(snapshot.start, Some(Point::new(0.1, 0.1)));
    assert!(!controller.is_dirty());
}

#[test]
fn test_load_from_host_json() {
    let json = r#"{
        "initialBoundary": [[[79.85,6.92],[79.87,6.92],[79.87,6.94]]],
        "initialEndLocation": [79.86, 6.93],
        "routePolyline": [[79.8612,6.9271],[79.8712,6.9371]],
        "routeBins": [
            {"id": "B-7", "location": [79.865, 6.93], "displayFillLevel": 72.5, "address": "Galle Rd"}
        ]
    }"#;
    let load: SessionLoad = serde_json::from_str(json).unwrap();

    let mut controller = EditSessionController::new();
    controller.load(load);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.boundary.as_ref().unwrap().ring().len(), 4);
    assert_eq!(snapshot.end, Some(Point::new(79.86, 6.93)));
    assert_eq!(controller.route_distance_km(), 1.57);
    assert_eq!(snapshot.bins[0].address.as_deref(), Some("Galle Rd"));
}
