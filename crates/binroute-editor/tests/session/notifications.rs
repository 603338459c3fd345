use std::sync::Arc;

use binroute_core::{BinMarker, EditEvent, EventCategory, Point, WaypointKind};
use binroute_editor::{EditSessionController, HostCallbacks, SessionLoad};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct HostLog {
    boundaries: Vec<Vec<Vec<Point>>>,
    starts: Vec<Point>,
    ends: Vec<Point>,
    routes: Vec<(usize, f64)>,
}

fn host(controller: &EditSessionController) -> Arc<Mutex<HostLog>> {
    let log = Arc::new(Mutex::new(HostLog::default()));
    let (b, s, e, r) = (
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
        Arc::clone(&log),
    );
    HostCallbacks::new()
        .on_boundary_change(move |rings| b.lock().boundaries.push(rings))
        .on_start_location_change(move |p| s.lock().starts.push(p))
        .on_end_location_change(move |p| e.lock().ends.push(p))
        .on_route_change(move |points, km| r.lock().routes.push((points.len(), km)))
        .attach(controller.event_bus());
    log
}

#[test]
fn test_each_command_reaches_its_callback_once() {
    let mut controller = EditSessionController::new();
    let log = host(&controller);

    controller
        .set_boundary(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])
        .unwrap();
    controller
        .set_waypoint(WaypointKind::Start, Point::new(0.2, 0.2))
        .unwrap();
    controller
        .set_waypoint(WaypointKind::End, Point::new(0.8, 0.8))
        .unwrap();
    controller
        .set_route(vec![Point::new(0.2, 0.2), Point::new(0.8, 0.8)])
        .unwrap();
    controller.clear_boundary();

    let log = log.lock();
    assert_eq!(log.boundaries.len(), 2);
    assert_eq!(log.boundaries[0].len(), 1);
    assert_eq!(log.boundaries[0][0].len(), 4);
    assert!(log.boundaries[1].is_empty());
    assert_eq!(log.starts, vec![Point::new(0.2, 0.2)]);
    assert_eq!(log.ends, vec![Point::new(0.8, 0.8)]);
    assert_eq!(log.routes.len(), 1);
    assert_eq!(log.routes[0].0, 2);
}

#[test]
fn test_load_and_selection_do_not_reach_host() {
    let mut controller = EditSessionController::new();
    let log = host(&controller);

    controller.load(
        SessionLoad::new()
            .with_start(Point::new(0.5, 0.5))
            .with_bins(vec![BinMarker::new("A", Point::new(0.1, 0.1), 10.0)]),
    );
    controller.select_bin("A");
    controller.clear_selection();

    let log = log.lock();
    assert!(log.boundaries.is_empty());
    assert!(log.starts.is_empty());
    assert!(log.routes.is_empty());
}

#[test]
fn test_rejected_command_does_not_notify() {
    let mut controller = EditSessionController::new();
    let log = host(&controller);

    assert!(controller.set_boundary(&[vec![0.0, 0.0], vec![1.0]]).is_err());
    assert!(log.lock().boundaries.is_empty());
}

#[tokio::test]
async fn test_broadcast_receiver_sees_commands_in_order() {
    let mut controller = EditSessionController::new();
    let mut rx = controller.event_bus().receiver();

    controller
        .set_waypoint(WaypointKind::End, Point::new(1.0, 1.0))
        .unwrap();
    controller.clear_boundary();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.category(), EventCategory::Waypoint);
    assert_eq!(second, EditEvent::BoundaryChanged { boundary: None });
}
