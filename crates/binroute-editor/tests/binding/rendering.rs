use binroute_core::{BinMarker, Point, WaypointKind};
use binroute_editor::{
    EditSessionController, LatLng, LayerKind, MapBinding, MarkerRole, RecordingSurface,
    SessionLoad,
};
use binroute_settings::EditorConfig;

fn ready_binding() -> MapBinding<RecordingSurface> {
    let mut binding = MapBinding::new(EditSessionController::new(), EditorConfig::default());
    binding.attach(RecordingSurface::new()).unwrap();
    binding
}

fn bins() -> Vec<BinMarker> {
    vec![
        BinMarker::new("low", Point::new(79.861, 6.927), 10.0),
        BinMarker::new("high", Point::new(79.862, 6.928), 95.0),
    ]
}

fn full_load() -> SessionLoad {
    SessionLoad::new()
        .with_boundary(vec![
            Point::new(79.85, 6.92),
            Point::new(79.87, 6.92),
            Point::new(79.87, 6.94),
        ])
        .with_start(Point::new(79.855, 6.925))
        .with_end(Point::new(79.865, 6.935))
        .with_route(vec![Point::new(79.855, 6.925), Point::new(79.865, 6.935)])
        .with_bins(bins())
}

#[test]
fn test_redrawn_boundary_leaves_no_stale_shape() {
    let mut binding = ready_binding();
    binding
        .update(|c| c.set_boundary(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]))
        .unwrap();
    binding
        .update(|c| c.set_boundary(&[[5.0, 5.0], [5.0, 6.0], [6.0, 6.0], [6.0, 5.0]]))
        .unwrap();

    let surface = binding.surface().unwrap();
    let polygons = surface.polygons();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].len(), 4);
    assert_eq!(polygons[0][0], LatLng::new(5.0, 5.0));

    binding.update(|c| c.clear_boundary());
    assert!(binding.surface().unwrap().polygons().is_empty());
    assert!(binding.registry().handles(LayerKind::Boundary).is_empty());
}

#[test]
fn test_anchor_keeps_drag_handler_after_redraw() {
    let mut binding = ready_binding();
    for lng in [79.86, 79.87, 79.88] {
        binding
            .update(|c| c.set_waypoint(WaypointKind::Start, Point::new(lng, 6.93)))
            .unwrap();
    }

    let surface = binding.surface().unwrap();
    let anchors: Vec<_> = surface
        .markers()
        .into_iter()
        .filter(|(_, spec)| spec.role == MarkerRole::Anchor(WaypointKind::Start))
        .collect();
    assert_eq!(anchors.len(), 1);
    assert!(anchors[0].1.draggable);
    assert_eq!(anchors[0].0, LatLng::new(6.93, 79.88));
}

#[test]
fn test_only_affected_layer_is_redrawn() {
    let mut binding = ready_binding();
    binding.load(full_load());
    let route_before = binding.registry().handles(LayerKind::Route).to_vec();
    let boundary_before = binding.registry().handles(LayerKind::Boundary).to_vec();

    binding
        .update(|c| c.set_waypoint(WaypointKind::End, Point::new(79.866, 6.936)))
        .unwrap();

    assert_eq!(binding.registry().handles(LayerKind::Route), route_before.as_slice());
    assert_eq!(
        binding.registry().handles(LayerKind::Boundary),
        boundary_before.as_slice()
    );
}

#[test]
fn test_selection_highlights_one_bin() {
    let mut binding = ready_binding();
    binding.load(full_load());
    binding.update(|c| {
        c.select_bin("high");
    });

    let surface = binding.surface().unwrap();
    let highlighted: Vec<_> = surface
        .markers()
        .into_iter()
        .filter(|(_, spec)| spec.highlighted)
        .map(|(_, spec)| spec.role.clone())
        .collect();
    assert_eq!(
        highlighted,
        vec![MarkerRole::Bin {
            id: "high".to_string()
        }]
    );
    let config = EditorConfig::default();
    let low = surface
        .markers()
        .into_iter()
        .find(|(_, spec)| spec.role == MarkerRole::Bin { id: "low".to_string() })
        .map(|(_, spec)| spec.color.clone());
    assert_eq!(low.as_deref(), Some(config.styles.markers.bin_low_color.as_str()));
}

#[test]
fn test_load_replaces_every_layer() {
    let mut binding = ready_binding();
    binding.load(full_load());
    // boundary, route, two anchors, two bins
    assert_eq!(binding.surface().unwrap().visible_count(), 6);
    assert_eq!(binding.registry().len(), 6);

    binding.load(SessionLoad::new().with_start(Point::new(79.86, 6.93)));
    let surface = binding.surface().unwrap();
    assert_eq!(surface.visible_count(), 1);
    assert_eq!(surface.markers().len(), 1);
}

#[test]
fn test_single_point_route_draws_nothing() {
    let mut binding = ready_binding();
    binding
        .update(|c| c.set_route(vec![Point::new(79.86, 6.93)]))
        .unwrap();
    assert!(binding.surface().unwrap().polylines().is_empty());
}

#[test]
fn test_failed_draw_leaves_layer_empty() {
    let mut binding = ready_binding();
    binding.load(full_load());

    binding.surface_mut().unwrap().set_fail_draws(true);
    binding
        .update(|c| c.set_route(vec![Point::new(79.85, 6.92), Point::new(79.86, 6.93)]))
        .unwrap();
    assert!(binding.surface().unwrap().polylines().is_empty());
    assert!(binding.registry().handles(LayerKind::Route).is_empty());
    assert_eq!(binding.surface().unwrap().polygons().len(), 1);

    binding.surface_mut().unwrap().set_fail_draws(false);
    binding
        .update(|c| c.set_route(vec![Point::new(79.85, 6.92), Point::new(79.87, 6.93)]))
        .unwrap();
    assert_eq!(binding.surface().unwrap().polylines().len(), 1);
}

#[test]
fn test_sync_without_changes_keeps_shapes() {
    let mut binding = ready_binding();
    binding.load(full_load());
    let before = binding.registry().handles(LayerKind::Bins).to_vec();

    binding.sync();
    assert_eq!(binding.registry().handles(LayerKind::Bins), before.as_slice());
    assert_eq!(binding.surface().unwrap().visible_count(), 6);
}
