use binroute_core::{BinMarker, Error, GeometryError, Point};
use binroute_editor::binding::ViewRequest;
use binroute_editor::{
    EditSessionController, FitTarget, LatLng, MapBinding, RecordingSurface, SessionLoad,
};
use binroute_settings::EditorConfig;

fn triangle() -> Vec<Point> {
    vec![
        Point::new(79.85, 6.92),
        Point::new(79.87, 6.92),
        Point::new(79.87, 6.94),
    ]
}

fn route() -> Vec<Point> {
    vec![
        Point::new(79.855, 6.925),
        Point::new(79.860, 6.930),
        Point::new(79.865, 6.935),
    ]
}

fn attached(load: SessionLoad, config: EditorConfig) -> MapBinding<RecordingSurface> {
    let mut binding = MapBinding::new(EditSessionController::new(), config);
    binding.load(load);
    binding.attach(RecordingSurface::new()).unwrap();
    binding
}

#[test]
fn test_empty_session_shows_default_view() {
    let binding = attached(SessionLoad::new(), EditorConfig::default());
    assert_eq!(
        binding.surface().unwrap().last_view(),
        Some(&ViewRequest::Center {
            center: LatLng::new(6.9271, 79.8612),
            zoom: 13,
        })
    );
}

#[test]
fn test_attach_fits_boundary_with_padding() {
    let binding = attached(
        SessionLoad::new().with_boundary(triangle()),
        EditorConfig::default(),
    );
    assert_eq!(
        binding.surface().unwrap().last_view(),
        Some(&ViewRequest::Fit {
            south_west: LatLng::new(6.92, 79.85),
            north_east: LatLng::new(6.94, 79.87),
            padding_px: 50,
        })
    );
}

#[test]
fn test_padding_comes_from_config() {
    let mut config = EditorConfig::default();
    config.map.fit_padding_px = 12;
    let mut binding = attached(SessionLoad::new().with_boundary(triangle()), config);

    binding.fit_to_content().unwrap();
    assert!(matches!(
        binding.surface().unwrap().last_view(),
        Some(ViewRequest::Fit { padding_px: 12, .. })
    ));
}

#[test]
fn test_fit_precedence() {
    let load = SessionLoad::new()
        .with_boundary(triangle())
        .with_route(route())
        .with_start(Point::new(79.80, 6.90))
        .with_bins(vec![BinMarker::new("B", Point::new(79.858, 6.931), 55.0)]);
    let mut binding = attached(load, EditorConfig::default());

    binding.update(|c| {
        c.select_bin("B");
    });
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::SelectedBin);

    binding.update(|c| c.clear_selection());
    binding.focus_segment(Some(1));
    assert_eq!(
        binding.fit_to_content().unwrap(),
        FitTarget::ActiveSegment(1)
    );
    assert_eq!(
        binding.surface().unwrap().last_view(),
        Some(&ViewRequest::Fit {
            south_west: LatLng::new(6.930, 79.860),
            north_east: LatLng::new(6.935, 79.865),
            padding_px: 50,
        })
    );

    binding.focus_segment(None);
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::Route);

    binding.update(|c| c.set_route(Vec::new())).unwrap();
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::Boundary);

    binding.update(|c| c.clear_boundary());
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::Markers);
    assert_eq!(
        binding.surface().unwrap().last_view(),
        Some(&ViewRequest::Fit {
            south_west: LatLng::new(6.90, 79.80),
            north_east: LatLng::new(6.931, 79.858),
            padding_px: 50,
        })
    );
}

#[test]
fn test_shortened_route_drops_active_segment() {
    let mut binding = attached(SessionLoad::new().with_route(route()), EditorConfig::default());
    binding.focus_segment(Some(1));

    binding
        .update(|c| c.set_route(route()[..2].to_vec()))
        .unwrap();
    assert_eq!(binding.active_segment(), None);
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::Route);
}

#[test]
fn test_nothing_to_fit() {
    let mut binding = attached(SessionLoad::new(), EditorConfig::default());
    let err = binding.fit_to_content().unwrap_err();
    assert!(matches!(err, Error::Geometry(GeometryError::EmptyGeometry)));
}

#[test]
fn test_out_of_range_segment_is_dropped() {
    let mut binding = attached(SessionLoad::new(), EditorConfig::default());
    binding.focus_segment(Some(usize::MAX));

    binding
        .update(|c| c.set_route(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]))
        .unwrap();
    assert_eq!(binding.active_segment(), None);
    assert_eq!(binding.fit_to_content().unwrap(), FitTarget::Route);
}
