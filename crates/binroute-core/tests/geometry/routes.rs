use binroute_core::{bounds_of, route_distance_km, GeometryError, Point};

#[test]
fn test_equatorial_route_distance() {
    let route = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
    ];
    let distance = route_distance_km(&route);
    assert!(
        (distance - 222.4).abs() < 0.05,
        "expected about 222.4 km, got {distance}"
    );
}

#[test]
fn test_colombo_leg_distance() {
    let route = [Point::new(79.8612, 6.9271), Point::new(79.8712, 6.9371)];
    assert_eq!(route_distance_km(&route), 1.57);
}

#[test]
fn test_distance_has_two_decimals() {
    let route = [
        Point::new(79.8612, 6.9271),
        Point::new(79.8650, 6.9301),
        Point::new(79.8701, 6.9288),
    ];
    let distance = route_distance_km(&route);
    assert_eq!((distance * 100.0).round() / 100.0, distance);
}

#[test]
fn test_bounds_of_route() {
    let route = [
        Point::new(79.87, 6.93),
        Point::new(79.85, 6.95),
        Point::new(79.86, 6.91),
    ];
    let bounds = bounds_of(&route).unwrap();
    assert_eq!(bounds.min_lon, 79.85);
    assert_eq!(bounds.max_lon, 79.87);
    assert_eq!(bounds.min_lat, 6.91);
    assert_eq!(bounds.max_lat, 6.95);
}

#[test]
fn test_bounds_of_nothing() {
    assert_eq!(bounds_of(&[]).unwrap_err(), GeometryError::EmptyGeometry);
}
