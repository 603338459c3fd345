use binroute_core::{close_ring, haversine_distance_km, ring_from_raw_coordinates, Point};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Point> {
    (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(lon, lat)| Point::new(lon, lat))
}

fn open_ring() -> impl Strategy<Value = Vec<Point>> {
    // Vertices on distinct integer longitudes so they are always distinct.
    (3usize..12, -80.0f64..80.0).prop_map(|(n, lat)| {
        (0..n)
            .map(|i| Point::new(i as f64 - 6.0, lat + (i % 2) as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn open_ring_gains_one_point(points in open_ring()) {
        let n = points.len();
        let polygon = close_ring(points).unwrap();
        prop_assert_eq!(polygon.ring().len(), n + 1);
        prop_assert_eq!(polygon.ring().first(), polygon.ring().last());
    }

    #[test]
    fn closed_ring_keeps_its_length(points in open_ring()) {
        let mut closed = points.clone();
        closed.push(points[0]);
        let n = closed.len();
        let polygon = close_ring(closed).unwrap();
        prop_assert_eq!(polygon.ring().len(), n);
    }

    #[test]
    fn haversine_is_symmetric(a in coordinate(), b in coordinate()) {
        prop_assert_eq!(haversine_distance_km(a, b), haversine_distance_km(b, a));
    }

    #[test]
    fn haversine_identity_is_zero(a in coordinate()) {
        prop_assert_eq!(haversine_distance_km(a, a), 0.0);
    }

    #[test]
    fn non_pair_elements_are_rejected(extra in prop::collection::vec(-10.0f64..10.0, 0..5)) {
        prop_assume!(extra.len() != 2);
        let coords = vec![vec![0.0, 0.0], extra, vec![1.0, 1.0], vec![1.0, 0.0]];
        prop_assert!(ring_from_raw_coordinates(&coords).is_err());
    }
}
