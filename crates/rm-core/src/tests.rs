//! Unit tests for rm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{VertexId, WayId};

    #[test]
    fn raw_roundtrip() {
        let id = VertexId(53_085_029);
        assert_eq!(id.get(), 53_085_029);
        assert_eq!(i64::from(id), 53_085_029);
        assert_eq!(VertexId::from(53_085_029), id);
    }

    #[test]
    fn negative_ids_are_valid() {
        // Locally-created map edits use negative ids.
        let id: VertexId = "-17".parse().unwrap();
        assert_eq!(id, VertexId(-17));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("abc".parse::<WayId>().is_err());
        assert_eq!(" 42 ".parse::<WayId>().unwrap(), WayId(42));
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
        assert_eq!(WayId(9).to_string(), "WayId(9)");
    }
}

#[cfg(test)]
mod distance {
    use crate::{GeoPoint, distance_miles};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(37.87, -122.25);
        assert_eq!(p.distance_miles(p), 0.0);
    }

    #[test]
    fn tenth_degree_of_latitude() {
        // 0.1° of latitude ≈ 6.92 mi at R = 3963.
        let d = distance_miles(-122.0, 37.0, -122.0, 37.1);
        assert!((d - 6.9).abs() < 0.1, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = (-122.2581, 37.8711);
        let b = (-122.2312, 37.8402);
        let ab = distance_miles(a.0, a.1, b.0, b.1);
        let ba = distance_miles(b.0, b.1, a.0, a.1);
        assert!((ab - ba).abs() < 1e-12);
        assert!(ab > 0.0);
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = distance_miles(0.0, 0.0, 180.0, 0.0);
        let half = std::f64::consts::PI * crate::EARTH_RADIUS_MILES;
        assert!(d.is_finite());
        assert!((d - half).abs() < 1e-6, "got {d}");
    }
}

#[cfg(test)]
mod bearing {
    use crate::{GeoPoint, bearing_deg};

    #[test]
    fn due_north() {
        let b = bearing_deg(-122.0, 37.0, -122.0, 37.1);
        assert!(b.abs() < 1e-9, "got {b}");
    }

    #[test]
    fn due_south_and_east() {
        let south = bearing_deg(-122.0, 37.1, -122.0, 37.0);
        assert!((south.abs() - 180.0).abs() < 1e-9, "got {south}");

        // On the equator due east is exactly 90°.
        let east = bearing_deg(0.0, 0.0, 1.0, 0.0);
        assert!((east - 90.0).abs() < 1e-9, "got {east}");
    }

    #[test]
    fn reverse_differs_by_half_turn() {
        let a = GeoPoint::new(37.8711, -122.2581);
        let b = GeoPoint::new(37.8402, -122.2312);
        let diff = (a.bearing_to(b) - b.bearing_to(a)).rem_euclid(360.0);
        // Over a few miles the meridian convergence is a tiny fraction of a degree.
        assert!((diff - 180.0).abs() < 0.1, "got {diff}");
    }

    #[test]
    fn coincident_points_have_zero_bearing() {
        assert_eq!(bearing_deg(-122.0, 37.0, -122.0, 37.0), 0.0);
    }
}

#[cfg(test)]
mod bbox {
    use crate::{BoundingBox, GeoPoint};

    fn root() -> BoundingBox {
        BoundingBox::new(-122.30, 37.88, -122.20, 37.82)
    }

    #[test]
    fn spans_and_midpoint() {
        let r = root();
        assert!((r.lon_span() - 0.10).abs() < 1e-9);
        assert!((r.lat_span() - 0.06).abs() < 1e-9);
        let mid = r.midpoint();
        assert!((mid.lon + 122.25).abs() < 1e-9);
        assert!((mid.lat - 37.85).abs() < 1e-9);
    }

    #[test]
    fn inverted_detection() {
        assert!(!root().is_inverted());
        assert!(BoundingBox::new(-122.20, 37.88, -122.30, 37.82).is_inverted());
        assert!(BoundingBox::new(-122.30, 37.82, -122.20, 37.88).is_inverted());
    }

    #[test]
    fn shared_edge_is_not_an_intersection() {
        let left = BoundingBox::new(-122.30, 37.88, -122.25, 37.82);
        let right = BoundingBox::new(-122.25, 37.88, -122.20, 37.82);
        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));
    }

    #[test]
    fn overlap_and_disjoint() {
        let r = root();
        let inner = BoundingBox::new(-122.27, 37.86, -122.23, 37.84);
        let above = BoundingBox::new(-122.27, 37.95, -122.23, 37.90);
        assert!(r.intersects(&inner));
        assert!(inner.intersects(&r));
        assert!(!r.intersects(&above));
    }

    #[test]
    fn containment() {
        let r = root();
        assert!(r.contains(&r));
        assert!(r.contains(&BoundingBox::new(-122.27, 37.86, -122.23, 37.84)));
        assert!(!r.contains(&BoundingBox::new(-122.31, 37.86, -122.23, 37.84)));
        assert!(!r.contains(&BoundingBox::new(-122.27, 37.86, -122.19, 37.84)));
    }

    #[test]
    fn nan_corner_does_not_leave_the_box() {
        let r = root();
        let q = BoundingBox::new(f64::NAN, 37.86, -122.23, 37.84);
        assert!(r.contains(&q));
        assert!(!q.is_inverted());
        // A finite corner past an edge still counts.
        assert!(!r.contains(&BoundingBox::new(f64::NAN, 37.90, -122.23, 37.84)));
    }

    #[test]
    fn unit_vector_is_normalised() {
        let v = GeoPoint::new(37.85, -122.25).to_unit_vector();
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }
}
