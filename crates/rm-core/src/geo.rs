//! Geographic coordinate types and great-circle math.
//!
//! Everything here is `f64` and a pure function of its arguments.  Distances
//! are in **miles** and bearings in **degrees**, the units the router and the
//! front end consume directly.

/// Earth radius used by [`distance_miles`].
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// Haversine great-circle distance in miles between `(lon_v, lat_v)` and
/// `(lon_w, lat_w)`, all in degrees.
///
/// Independent of any graph state so it can be shared by nearest-vertex
/// search and tested on its own.
pub fn distance_miles(lon_v: f64, lat_v: f64, lon_w: f64, lat_w: f64) -> f64 {
    let phi1 = lat_v.to_radians();
    let phi2 = lat_w.to_radians();
    let d_phi = (lat_w - lat_v).to_radians();
    let d_lambda = (lon_w - lon_v).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Initial great-circle bearing in degrees from `(lon_v, lat_v)` towards
/// `(lon_w, lat_w)`.
///
/// Range is `-180..=180` with 0 = due north and 90 = due east.  Callers that
/// need a compass heading in `0..360` normalise it themselves.
pub fn bearing_deg(lon_v: f64, lat_v: f64, lon_w: f64, lat_w: f64) -> f64 {
    let phi1 = lat_v.to_radians();
    let phi2 = lat_w.to_radians();
    let d_lambda = (lon_w - lon_v).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    y.atan2(x).to_degrees()
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in miles.
    #[inline]
    pub fn distance_miles(self, other: GeoPoint) -> f64 {
        distance_miles(self.lon, self.lat, other.lon, other.lat)
    }

    /// Initial bearing in degrees from `self` towards `other`.
    #[inline]
    pub fn bearing_to(self, other: GeoPoint) -> f64 {
        bearing_deg(self.lon, self.lat, other.lon, other.lat)
    }

    /// Position on the unit sphere.
    ///
    /// Chord length between two of these is monotone in great-circle
    /// distance, so Euclidean nearest-neighbour search over them agrees with
    /// haversine ordering.
    pub fn to_unit_vector(self) -> [f64; 3] {
        let (phi, lambda) = (self.lat.to_radians(), self.lon.to_radians());
        [phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin()]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// A longitude/latitude rectangle given by its upper-left and lower-right
/// corners.
///
/// No ordering is enforced: a box with `lrlon < ullon` or `lrlat > ullat` is
/// representable and reported by [`is_inverted`](Self::is_inverted).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub ullon: f64,
    pub ullat: f64,
    pub lrlon: f64,
    pub lrlat: f64,
}

impl BoundingBox {
    #[inline]
    pub fn new(ullon: f64, ullat: f64, lrlon: f64, lrlat: f64) -> Self {
        Self { ullon, ullat, lrlon, lrlat }
    }

    /// Centre of the box.
    pub fn midpoint(&self) -> GeoPoint {
        GeoPoint::new(
            self.ullat - (self.ullat - self.lrlat) / 2.0,
            (self.lrlon - self.ullon) / 2.0 + self.ullon,
        )
    }

    /// Longitudinal span in degrees (signed; negative when inverted).
    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lrlon - self.ullon
    }

    /// Latitudinal span in degrees (signed; negative when inverted).
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.ullat - self.lrlat
    }

    /// `true` if the corners are swapped along either axis.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.lrlon < self.ullon || self.lrlat > self.ullat
    }

    /// Open-interval overlap test.
    ///
    /// Two boxes intersect unless one lies entirely left, right, above, or
    /// below the other.  Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.lrlon <= other.ullon
            || self.lrlat >= other.ullat
            || other.lrlon <= self.ullon
            || other.lrlat >= self.ullat)
    }

    /// `true` unless some edge of `other` reaches past the matching edge of
    /// `self` (edges inclusive).
    ///
    /// Only a comparison that holds counts as reaching past, so a NaN corner
    /// never takes a box outside.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        !(other.ullon < self.ullon
            || other.ullat > self.ullat
            || other.lrlon > self.lrlon
            || other.lrlat < self.lrlat)
    }
}
