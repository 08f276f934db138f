use wayfind_core::GeoPoint;

use crate::category::QueryProfile;
use crate::geo::haversine_km;

/// Haversine radius cutoff for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceGate {
    max_km: f64,
}

impl DistanceGate {
    #[must_use]
    pub const fn new(max_km: f64) -> Self {
        Self { max_km }
    }

    /// Sparse categories get the wide radius, everything else the dense one.
    #[must_use]
    pub fn for_profile(profile: &QueryProfile, dense_km: f64, sparse_km: f64) -> Self {
        Self::new(if profile.is_sparse() { sparse_km } else { dense_km })
    }

    #[must_use]
    pub fn max_km(&self) -> f64 {
        self.max_km
    }

    /// Distance from `origin` to `point` when it is within the radius
    /// (inclusive), `None` otherwise.
    #[must_use]
    pub fn admit(&self, origin: GeoPoint, point: GeoPoint) -> Option<f64> {
        let distance = haversine_km(origin, point);
        (distance <= self.max_km).then_some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: GeoPoint = GeoPoint::new(12.976_3, 77.592_9);

    /// A point `km` kilometres due north of `ORIGIN`.
    fn north_of_origin(km: f64) -> GeoPoint {
        let degrees = (km / crate::geo::EARTH_RADIUS_KM).to_degrees();
        GeoPoint::new(ORIGIN.lat + degrees, ORIGIN.lng)
    }

    #[test]
    fn dense_queries_use_narrow_radius() {
        let gate = DistanceGate::for_profile(&QueryProfile::classify("gym"), 7.0, 30.0);
        assert!((gate.max_km() - 7.0).abs() < f64::EPSILON);
        assert!(gate.admit(ORIGIN, north_of_origin(6.5)).is_some());
        assert!(gate.admit(ORIGIN, north_of_origin(7.5)).is_none());
    }

    #[test]
    fn sparse_queries_use_wide_radius() {
        let gate = DistanceGate::for_profile(&QueryProfile::classify("stadium"), 7.0, 30.0);
        assert!((gate.max_km() - 30.0).abs() < f64::EPSILON);
        assert!(gate.admit(ORIGIN, north_of_origin(25.0)).is_some());
        assert!(gate.admit(ORIGIN, north_of_origin(31.0)).is_none());
    }

    #[test]
    fn admit_agrees_with_haversine() {
        let gate = DistanceGate::new(7.0);
        for km in [0.0, 1.0, 3.5, 6.9, 7.1, 12.0, 40.0] {
            let point = north_of_origin(km);
            let distance = haversine_km(ORIGIN, point);
            assert_eq!(
                gate.admit(ORIGIN, point).is_some(),
                distance <= 7.0,
                "km = {km}"
            );
        }
    }

    #[test]
    fn admitted_distance_is_reported() {
        let gate = DistanceGate::new(7.0);
        let distance = gate.admit(ORIGIN, north_of_origin(2.0)).unwrap();
        assert!((distance - 2.0).abs() < 1e-6, "got {distance}");
    }
}
