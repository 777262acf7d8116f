//! Event and station geometry.
//!
//! Geometry enters the pipeline only through the epicentral distance, which
//! together with the velocity bounds places the admissible window time range.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Source and receiver coordinates for one event-station pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventStationGeometry {
    /// Event latitude in degrees.
    pub event_latitude: f64,
    /// Event longitude in degrees.
    pub event_longitude: f64,
    /// Event depth in kilometres, positive down.
    pub event_depth_km: f64,
    /// Station latitude in degrees.
    pub station_latitude: f64,
    /// Station longitude in degrees.
    pub station_longitude: f64,
}

impl EventStationGeometry {
    pub fn new(
        event_latitude: f64,
        event_longitude: f64,
        event_depth_km: f64,
        station_latitude: f64,
        station_longitude: f64,
    ) -> Self {
        Self {
            event_latitude,
            event_longitude,
            event_depth_km,
            station_latitude,
            station_longitude,
        }
    }

    /// Great-circle distance between epicentre and station in kilometres,
    /// via the haversine formula on a spherical Earth.
    pub fn epicentral_distance_km(&self) -> f64 {
        let lat1 = self.event_latitude.to_radians();
        let lat2 = self.station_latitude.to_radians();
        let dlat = (self.station_latitude - self.event_latitude).to_radians();
        let dlon = (self.station_longitude - self.event_longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_KM * c
    }

    /// Straight-line source-receiver distance including event depth.
    pub fn hypocentral_distance_km(&self) -> f64 {
        let epi = self.epicentral_distance_km();
        (epi * epi + self.event_depth_km * self.event_depth_km).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_distance_for_colocated_points() {
        let g = EventStationGeometry::new(35.0, 139.0, 10.0, 35.0, 139.0);
        assert_relative_eq!(g.epicentral_distance_km(), 0.0);
        assert_relative_eq!(g.hypocentral_distance_km(), 10.0);
    }

    #[test]
    fn quarter_meridian_distance() {
        // Pole to equator along a meridian is a quarter of the circumference.
        let g = EventStationGeometry::new(90.0, 0.0, 0.0, 0.0, 0.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert_relative_eq!(g.epicentral_distance_km(), expected, max_relative = 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let g = EventStationGeometry::new(35.0, 139.0, 0.0, 52.0, 13.0);
        let h = EventStationGeometry::new(52.0, 13.0, 0.0, 35.0, 139.0);
        assert_relative_eq!(
            g.epicentral_distance_km(),
            h.epicentral_distance_km(),
            max_relative = 1e-12
        );
        // Tokyo to Berlin is roughly 8900 km.
        assert!((8800.0..9050.0).contains(&g.epicentral_distance_km()));
    }
}
