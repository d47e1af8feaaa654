use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TelemetryRecord {
    pub name: String,
    pub catalog_id: u64,
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    /// Normalized to (-180, 180].
    pub longitude_deg: f64,
    pub altitude_km: f64,
    pub speed_km_s: f64,
}

pub fn normalize_longitude(longitude_deg: f64) -> f64 {
    let wrapped = longitude_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn normalized_range() {
        for raw in [-540.0, -360.0, -180.0, -179.5, -0.0, 0.0, 90.0, 180.0, 180.5, 359.9, 720.0, 1e6] {
            let lon = normalize_longitude(raw);
            assert!(lon > -180.0 && lon <= 180.0, "{raw} -> {lon}");
        }
    }

    #[test]
    fn boundaries() {
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert!(approx_eq!(f64, normalize_longitude(190.0), -170.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, normalize_longitude(-460.25), -100.25, epsilon = 1e-12));
    }

    #[test]
    fn invariant_under_full_turns() {
        for raw in [-517.3, -123.4, 0.5, 45.0, 179.0, 250.75] {
            let base = normalize_longitude(raw);
            for k in -3..=3 {
                let shifted = normalize_longitude(raw + 360.0 * k as f64);
                assert!(approx_eq!(f64, base, shifted, epsilon = 1e-9), "{raw} k={k}");
            }
        }
    }

    #[test]
    fn serializes_field_names() {
        let record = TelemetryRecord {
            name: "ISS (ZARYA)".into(),
            catalog_id: 25544,
            timestamp: "2008-09-20T12:25:40Z".parse().unwrap(),
            latitude_deg: 10.0,
            longitude_deg: -20.0,
            altitude_km: 350.0,
            speed_km_s: 7.7,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["catalog_id"], 25544);
        assert_eq!(json["speed_km_s"], 7.7);
        assert_eq!(json["timestamp"], "2008-09-20T12:25:40Z");
    }
}
