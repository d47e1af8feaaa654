//! TEME to geodetic conversion.
//!
//! Longitudes produced here are raw: `atan2(y, x) - gmst`, which can fall
//! anywhere in (-540, 180] degrees. Callers normalize when they need to.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};

use super::GeodeticSample;

// WGS-84
pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

const MAX_ITERATIONS: usize = 20;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-12;

/// Greenwich Mean Sidereal Time in radians, in [0, 2π).
pub fn gmst(at: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
        .rem_euclid(TAU)
}

pub fn teme_to_geodetic(pos_teme: [f64; 3], at: DateTime<Utc>) -> GeodeticSample {
    let theta = gmst(at);
    let longitude = pos_teme[1].atan2(pos_teme[0]) - theta;

    // Latitude and height only depend on the distance from the polar axis,
    // which the sidereal rotation leaves unchanged.
    let p = pos_teme[0].hypot(pos_teme[1]);
    let (latitude, altitude_km) = latitude_and_height(p, pos_teme[2]);

    GeodeticSample {
        latitude_deg: latitude.to_degrees(),
        longitude_deg: longitude.to_degrees(),
        altitude_km,
    }
}

fn latitude_and_height(p: f64, z: f64) -> (f64, f64) {
    let e2 = WGS84_F * (2.0 - WGS84_F);

    let mut latitude = z.atan2(p * (1.0 - e2));
    let mut n = WGS84_A_KM;
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = latitude.sin();
        n = WGS84_A_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * n * sin_lat).atan2(p);
        let delta = (next - latitude).abs();
        latitude = next;
        if delta < LATITUDE_TOLERANCE_RAD {
            break;
        }
    }

    let (sin_lat, cos_lat) = latitude.sin_cos();
    let height = if cos_lat.abs() > 1e-10 {
        p / cos_lat - n
    } else {
        z.abs() / sin_lat.abs() - n * (1.0 - e2)
    };

    (latitude, height)
}
