use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sgp4::Elements;

use super::parsing::parse_tle_lines;
use super::TleError;

const EARTH_MU_KM3_S2: f64 = 398_600.4418;
const EARTH_RADIUS_KM: f64 = 6378.137;

#[derive(Debug, Clone)]
pub struct OrbitalElementRecord {
    name: String,
    line1: String,
    line2: String,
    elements: Elements,
}

impl OrbitalElementRecord {
    /// Parses two-line or three-line element set text.
    ///
    /// Without a name line the display name becomes `NORAD {catalog id}`.
    pub fn parse(text: &str) -> Result<Self, TleError> {
        let (name, line1, line2) = parse_tle_lines(text)?;
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())?;
        let name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        Ok(Self {
            name,
            line1,
            line2,
            elements,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn international_designator(&self) -> Option<&str> {
        self.elements.international_designator.as_deref()
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn data_lines(&self) -> (&str, &str) {
        (&self.line1, &self.line2)
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.elements.datetime, Utc)
    }

    pub fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn mean_motion(&self) -> f64 {
        self.elements.mean_motion
    }

    pub fn orbital_period(&self) -> Duration {
        Duration::milliseconds((86_400_000.0 / self.elements.mean_motion).round() as i64)
    }

    pub fn semi_major_axis_km(&self) -> f64 {
        let n = self.elements.mean_motion * std::f64::consts::TAU / 86_400.0;
        (EARTH_MU_KM3_S2 / (n * n)).cbrt()
    }

    pub fn perigee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 - self.elements.eccentricity) - EARTH_RADIUS_KM
    }

    pub fn apogee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km() * (1.0 + self.elements.eccentricity) - EARTH_RADIUS_KM
    }
}

impl fmt::Display for OrbitalElementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.line1)?;
        write!(f, "{}", self.line2)
    }
}
