//! WGS 84 placement of NED offsets relative to the home location.
//! The ellipsoid math is done by `nav_types`.

use nav_types::{ECEF, NED, WGS84};

/// Geodetic position, degrees and meters above the ellipsoid.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Lla {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Lla {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }

    /// `None` if the latitude is outside `[-90, 90]` or
    /// any component is not finite.
    fn to_wgs84(&self) -> Option<WGS84<f64>> {
        let valid = self.latitude.abs() <= 90.0
            && self.longitude.is_finite()
            && self.altitude.is_finite();
        // nav_types asserts on out of range latitudes
        valid.then(|| WGS84::from_degrees_and_meters(self.latitude, self.longitude, self.altitude))
    }
}

impl From<WGS84<f64>> for Lla {
    fn from(wgs84: WGS84<f64>) -> Self {
        Self::new(wgs84.latitude_degrees(), wgs84.longitude_degrees(), wgs84.altitude())
    }
}

/// Converts a north, east, down offset in meters from `home`
/// to a geodetic position.
///
/// The offset is applied in the local tangent plane at `home` in ECEF
/// and converted back. Returns `None` for an invalid `home`.
pub fn ned_to_lla(home: &Lla, north: f64, east: f64, down: f64) -> Option<Lla> {
    let origin: ECEF<f64> = home.to_wgs84()?.into();
    let wgs84: WGS84<f64> = (origin + NED::new(north, east, down)).into();
    Some(Lla::from(wgs84))
}
