//! Decoded telemetry updates and the decoder boundary.
//!
//! The exporter only consumes a handful of telemetry objects.
//! A `TelemetryDecoder` receives log payload bytes one at a time,
//! in file order, and reports every completed object update
//! through the supplied callback before returning.

pub mod objects;
pub mod uavtalk;

pub use objects::{ObjectKind, ObjectTable};
pub use uavtalk::UavTalkDecoder;

/// Vehicle home location. Reference point for NED positions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HomeLocation {
    /// Set by the flight controller once the home location is valid.
    pub set: bool,
    /// Latitude in degrees x 1e7.
    pub latitude: i32,
    /// Longitude in degrees x 1e7.
    pub longitude: i32,
    /// Altitude in meters (WGS 84).
    pub altitude: f32,
}

impl HomeLocation {
    /// Latitude in degrees.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude as f64 / 1e7
    }

    /// Longitude in degrees.
    pub fn longitude_deg(&self) -> f64 {
        self.longitude as f64 / 1e7
    }
}

/// North, east, down vector.
/// Meters relative to home for positions, m/s for velocities.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Ned {
    pub north: f32,
    pub east: f32,
    pub down: f32,
}

impl Ned {
    pub fn new(north: f32, east: f32, down: f32) -> Self {
        Self { north, east, down }
    }

    /// Horizontal magnitude.
    pub fn horizontal(&self) -> f64 {
        (self.north as f64).hypot(self.east as f64)
    }
}

/// GPS fix quality.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GpsStatus {
    #[default]
    NoGps,
    NoFix,
    Fix2D,
    Fix3D,
    Other(u8),
}

impl From<u8> for GpsStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::NoGps,
            1 => Self::NoFix,
            2 => Self::Fix2D,
            3 => Self::Fix3D,
            n => Self::Other(n),
        }
    }
}

impl GpsStatus {
    /// `true` for a 2D or 3D lock.
    pub fn has_fix(&self) -> bool {
        matches!(self, Self::Fix2D | Self::Fix3D)
    }
}

/// A single decoded object update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Telemetry {
    HomeLocation(HomeLocation),
    /// NED position relative to home. Triggers track geometry.
    Position(Ned),
    Velocity(Ned),
    /// Attitude yaw in degrees.
    Attitude{yaw: f32},
    /// Calibrated airspeed in m/s.
    Airspeed{calibrated: f32},
    GpsPosition{status: GpsStatus},
}

/// Byte oriented telemetry decoder.
pub trait TelemetryDecoder {
    /// Push a single byte. Any updates completed by this byte
    /// are passed to `emit`, in order, before returning.
    fn process_byte(&mut self, byte: u8, emit: &mut dyn FnMut(Telemetry));
}
