//! Track geometry built from decoded telemetry.

pub mod builder;
pub mod document;

pub use builder::TrackBuilder;
pub use document::TrackDocument;

use crate::{
    constants::WALL_AXES_COUNT,
    geo::{ned_to_lla, Lla},
    telemetry::{HomeLocation, Ned},
};

/// Geodetic position with groundspeed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in meters (WGS 84).
    pub altitude: f64,
    /// Horizontal speed in m/s.
    pub groundspeed: f64,
}

impl GeoPoint {
    /// Places NED `position` relative to `home`.
    /// Groundspeed is the horizontal magnitude of `velocity`.
    /// `None` if the home coordinates are out of range.
    pub fn from_ned(home: &HomeLocation, position: &Ned, velocity: &Ned) -> Option<Self> {
        let origin = Lla::new(
            home.latitude_deg(),
            home.longitude_deg(),
            home.altitude as f64
        );
        let lla = ned_to_lla(
            &origin,
            position.north as f64,
            position.east as f64,
            position.down as f64
        )?;
        Some(Self {
            latitude: lla.latitude,
            longitude: lla.longitude,
            altitude: lla.altitude,
            groundspeed: velocity.horizontal(),
        })
    }

    pub fn to_lla(&self) -> Lla {
        Lla::new(self.latitude, self.longitude, self.altitude)
    }
}

/// Line between two consecutive accepted samples.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Log time of `end` in milliseconds.
    pub timestamp: u32,
    /// Calibrated airspeed in m/s when `end` was recorded.
    pub airspeed: f64,
}

impl Segment {
    /// Mean groundspeed of the two end points. Sets the segment color.
    pub fn groundspeed(&self) -> f64 {
        (self.start.groundspeed + self.end.groundspeed) / 2.0
    }
}

/// Periodic position marker.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub point: GeoPoint,
    /// Log time of the previous keyframe, `0` for the first one.
    pub interval_start: u32,
    /// Log time of this keyframe.
    pub interval_end: u32,
    /// Attitude yaw in degrees.
    pub heading: f64,
    /// Calibrated airspeed in m/s.
    pub airspeed: f64,
}

/// Mutable geometry state. `previous` is `None` until
/// the first accepted sample.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackState {
    pub previous: Option<GeoPoint>,
    /// Log time of the last keyframe in milliseconds.
    pub last_keyframe: u32,
    /// Vertical reference lines. Axis `i` holds every track point
    /// after the first at `i * WALL_AXES_SEPARATION` above home altitude.
    pub wall_axes: [Vec<Lla>; WALL_AXES_COUNT],
}

impl TrackState {
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }
}
