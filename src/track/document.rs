//! Final track document, ready for serialization.

use time::{macros::format_description, Duration, OffsetDateTime};

use crate::{constants::WALL_AXES_COUNT, geo::Lla, FlightLogError};

use super::{Keyframe, Segment};

/// Everything the KML writer needs. Holds no decoding state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDocument {
    pub segments: Vec<Segment>,
    pub keyframes: Vec<Keyframe>,
    /// Track points projected to the ground.
    pub ground_track: Vec<Lla>,
    pub wall_axes: [Vec<Lla>; WALL_AXES_COUNT],
    /// Wall clock time for log time `0`.
    pub epoch: OffsetDateTime,
}

impl TrackDocument {
    pub fn assemble(
        segments: Vec<Segment>,
        keyframes: Vec<Keyframe>,
        wall_axes: [Vec<Lla>; WALL_AXES_COUNT],
        epoch: OffsetDateTime,
    ) -> Self {
        // first wall axis is at home altitude,
        // altitude is ignored once clamped to ground
        let ground_track = wall_axes[0].to_owned();

        Self {
            segments,
            keyframes,
            ground_track,
            wall_axes,
            epoch,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Wall clock time for log time `millis`.
    pub fn datetime(&self, millis: u32) -> OffsetDateTime {
        self.epoch + Duration::milliseconds(millis as i64)
    }

    /// `YYYY-MM-DDThh:mm:ssZ` for log time `millis`.
    pub fn datetime_string(&self, millis: u32) -> Result<String, FlightLogError> {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
        Ok(self.datetime(millis).format(&format)?)
    }
}
