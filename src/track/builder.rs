//! Incremental track builder.
//!
//! Keeps the latest value of each telemetry object. Position updates
//! are the only trigger for new geometry and are accepted only once
//! the home location is set and the GPS has a 2D or 3D fix.
//! Consecutive accepted samples are always joined, there is no gap detection.

use time::OffsetDateTime;
use tracing::debug;

use crate::{
    constants::{KEYFRAME_INTERVAL_MS, WALL_AXES_SEPARATION},
    geo::Lla,
    telemetry::{GpsStatus, HomeLocation, Ned, Telemetry},
};

use super::{GeoPoint, Keyframe, Segment, TrackDocument, TrackState};

#[derive(Debug, Default, Clone)]
pub struct TrackBuilder {
    home: HomeLocation,
    velocity: Ned,
    /// Attitude yaw in degrees.
    yaw: f32,
    /// Calibrated airspeed in m/s.
    airspeed: f32,
    gps_status: GpsStatus,
    state: TrackState,
    segments: Vec<Segment>,
    keyframes: Vec<Keyframe>,
    /// Position updates dropped for lack of home location or GPS fix.
    dropped: usize,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single telemetry update logged at `timestamp` (ms).
    pub fn update(&mut self, timestamp: u32, telemetry: Telemetry) {
        match telemetry {
            Telemetry::HomeLocation(home) => self.home = home,
            Telemetry::Velocity(velocity) => self.velocity = velocity,
            Telemetry::Attitude{yaw} => self.yaw = yaw,
            Telemetry::Airspeed{calibrated} => self.airspeed = calibrated,
            Telemetry::GpsPosition{status} => self.gps_status = status,
            Telemetry::Position(position) => self.add_position(timestamp, &position),
        }
    }

    fn add_position(&mut self, timestamp: u32, position: &Ned) {
        if !self.home.set || !self.gps_status.has_fix() {
            self.dropped += 1;
            return
        }

        let Some(point) = GeoPoint::from_ned(&self.home, position, &self.velocity) else {
            debug!("Home location out of range: {:.7}, {:.7}",
                self.home.latitude_deg(), self.home.longitude_deg());
            self.dropped += 1;
            return
        };

        let Some(previous) = self.state.previous.replace(point) else {
            debug!("First track point at {timestamp} ms: {:.7}, {:.7}, {:.1} m",
                point.latitude, point.longitude, point.altitude);
            return
        };

        for (i, axis) in self.state.wall_axes.iter_mut().enumerate() {
            axis.push(Lla::new(
                point.latitude,
                point.longitude,
                i as f64 * WALL_AXES_SEPARATION + self.home.altitude as f64
            ));
        }

        self.segments.push(Segment {
            start: previous,
            end: point,
            timestamp,
            airspeed: self.airspeed as f64,
        });

        // wraps if log time runs backwards, e.g. concatenated logs
        if timestamp.wrapping_sub(self.state.last_keyframe) > KEYFRAME_INTERVAL_MS {
            self.keyframes.push(Keyframe {
                point,
                interval_start: self.state.last_keyframe,
                interval_end: timestamp,
                heading: self.yaw as f64,
                airspeed: self.airspeed as f64,
            });
            self.state.last_keyframe = timestamp;
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Number of position updates dropped for lack of
    /// home location or GPS fix.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Assemble the output document. `epoch` is the wall clock
    /// time that log time `0` is mapped to.
    pub fn finish(self, epoch: OffsetDateTime) -> TrackDocument {
        TrackDocument::assemble(self.segments, self.keyframes, self.state.wall_axes, epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WALL_AXES_COUNT;

    fn ready() -> TrackBuilder {
        let mut builder = TrackBuilder::new();
        builder.update(0, Telemetry::HomeLocation(HomeLocation {
            set: true,
            latitude: 473_977_420,
            longitude: 85_455_940,
            altitude: 488.0
        }));
        builder.update(0, Telemetry::GpsPosition{status: GpsStatus::Fix3D});
        builder
    }

    fn position(builder: &mut TrackBuilder, timestamp: u32, north: f32) {
        builder.update(timestamp, Telemetry::Position(Ned::new(north, 0.0, -10.0)));
    }

    #[test]
    fn first_sample_only_seeds() {
        let mut builder = ready();
        position(&mut builder, 0, 0.0);
        assert!(builder.state().is_tracking());
        assert!(builder.segments().is_empty());
        assert!(builder.keyframes().is_empty());
        assert!(builder.state().wall_axes.iter().all(|a| a.is_empty()));

        position(&mut builder, 100, 1.0);
        assert_eq!(builder.segments().len(), 1);
        assert_eq!(builder.segments()[0].timestamp, 100);
    }

    #[test]
    fn keyframe_interval() {
        let mut builder = ready();
        for ts in [0, 1999, 2001] {
            position(&mut builder, ts, ts as f32 / 100.0);
        }
        assert_eq!(builder.segments().len(), 2);
        assert_eq!(builder.keyframes().len(), 1);
        let keyframe = builder.keyframes()[0];
        assert_eq!(keyframe.interval_start, 0);
        assert_eq!(keyframe.interval_end, 2001);
        assert_eq!(builder.state().last_keyframe, 2001);
    }

    #[test]
    fn exactly_interval_is_not_enough() {
        let mut builder = ready();
        position(&mut builder, 0, 0.0);
        position(&mut builder, KEYFRAME_INTERVAL_MS, 1.0);
        assert!(builder.keyframes().is_empty());
    }

    #[test]
    fn log_time_reset_restarts_keyframes() {
        let mut builder = ready();
        for ts in [10_000, 12_500, 500, 3000, 6000, 9000] {
            position(&mut builder, ts, ts as f32 / 100.0);
        }
        let times: Vec<u32> = builder.keyframes().iter().map(|k| k.interval_end).collect();
        assert_eq!(times, vec![12_500, 500, 3000, 6000, 9000]);
        assert_eq!(builder.keyframes()[1].interval_start, 12_500);
        assert_eq!(builder.state().last_keyframe, 9000);
        assert_eq!(builder.segments().len(), 5);
    }

    #[test]
    fn wall_axes_altitudes() {
        let mut builder = ready();
        position(&mut builder, 0, 0.0);
        position(&mut builder, 100, 5.0);
        position(&mut builder, 200, 10.0);

        let axes = &builder.state().wall_axes;
        assert_eq!(axes.len(), WALL_AXES_COUNT);
        for (i, axis) in axes.iter().enumerate() {
            assert_eq!(axis.len(), 2);
            assert_eq!(axis[1].altitude, i as f64 * WALL_AXES_SEPARATION + 488.0);
            assert_eq!(axis[1].latitude, builder.segments()[1].end.latitude);
        }
    }

    #[test]
    fn keyframe_takes_cached_attitude_and_airspeed() {
        let mut builder = ready();
        builder.update(0, Telemetry::Attitude{yaw: 90.0});
        builder.update(0, Telemetry::Airspeed{calibrated: 12.5});
        builder.update(0, Telemetry::Velocity(Ned::new(3.0, 4.0, 0.0)));
        position(&mut builder, 0, 0.0);
        position(&mut builder, 2500, 1.0);

        let keyframe = builder.keyframes()[0];
        assert_eq!(keyframe.heading, 90.0);
        assert_eq!(keyframe.airspeed, 12.5);
        assert_eq!(keyframe.point.groundspeed, 5.0);
        assert_eq!(builder.segments()[0].airspeed, 12.5);
    }

    #[test]
    fn no_home_or_fix_drops_samples() {
        let mut builder = TrackBuilder::new();
        builder.update(0, Telemetry::GpsPosition{status: GpsStatus::Fix3D});
        position(&mut builder, 0, 0.0);
        position(&mut builder, 3000, 1.0);
        assert!(!builder.state().is_tracking());
        assert_eq!(builder.dropped(), 2);

        let mut builder = ready();
        builder.update(0, Telemetry::GpsPosition{status: GpsStatus::NoFix});
        position(&mut builder, 0, 0.0);
        assert_eq!(builder.state(), &TrackState::default());
        assert!(builder.segments().is_empty());

        builder.update(0, Telemetry::GpsPosition{status: GpsStatus::Fix2D});
        position(&mut builder, 0, 0.0);
        assert!(builder.state().is_tracking());
    }

    fn home(set: bool) -> Telemetry {
        Telemetry::HomeLocation(HomeLocation {
            set,
            latitude: 473_977_420,
            longitude: 85_455_940,
            altitude: 488.0
        })
    }

    #[test]
    fn segment_skips_sample_without_fix() {
        let mut builder = ready();
        position(&mut builder, 0, 0.0);
        let first = builder.state().previous.unwrap();

        builder.update(100, Telemetry::GpsPosition{status: GpsStatus::NoFix});
        position(&mut builder, 100, 5000.0);
        assert_eq!(builder.dropped(), 1);

        builder.update(200, Telemetry::GpsPosition{status: GpsStatus::Fix2D});
        position(&mut builder, 200, 10.0);
        let third = builder.state().previous.unwrap();

        assert_eq!(builder.segments().len(), 1);
        let segment = builder.segments()[0];
        assert_eq!(segment.start, first);
        assert_eq!(segment.end, third);
        assert_eq!(segment.timestamp, 200);
        assert!(builder.state().wall_axes.iter().all(|a| a.len() == 1));
    }

    #[test]
    fn segment_skips_sample_without_home() {
        let mut builder = ready();
        position(&mut builder, 0, 0.0);
        let first = builder.state().previous.unwrap();

        builder.update(100, home(false));
        position(&mut builder, 100, 5000.0);
        assert_eq!(builder.dropped(), 1);

        builder.update(200, home(true));
        position(&mut builder, 200, 10.0);
        let third = builder.state().previous.unwrap();

        assert_eq!(builder.segments().len(), 1);
        assert_eq!(builder.segments()[0].start, first);
        assert_eq!(builder.segments()[0].end, third);
    }
}
