//! Telemetry objects consumed by the exporter, their payload layouts
//! and the table mapping object ids to them.
//!
//! Object ids depend on the object definitions the flight software was
//! built with (see the schema hash in the log header), so they are not
//! hard-coded but loaded from a table:
//!
//! ```text
//! # object = id
//! HomeLocation   = 0x<id>
//! PositionActual = 0x<id>
//! ```
//!
//! Payloads are little-endian and fields are ordered by size, largest first,
//! with definition order kept for equal sizes. Only the leading fields that
//! the exporter needs are required, trailing fields are ignored.

use std::{collections::HashMap, io::Cursor, path::Path};

use binrw::{binrw, BinReaderExt};

use crate::FlightLogError;

use super::{GpsStatus, HomeLocation, Ned, Telemetry};

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HomeLocationData {
    pub latitude: i32,
    pub longitude: i32,
    pub altitude: f32,
    pub be: [f32; 3],
    pub g_e: f32,
    pub set: u8,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NedData {
    pub north: f32,
    pub east: f32,
    pub down: f32,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttitudeActualData {
    pub q: [f32; 4],
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AirspeedActualData {
    pub calibrated_airspeed: f32,
    pub true_airspeed: f32,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GpsPositionData {
    pub latitude: i32,
    pub longitude: i32,
    pub altitude: f32,
    pub geoid_separation: f32,
    pub heading: f32,
    pub groundspeed: f32,
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
    pub status: u8,
    pub satellites: i8,
}

/// Telemetry objects the exporter listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    HomeLocation,
    PositionActual,
    VelocityActual,
    AttitudeActual,
    AirspeedActual,
    GpsPosition,
}

impl ObjectKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HomeLocation" => Some(Self::HomeLocation),
            "PositionActual" => Some(Self::PositionActual),
            "VelocityActual" => Some(Self::VelocityActual),
            "AttitudeActual" => Some(Self::AttitudeActual),
            "AirspeedActual" => Some(Self::AirspeedActual),
            "GPSPosition" | "GpsPosition" => Some(Self::GpsPosition),
            _ => None
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::HomeLocation => "HomeLocation",
            Self::PositionActual => "PositionActual",
            Self::VelocityActual => "VelocityActual",
            Self::AttitudeActual => "AttitudeActual",
            Self::AirspeedActual => "AirspeedActual",
            Self::GpsPosition => "GPSPosition",
        }
    }

    /// Decode object payload.
    pub fn decode(&self, payload: &[u8]) -> Result<Telemetry, FlightLogError> {
        let mut cursor = Cursor::new(payload);
        let telemetry = match self {
            Self::HomeLocation => {
                let data: HomeLocationData = cursor.read_le()?;
                Telemetry::HomeLocation(HomeLocation {
                    set: data.set != 0,
                    latitude: data.latitude,
                    longitude: data.longitude,
                    altitude: data.altitude,
                })
            },
            Self::PositionActual => {
                let data: NedData = cursor.read_le()?;
                Telemetry::Position(Ned::new(data.north, data.east, data.down))
            },
            Self::VelocityActual => {
                let data: NedData = cursor.read_le()?;
                Telemetry::Velocity(Ned::new(data.north, data.east, data.down))
            },
            Self::AttitudeActual => {
                let data: AttitudeActualData = cursor.read_le()?;
                Telemetry::Attitude{yaw: data.yaw}
            },
            Self::AirspeedActual => {
                let data: AirspeedActualData = cursor.read_le()?;
                Telemetry::Airspeed{calibrated: data.calibrated_airspeed}
            },
            Self::GpsPosition => {
                let data: GpsPositionData = cursor.read_le()?;
                Telemetry::GpsPosition{status: GpsStatus::from(data.status)}
            },
        };
        Ok(telemetry)
    }
}

/// Object id to `ObjectKind` lookup.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjectTable(HashMap<u32, ObjectKind>);

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load table from a text file, one `Name = id` per line.
    pub fn from_path(path: &Path) -> Result<Self, FlightLogError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse `Name = id` lines. Ids are hexadecimal with a `0x` prefix,
    /// decimal otherwise. `#` starts a comment.
    pub fn parse(text: &str) -> Result<Self, FlightLogError> {
        let mut table = Self::new();

        for (i, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue
            }

            let invalid = || FlightLogError::InvalidObjectTable{
                line: i + 1,
                content: line.to_owned()
            };

            let (name, id) = content.split_once('=').ok_or_else(invalid)?;
            let kind = ObjectKind::from_name(name.trim()).ok_or_else(invalid)?;
            let id = id.trim();
            let id = match id.strip_prefix("0x").or_else(|| id.strip_prefix("0X")) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => id.parse::<u32>()
            }.map_err(|_| invalid())?;

            table.insert(id, kind);
        }

        Ok(table)
    }

    pub fn insert(&mut self, id: u32, kind: ObjectKind) {
        self.0.insert(id, kind);
    }

    pub fn get(&self, id: u32) -> Option<ObjectKind> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use binrw::BinWriterExt;

    use super::*;

    #[test]
    fn parse_table() {
        let table = ObjectTable::parse("
            # exported objects
            HomeLocation = 0x6185DC6E
            GPSPosition  = 0XE2A323B6 # fix
            AirspeedActual = 42
        ").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0x6185DC6E), Some(ObjectKind::HomeLocation));
        assert_eq!(table.get(0xE2A323B6), Some(ObjectKind::GpsPosition));
        assert_eq!(table.get(42), Some(ObjectKind::AirspeedActual));
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn parse_table_rejects_unknown_object() {
        let err = ObjectTable::parse("HomeLocation = 0x1\nFlightBattery = 0x2\n").unwrap_err();
        assert!(matches!(err, FlightLogError::InvalidObjectTable{line: 2, ..}));
        assert!(ObjectTable::parse("PositionActual 0x1").is_err());
        assert!(ObjectTable::parse("PositionActual = 0xZZ").is_err());
    }

    #[test]
    fn decode_home_location() {
        let data = HomeLocationData {
            latitude: 473_977_420,
            longitude: 85_455_940,
            altitude: 488.0,
            set: 1,
            ..Default::default()
        };
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&data).unwrap();

        let telemetry = ObjectKind::HomeLocation.decode(cursor.get_ref()).unwrap();
        let Telemetry::HomeLocation(home) = telemetry else {
            panic!("expected home location")
        };
        assert!(home.set);
        assert!((home.latitude_deg() - 47.397742).abs() < 1e-9);
        assert_eq!(home.altitude, 488.0);
    }

    #[test]
    fn decode_gps_status_and_short_payload() {
        let data = GpsPositionData{status: 3, satellites: 9, ..Default::default()};
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&data).unwrap();
        assert_eq!(
            ObjectKind::GpsPosition.decode(cursor.get_ref()).unwrap(),
            Telemetry::GpsPosition{status: GpsStatus::Fix3D}
        );

        assert!(ObjectKind::AttitudeActual.decode(&[0; 8]).is_err());
    }
}
