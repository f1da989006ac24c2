use std::{fs::File, io::{Cursor, Read}, path::Path};

use binrw::BinWriterExt;
use flightlog_kml::{
    ExportOptions,
    Exporter,
    FlightLogError,
    ObjectTable,
    OutputMode,
    Warning,
    telemetry::{
        objects::{GpsPositionData, HomeLocationData, NedData},
        uavtalk::encode_object,
    },
};
use time::macros::datetime;

const HOME_ID: u32 = 0x0000_1001;
const POSITION_ID: u32 = 0x0000_1002;
const VELOCITY_ID: u32 = 0x0000_1003;
const GPS_ID: u32 = 0x0000_1004;

const OBJECTS: &str = "
HomeLocation   = 0x00001001
PositionActual = 0x00001002
VelocityActual = 0x00001003
GPSPosition    = 0x00001004
";

const HEADER: &[u8] = b"v1\nabc123\ndef456\n##\n";

fn packet(object_id: u32, write: impl FnOnce(&mut Cursor<Vec<u8>>) -> binrw::BinResult<()>) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    write(&mut cursor).unwrap();
    encode_object(object_id, cursor.get_ref())
}

fn position(north: f32) -> Vec<u8> {
    packet(POSITION_ID, |c| c.write_le(&NedData{north, east: 0.0, down: -10.0}))
}

fn frame(timestamp: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = timestamp.to_le_bytes().to_vec();
    bytes.extend((payload.len() as i64).to_le_bytes());
    bytes.extend(payload);
    bytes
}

/// Home, GPS fix, velocity and a first position at 1000 ms,
/// then positions at 1002000 ms and 1004100 ms.
fn frames() -> Vec<Vec<u8>> {
    let mut first = packet(HOME_ID, |c| c.write_le(&HomeLocationData {
        latitude: 473_977_420,
        longitude: 85_455_940,
        altitude: 488.0,
        set: 1,
        ..Default::default()
    }));
    first.extend(packet(GPS_ID, |c| c.write_le(&GpsPositionData{status: 3, satellites: 9, ..Default::default()})));
    first.extend(packet(VELOCITY_ID, |c| c.write_le(&NedData{north: 8.0, east: 6.0, down: 0.0})));
    first.extend(position(0.0));

    vec![
        frame(1000, &first),
        frame(1_002_000, &position(100.0)),
        frame(1_004_100, &position(200.0)),
    ]
}

fn options() -> ExportOptions {
    ExportOptions {
        expected_build_hash: Some("abc123".into()),
        expected_schema_hash: Some("def456".into()),
        epoch: datetime!(2014-06-01 10:00:00 UTC),
        objects: ObjectTable::parse(OBJECTS).unwrap(),
    }
}

fn write_log(dir: &Path, frames: &[Vec<u8>]) -> std::path::PathBuf {
    let path = dir.join("flight.opl");
    let mut bytes = HEADER.to_vec();
    for frame in frames {
        bytes.extend(frame);
    }
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn export_kml() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &frames());
    let output = dir.path().join("flight.kml");

    let report = Exporter::new(&input, &output)
        .with_options(options())
        .export()
        .unwrap();

    assert_eq!(report.frames_indexed, 3);
    assert_eq!(report.frames_streamed, 3);
    assert_eq!(report.segments, 2);
    // 1002000 - 0 > 2000 and 1004100 - 1002000 > 2000
    assert_eq!(report.keyframes, 2);
    assert!(report.is_complete());
    assert!(report.warnings.is_empty());
    assert_eq!(report.output_mode, OutputMode::Kml);

    let kml = std::fs::read_to_string(&output).unwrap();
    // 2 segments + 2 keyframes + ground track + 5 wall axes
    assert_eq!(kml.matches("<Placemark>").count(), 10);
    assert!(kml.contains("<name>1002</name>"));
    assert!(kml.contains("<name>1004.1</name>"));
    // 1004100 ms after the epoch
    assert!(kml.contains("<name>2014-06-01T10:16:44Z</name>"));
    // groundspeed hypot(8, 6) = 10 m/s
    assert!(kml.contains("Groundspeed: 10.00 m/s"));
}

#[test]
fn export_kmz() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &frames());
    let output = dir.path().join("flight.KMZ");

    let report = Exporter::new(&input, &output)
        .with_options(options())
        .export()
        .unwrap();
    assert_eq!(report.output_mode, OutputMode::Kmz);

    let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
    let mut kml = String::new();
    archive.by_name("doc.kml").unwrap().read_to_string(&mut kml).unwrap();
    assert!(kml.contains("<name>Ground track</name>"));
}

#[test]
fn unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &frames());
    let output = dir.path().join("flight.gpx");

    let result = Exporter::new(&input, &output).with_options(options()).export();
    assert!(matches!(result, Err(FlightLogError::UnsupportedExtension(_))));
    assert!(!output.exists());
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("flight.kml");

    let result = Exporter::new(&dir.path().join("missing.opl"), &output).export();
    assert!(matches!(result, Err(FlightLogError::OpenFailed{..})));
    assert!(!output.exists());
}

#[test]
fn empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &[]);
    let output = dir.path().join("flight.kml");

    let result = Exporter::new(&input, &output).with_options(options()).export();
    assert!(matches!(result, Err(FlightLogError::EmptyLog(_))));
    assert!(!output.exists());
}

#[test]
fn hash_mismatch_warns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &frames());
    let output = dir.path().join("flight.kml");

    let options = ExportOptions {
        expected_schema_hash: Some("other".into()),
        ..options()
    };
    let report = Exporter::new(&input, &output).with_options(options).export().unwrap();
    assert_eq!(report.warnings, vec![Warning::LikelyIncompatible{
        build_hash: "abc123".into(),
        schema_hash: "def456".into()
    }]);
    assert_eq!(report.segments, 2);
}

#[test]
fn corrupt_header_truncates_export() {
    let mut frames = frames();
    // Pad the last frame past 256 payload bytes. With a one byte payload length,
    // a misaligned header straddling its timestamp and length would pass the sync check.
    frames[2] = frame(1_004_100, &[position(200.0), vec![0; 300]].concat());
    // valid timestamp, length with bit 48 set
    let mut corrupt = 0_u32.to_le_bytes().to_vec();
    corrupt.extend((1_i64 << 48).to_le_bytes());
    frames.insert(2, corrupt);

    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &frames);
    let output = dir.path().join("flight.kml");

    let report = Exporter::new(&input, &output)
        .with_options(options())
        .export()
        .unwrap();

    // pass 1 realigns with the last frame
    assert_eq!(report.frames_indexed, 3);
    assert!(report.warnings.iter().any(|w| matches!(w, Warning::CorruptFraming{..})));
    // pass 2 stops at the corrupt header, keeping the first segment
    assert_eq!(report.frames_streamed, 2);
    assert!(report.truncated);
    assert_eq!(report.segments, 1);
    assert!(report.warnings.iter().any(|w| matches!(w, Warning::InvalidPayloadLength{..})));
    assert!(output.exists());
}

#[test]
fn no_home_location_no_track() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &[
        frame(1000, &position(0.0)),
        frame(5000, &position(10.0)),
    ]);
    let output = dir.path().join("flight.kml");

    let report = Exporter::new(&input, &output)
        .with_options(options())
        .export()
        .unwrap();
    assert_eq!(report.segments, 0);
    assert_eq!(report.dropped_positions, 2);
    assert!(report.is_complete());
}
