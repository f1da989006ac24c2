/// Vehicle velocity in m/s which corresponds to the last color in the color map.
pub const MAX_VELOCITY: f64 = 20.0;
/// Number of vertical wall axes plotted below the track.
pub const WALL_AXES_COUNT: usize = 5;
/// Height separation between wall axes in meters.
pub const WALL_AXES_SEPARATION: f64 = 20.0;
/// Log time in milliseconds that must pass before a new keyframe is emitted.
pub const KEYFRAME_INTERVAL_MS: u32 = 2000;
/// Size of a frame header: `u32` timestamp + `i64` payload length.
pub const FRAME_HEADER_SIZE: u64 = 12;
/// Bits of the payload length field that must be zero.
/// The log format has no dedicated sync marker, so this is the only framing check.
pub const FRAME_SYNC_MASK: i64 = !0xFFFF;
/// Smallest payload accepted while streaming.
pub const MIN_PAYLOAD_SIZE: i64 = 1;
/// Largest payload accepted while streaming (1 MiB).
pub const MAX_PAYLOAD_SIZE: i64 = 1024 * 1024;
/// Leading header attempts that may fail before frame sync is reported as not found.
pub const MAX_LEADING_SYNC_ATTEMPTS: usize = 10;
/// Lines searched for the header separator after the three header lines.
pub const MAX_HEADER_SEARCH_LINES: usize = 10;
/// Header/body separator line.
pub const HEADER_SEPARATOR: &str = "##";
/// Name of the KML document inside a KMZ archive.
pub const KMZ_DOC_NAME: &str = "doc.kml";
/// Alpha used for the extruded "curtain" below track segments.
pub const SEGMENT_POLY_ALPHA: u8 = 100;
