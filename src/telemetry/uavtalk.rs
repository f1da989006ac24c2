//! UAVTalk packet framing.
//!
//! ```text
//! sync (0x3C) | type | length (u16) | object id (u32) | instance id (u16) | [timestamp (u16)] | payload | crc8
//! ```
//!
//! All integers little-endian. `length` covers everything
//! from sync through payload, not the CRC.
//! The CRC is CRC-8 (polynomial 0x07, initial value 0)
//! over the same range.

use tracing::debug;

use super::{ObjectTable, Telemetry, TelemetryDecoder};

pub const SYNC: u8 = 0x3C;
/// Version bits that must be set in the type byte.
pub const TYPE_VERSION: u8 = 0x20;
pub const TYPE_MASK: u8 = 0x78;
/// Object data.
pub const TYPE_OBJ: u8 = 0x20;
/// Object data, acknowledge requested.
pub const TYPE_OBJ_ACK: u8 = 0x22;
/// Set for packets with a 16-bit timestamp after the instance id.
pub const TYPE_TIMESTAMPED: u8 = 0x80;
/// sync + type + length + object id + instance id
pub const MIN_HEADER_LENGTH: usize = 10;
pub const MAX_PAYLOAD_LENGTH: usize = 255;

/// Packet counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecoderStats {
    /// Packets with valid CRC.
    pub packets: usize,
    /// Packets dropped on CRC mismatch.
    pub crc_errors: usize,
    /// Valid packets for objects not in the table.
    pub unknown_objects: usize,
    /// Known objects whose payload could not be decoded.
    pub decode_errors: usize,
}

/// UAVTalk decoder. Only object data packets for objects
/// listed in the `ObjectTable` produce updates.
#[derive(Debug, Default)]
pub struct UavTalkDecoder {
    table: ObjectTable,
    buffer: Vec<u8>,
    /// Total packet size including CRC, known once the length field is read.
    expected: usize,
    stats: DecoderStats,
}

impl UavTalkDecoder {
    pub fn new(table: ObjectTable) -> Self {
        Self {
            table,
            ..Default::default()
        }
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.expected = 0;
    }

    fn header_length(packet_type: u8) -> usize {
        match packet_type & TYPE_TIMESTAMPED {
            0 => MIN_HEADER_LENGTH,
            _ => MIN_HEADER_LENGTH + 2
        }
    }

    fn finish(&mut self, emit: &mut dyn FnMut(Telemetry)) {
        let (packet, crc) = self.buffer.split_at(self.expected - 1);
        if crc8(packet) != crc[0] {
            debug!("UAVTalk CRC mismatch");
            self.stats.crc_errors += 1;
            return
        }
        self.stats.packets += 1;

        let packet_type = packet[1];
        if !matches!(packet_type & !TYPE_TIMESTAMPED, TYPE_OBJ | TYPE_OBJ_ACK) {
            return
        }

        let object_id = u32::from_le_bytes([packet[4], packet[5], packet[6], packet[7]]);
        let Some(kind) = self.table.get(object_id) else {
            self.stats.unknown_objects += 1;
            return
        };

        let payload = &packet[Self::header_length(packet_type)..];
        match kind.decode(payload) {
            Ok(telemetry) => emit(telemetry),
            Err(err) => {
                debug!("Failed to decode {}: {err}", kind.to_str());
                self.stats.decode_errors += 1;
            }
        }
    }
}

impl TelemetryDecoder for UavTalkDecoder {
    fn process_byte(&mut self, byte: u8, emit: &mut dyn FnMut(Telemetry)) {
        if self.buffer.is_empty() && byte != SYNC {
            return
        }
        self.buffer.push(byte);

        match self.buffer.len() {
            2 => if byte & TYPE_MASK != TYPE_VERSION {
                self.reset();
            },
            4 => {
                let length = u16::from_le_bytes([self.buffer[2], self.buffer[3]]) as usize;
                let header_length = Self::header_length(self.buffer[1]);
                if length < header_length || length > header_length + MAX_PAYLOAD_LENGTH {
                    self.reset();
                } else {
                    self.expected = length + 1;
                }
            },
            n if self.expected > 0 && n == self.expected => {
                self.finish(emit);
                self.reset();
            },
            _ => ()
        }
    }
}

/// CRC-8, polynomial 0x07.
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0_u8, |crc, byte| {
        let mut c = crc ^ byte;
        for _ in 0..8 {
            c = match c & 0x80 {
                0 => c << 1,
                _ => (c << 1) ^ 0x07
            };
        }
        c
    })
}

/// Build an object data packet (instance 0) for `object_id`.
pub fn encode_object(object_id: u32, payload: &[u8]) -> Vec<u8> {
    let length = (MIN_HEADER_LENGTH + payload.len()) as u16;
    let mut packet = vec![SYNC, TYPE_OBJ];
    packet.extend(length.to_le_bytes());
    packet.extend(object_id.to_le_bytes());
    packet.extend(0_u16.to_le_bytes());
    packet.extend(payload);
    packet.push(crc8(&packet));
    packet
}
