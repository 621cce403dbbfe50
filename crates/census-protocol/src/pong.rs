//! Pong payload encoding: header plus a run of fixed-stride peer records.
//!
//! Which optional fields exist, and therefore the per-record stride, is
//! controlled entirely by the request's format byte. The buffer is
//! allocated at its exact final size up front; the optional user-agent
//! block (see [`crate::agents`]) is the only thing appended afterwards.

use crate::error::ProtocolError;
use crate::features::Features;
use crate::peer::{pack_endpoint, PeerRecord, ENDPOINT_LEN};
use crate::ping::CrawlerPing;

/// Registry-wide statistics the pong header can carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponderStats {
    pub average_uptime_millis: u64,
}

/// Header size implied by the requested features.
///
/// Always 3 bytes (two counts + format echo), plus 4 for the average
/// uptime, plus 1 reserved byte when DHT status is requested. The
/// reserved byte shifts the record offset but is always zero: the wire
/// format defines no payload for it.
pub fn header_len(features: Features) -> usize {
    let mut len = 3;
    if features.contains(Features::NODE_UPTIME) {
        len += 4;
    }
    if features.contains(Features::DHT_STATUS) {
        len += 1;
    }
    len
}

/// Bytes occupied by each peer record for the requested features.
pub fn record_stride(features: Features) -> usize {
    let mut stride = ENDPOINT_LEN;
    if features.contains(Features::CONNECTION_TIME) {
        stride += 2;
    }
    if features.contains(Features::LOCALE_INFO) {
        stride += 2;
    }
    if features.contains(Features::REPLY_COUNTS) {
        stride += 4;
    }
    stride
}

/// Serialize the pong header and peer records into one exactly-sized
/// buffer. Supernodes are written first, then leaves, in the order the
/// selector produced them.
///
/// `now_millis` is captured once by the caller so every record's
/// connection age is computed against the same instant.
///
/// The one-byte count fields cap each class at 255 records; callers are
/// expected to bound the selection upstream. This is a wire constraint,
/// not something the encoder can widen.
pub fn encode_pong(
    ping: &CrawlerPing,
    supernodes: &[PeerRecord],
    leaves: &[PeerRecord],
    stats: &ResponderStats,
    now_millis: i64,
) -> Result<Vec<u8>, ProtocolError> {
    let features = ping.features;
    let stride = record_stride(features);
    let total = supernodes.len() + leaves.len();

    let mut payload = vec![0u8; header_len(features) + total * stride];
    payload[0] = supernodes.len() as u8;
    payload[1] = leaves.len() as u8;
    payload[2] = ping.format_echo();

    let mut index = 3;
    if features.contains(Features::NODE_UPTIME) {
        let seconds = (stats.average_uptime_millis / 1000).min(i32::MAX as u64) as u32;
        payload[index..index + 4].copy_from_slice(&seconds.to_le_bytes());
        index += 4;
    }
    if features.contains(Features::DHT_STATUS) {
        // Reserved byte, left zero.
        index += 1;
    }

    for record in supernodes.iter().chain(leaves) {
        let token = pack_endpoint(&record.addr)?;
        payload[index..index + ENDPOINT_LEN].copy_from_slice(&token);
        index += ENDPOINT_LEN;

        if features.contains(Features::CONNECTION_TIME) {
            let minutes = ((now_millis - record.connected_at_millis) / 60_000) as i16;
            payload[index..index + 2].copy_from_slice(&minutes.to_le_bytes());
            index += 2;
        }

        if features.contains(Features::LOCALE_INFO) {
            payload[index..index + 2].copy_from_slice(&record.locale.as_bytes());
            index += 2;
        }

        if features.contains(Features::REPLY_COUNTS) {
            let replies = record.reply_count.min(i32::MAX as u64) as u32;
            payload[index..index + 4].copy_from_slice(&replies.to_le_bytes());
            index += 4;
        }
    }

    Ok(payload)
}
