use std::net::SocketAddr;

use crate::ping::PING_LEN;

/// Errors raised while encoding or decoding crawler messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Inbound ping datagram shorter than the fixed 3-byte layout.
    #[error("crawler ping payload too short: {0} bytes, need {PING_LEN}")]
    TruncatedPing(usize),

    /// A selected peer's endpoint cannot be packed into the 6-byte
    /// address+port token. Peers enter the registry with resolved IPv4
    /// endpoints, so hitting this means a broken invariant upstream.
    #[error("cannot pack endpoint {0} into a 6-byte token")]
    UnpackableAddress(SocketAddr),

    /// Locale tags are exactly two bytes on the wire.
    #[error("locale tag must be exactly 2 bytes, got {0:?}")]
    InvalidLocale(String),

    /// Gzip stream failure while building the user-agent block.
    #[error("user-agent block compression failed: {0}")]
    Compression(#[from] std::io::Error),
}
