use std::fmt;
use std::net::SocketAddr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProtocolError;

/// Length of the packed address+port token.
pub const ENDPOINT_LEN: usize = 6;

/// Two-byte language/region tag, e.g. `en` or `fr`.
///
/// Carried raw on the wire with no validation or padding; the type fixes
/// the width so a short tag can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale(pub [u8; 2]);

impl Locale {
    pub const EN: Locale = Locale(*b"en");

    /// Parse a config-supplied tag. Exactly two bytes, nothing else.
    pub fn from_tag(tag: &str) -> Result<Self, ProtocolError> {
        let bytes = tag.as_bytes();
        match bytes.try_into() {
            Ok(pair) => Ok(Self(pair)),
            Err(_) => Err(ProtocolError::InvalidLocale(tag.to_string())),
        }
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::from_tag(&tag).map_err(D::Error::custom)
    }
}

/// Everything the pong encoder needs to know about one neighbor
/// connection. Read-only: records are copied out of the registry and into
/// the payload, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub addr: SocketAddr,
    /// Unix milliseconds when the connection was established.
    pub connected_at_millis: i64,
    pub locale: Locale,
    /// Accepted query replies observed on this connection.
    pub reply_count: u64,
    pub user_agent: String,
}

/// Pack an endpoint into the canonical 6-byte token: four address octets
/// in network order followed by the port in little-endian.
///
/// Only IPv4 endpoints are representable. A non-IPv4 peer here is an
/// upstream invariant violation, so the caller aborts the build rather
/// than emit a corrupt token.
pub fn pack_endpoint(addr: &SocketAddr) -> Result<[u8; ENDPOINT_LEN], ProtocolError> {
    match addr {
        SocketAddr::V4(v4) => {
            let mut token = [0u8; ENDPOINT_LEN];
            token[..4].copy_from_slice(&v4.ip().octets());
            token[4..].copy_from_slice(&v4.port().to_le_bytes());
            Ok(token)
        }
        SocketAddr::V6(_) => Err(ProtocolError::UnpackableAddress(*addr)),
    }
}
