use crate::error::ProtocolError;
use crate::features::Features;

/// Wire sentinel in a count byte meaning "every peer of this class".
pub const COUNT_ALL: u8 = 0xFF;

/// Fixed length of a crawler ping payload.
pub const PING_LEN: usize = 3;

/// How many peers of one class a crawler asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedCount {
    /// No bound: send everything (wire value 0xFF).
    All,
    /// At most this many peers. Zero is valid and yields no records.
    Exactly(u8),
}

impl RequestedCount {
    pub fn from_wire(raw: u8) -> Self {
        if raw == COUNT_ALL {
            Self::All
        } else {
            Self::Exactly(raw)
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Self::All => COUNT_ALL,
            Self::Exactly(n) => n,
        }
    }
}

/// A decoded crawler ping: how many supernodes and leaves the crawler
/// wants, and which optional record fields it asked for.
///
/// Layout: `[0]` supernode count, `[1]` leaf count, `[2]` format byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlerPing {
    pub supernode_count: RequestedCount,
    pub leaf_count: RequestedCount,
    pub features: Features,
}

impl CrawlerPing {
    pub fn new(
        supernode_count: RequestedCount,
        leaf_count: RequestedCount,
        features: Features,
    ) -> Self {
        Self {
            supernode_count,
            leaf_count,
            features,
        }
    }

    /// Decode a ping datagram. Unrecognized format bits are dropped, not
    /// rejected; anything shorter than 3 bytes is refused.
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        if payload.len() < PING_LEN {
            return Err(ProtocolError::TruncatedPing(payload.len()));
        }
        Ok(Self {
            supernode_count: RequestedCount::from_wire(payload[0]),
            leaf_count: RequestedCount::from_wire(payload[1]),
            features: Features::from_bits_truncate(payload[2]),
        })
    }

    pub fn encode(&self) -> [u8; PING_LEN] {
        [
            self.supernode_count.to_wire(),
            self.leaf_count.to_wire(),
            self.features.bits(),
        ]
    }

    /// The format byte echoed back in the pong header: the requested
    /// format masked to the bits this responder recognizes.
    pub fn format_echo(&self) -> u8 {
        self.features.bits()
    }

    pub fn wants_connection_time(&self) -> bool {
        self.features.contains(Features::CONNECTION_TIME)
    }

    pub fn wants_locale(&self) -> bool {
        self.features.contains(Features::LOCALE_INFO)
    }

    pub fn new_only(&self) -> bool {
        self.features.contains(Features::NEW_ONLY)
    }

    pub fn wants_user_agents(&self) -> bool {
        self.features.contains(Features::USER_AGENTS)
    }

    pub fn wants_node_uptime(&self) -> bool {
        self.features.contains(Features::NODE_UPTIME)
    }

    pub fn wants_reply_counts(&self) -> bool {
        self.features.contains(Features::REPLY_COUNTS)
    }

    pub fn wants_dht_status(&self) -> bool {
        self.features.contains(Features::DHT_STATUS)
    }
}
