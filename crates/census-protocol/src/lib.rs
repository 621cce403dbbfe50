//! Census Protocol - wire format for the overlay crawler ping/pong exchange
//!
//! A crawler sends a 3-byte UDP ping asking a node for a snapshot of its
//! neighbor connections. The node answers with a compact, variable-layout
//! binary pong: one-byte supernode/leaf counts, an echoed format byte,
//! optional header fields, a run of fixed-stride peer records, and an
//! optional gzip-compressed block of user-agent strings.
//!
//! This crate owns the byte-level encoding and decoding only. Which peers
//! end up in a pong is decided by the selector in `census-registry`.

pub mod agents;
pub mod error;
pub mod features;
pub mod peer;
pub mod ping;
pub mod pong;

pub use agents::{append_agent_block, compress_agent_block, join_agents, AGENT_SEPARATOR};
pub use error::ProtocolError;
pub use features::Features;
pub use peer::{pack_endpoint, Locale, PeerRecord, ENDPOINT_LEN};
pub use ping::{CrawlerPing, RequestedCount, COUNT_ALL, PING_LEN};
pub use pong::{encode_pong, header_len, record_stride, ResponderStats};
