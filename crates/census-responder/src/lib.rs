//! Census Responder - UDP serving loop for crawler pings
//!
//! Binds a UDP socket, decodes each inbound crawler ping, builds a peer
//! snapshot pong from the registry, and sends it straight back to the
//! source address. One datagram in, at most one datagram out; malformed
//! pings are logged and dropped without a reply.

pub mod config;
pub mod service;

pub use config::{Config, StaticPeer};
pub use service::Responder;
