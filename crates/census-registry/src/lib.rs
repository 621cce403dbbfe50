//! Census Registry - neighbor bookkeeping and crawler pong assembly
//!
//! Sits between the connection-management side of the node (which owns
//! the live neighbor set) and the wire layer in `census-protocol`. The
//! [`RegistryView`] trait is the read-only window the pong build looks
//! through; [`select_peers`] applies the request's filtering and ranking
//! policy; [`PongBuilder`] runs the whole pipeline for one ping.

pub mod builder;
pub mod registry;
pub mod selector;

pub use builder::{PongBuilder, ResponderConfig};
pub use registry::{InMemoryRegistry, Neighbor, RegistryView};
pub use selector::{select_peers, Selection};
