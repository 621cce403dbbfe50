//! The trailing user-agent block: every selected peer's reported agent
//! string, in record order, joined with `;` and gzip-compressed.
//!
//! The block carries its own framing, independent of the record layout:
//! the uncompressed text is prefixed with its 2-byte little-endian length
//! *inside* the gzip stream, and the compressed bytes are appended to the
//! pong behind a second 2-byte little-endian length.

use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

/// Separator between agent entries. Literal separators inside an agent
/// string are escaped with a backslash.
pub const AGENT_SEPARATOR: char = ';';

/// Join agent strings in record order, escaping embedded separators, each
/// entry terminated by a separator. The responder's own agent goes last,
/// with nothing after it, so a block for N records holds N + 1 entries.
pub fn join_agents<'a, I>(agents: I, own_agent: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for agent in agents {
        joined.push_str(&agent.replace(AGENT_SEPARATOR, "\\;"));
        joined.push(AGENT_SEPARATOR);
    }
    joined.push_str(own_agent);
    joined
}

/// Gzip the joined agent text, with the uncompressed byte length packed
/// little-endian into the head of the stream itself.
pub fn compress_agent_block(joined: &str) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(joined.len() / 2 + 16),
        Compression::default(),
    );
    encoder.write_all(&(joined.len() as u16).to_le_bytes())?;
    encoder.write_all(joined.as_bytes())?;
    encoder.finish()
}

/// Append the compressed block to a pong payload behind its own 2-byte
/// little-endian length prefix.
pub fn append_agent_block(payload: &mut Vec<u8>, block: &[u8]) {
    payload.extend_from_slice(&(block.len() as u16).to_le_bytes());
    payload.extend_from_slice(block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_separators_are_escaped() {
        let joined = join_agents(["Agent;1.0", "Other/2.0"], "Census/0.1");
        assert_eq!(joined, "Agent\\;1.0;Other/2.0;Census/0.1");
    }

    #[test]
    fn entry_count_is_records_plus_one() {
        let joined = join_agents(["a", "b", "c"], "me");
        // Unescaped separators delimit entries.
        assert_eq!(joined.split(AGENT_SEPARATOR).count(), 4);
    }

    #[test]
    fn no_records_still_names_the_responder() {
        let joined = join_agents([], "Census/0.1");
        assert_eq!(joined, "Census/0.1");
    }
}
