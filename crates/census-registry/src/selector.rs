//! Selection policy for crawler pongs.
//!
//! Two mutually exclusive ranking modes, switched by the ping's locale
//! flag: a randomized contiguous-slice trim, or locale-preferenced
//! promotion followed by prefix truncation.

use std::collections::HashSet;
use std::net::SocketAddr;

use rand::Rng;

use census_protocol::{CrawlerPing, Locale, PeerRecord, RequestedCount};

use crate::registry::{Neighbor, RegistryView};

/// The two ordered, size-bounded peer lists a pong is built from.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub supernodes: Vec<PeerRecord>,
    pub leaves: Vec<PeerRecord>,
}

impl Selection {
    /// Records in wire order: supernodes first, then leaves.
    pub fn records(&self) -> impl Iterator<Item = &PeerRecord> {
        self.supernodes.iter().chain(self.leaves.iter())
    }

    pub fn len(&self) -> usize {
        self.supernodes.len() + self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supernodes.is_empty() && self.leaves.is_empty()
    }
}

/// Apply the ping's filtering and ranking policy to the current neighbor
/// set.
///
/// Supernode candidates are filtered by a single mode switch: "new only"
/// keeps peers advertising crawler support, the default keeps good
/// supernodes. Every active leaf is a candidate; the leaf-quality filter
/// stays disabled on purpose.
pub fn select_peers<R>(
    registry: &dyn RegistryView,
    ping: &CrawlerPing,
    own_locale: Locale,
    rng: &mut R,
) -> Selection
where
    R: Rng + ?Sized,
{
    let mut supernodes: Vec<PeerRecord> = registry
        .active_supernodes()
        .into_iter()
        .filter(|n| {
            if ping.new_only() {
                n.crawler_support >= 1
            } else {
                n.good_supernode
            }
        })
        .map(|n| n.record)
        .collect();

    let mut leaves: Vec<PeerRecord> = registry
        .active_leaves()
        .into_iter()
        .map(|n| n.record)
        .collect();

    if ping.wants_locale() {
        // The ping carries no locale of its own, so preference the
        // responder's. Matching peers move to the front and the prefix
        // truncation below keeps them preferentially.
        promote(
            &mut supernodes,
            &matched_addrs(registry.supernodes_matching_locale(own_locale)),
        );
        promote(
            &mut leaves,
            &matched_addrs(registry.leaves_matching_locale(own_locale)),
        );
        truncate(&mut supernodes, ping.supernode_count);
        truncate(&mut leaves, ping.leaf_count);
    } else {
        trim_random(&mut supernodes, ping.supernode_count, rng);
        trim_random(&mut leaves, ping.leaf_count, rng);
    }

    Selection { supernodes, leaves }
}

fn matched_addrs(matched: Vec<Neighbor>) -> HashSet<SocketAddr> {
    matched.into_iter().map(|n| n.record.addr).collect()
}

/// Stable reorder: matched peers first, both groups keeping their
/// original relative order.
fn promote(list: &mut Vec<PeerRecord>, matched: &HashSet<SocketAddr>) {
    let (mut front, back): (Vec<_>, Vec<_>) = std::mem::take(list)
        .into_iter()
        .partition(|record| matched.contains(&record.addr));
    front.extend(back);
    *list = front;
}

fn truncate(list: &mut Vec<PeerRecord>, requested: RequestedCount) {
    if let RequestedCount::Exactly(n) = requested {
        list.truncate(n as usize);
    }
}

/// Keep a contiguous run of `requested` peers starting at a random
/// offset in `[0, candidates - requested)`.
///
/// Not a uniform random subset. The slice keeps relative order and its
/// selection statistics are what deployed crawlers expect, so the
/// algorithm is kept as-is.
fn trim_random<R>(list: &mut Vec<PeerRecord>, requested: RequestedCount, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let RequestedCount::Exactly(n) = requested else {
        return;
    };
    let n = n as usize;
    if n >= list.len() {
        return;
    }
    let start = rng.gen_range(0..list.len() - n);
    list.drain(..start);
    list.truncate(n);
}
