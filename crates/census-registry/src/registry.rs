use census_protocol::{Locale, PeerRecord};

/// One neighbor connection as the registry sees it: the wire-facing
/// record plus capability data that only matters for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub record: PeerRecord,
    /// Healthy, long-lived supernode per the connection manager's policy.
    pub good_supernode: bool,
    /// Advertised crawler-support capability version, 0 = none.
    pub crawler_support: u8,
}

impl Neighbor {
    pub fn new(record: PeerRecord) -> Self {
        Self {
            record,
            good_supernode: false,
            crawler_support: 0,
        }
    }

    pub fn good_supernode(mut self, good: bool) -> Self {
        self.good_supernode = good;
        self
    }

    pub fn crawler_support(mut self, version: u8) -> Self {
        self.crawler_support = version;
        self
    }
}

/// Read-only window onto the current neighbor set.
///
/// Implementations return realized collections, so a build works on a
/// snapshot taken at call time. The live registry may churn between
/// calls; crawler pongs are best-effort diagnostics and tolerate that.
pub trait RegistryView {
    fn active_supernodes(&self) -> Vec<Neighbor>;
    fn active_leaves(&self) -> Vec<Neighbor>;
    fn supernodes_matching_locale(&self, locale: Locale) -> Vec<Neighbor>;
    fn leaves_matching_locale(&self, locale: Locale) -> Vec<Neighbor>;
    /// Lifetime average uptime of this node's connections, in millis.
    fn average_uptime_millis(&self) -> u64;
}

/// Ordered in-memory registry. Mutation belongs to the surrounding
/// connection-management code; pong builds only ever read it.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    supernodes: Vec<Neighbor>,
    leaves: Vec<Neighbor>,
    average_uptime_millis: u64,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_supernode(&mut self, neighbor: Neighbor) {
        self.supernodes.push(neighbor);
    }

    pub fn add_leaf(&mut self, neighbor: Neighbor) {
        self.leaves.push(neighbor);
    }

    pub fn set_average_uptime_millis(&mut self, millis: u64) {
        self.average_uptime_millis = millis;
    }

    pub fn supernode_count(&self) -> usize {
        self.supernodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
}

impl RegistryView for InMemoryRegistry {
    fn active_supernodes(&self) -> Vec<Neighbor> {
        self.supernodes.clone()
    }

    fn active_leaves(&self) -> Vec<Neighbor> {
        self.leaves.clone()
    }

    fn supernodes_matching_locale(&self, locale: Locale) -> Vec<Neighbor> {
        self.supernodes
            .iter()
            .filter(|n| n.record.locale == locale)
            .cloned()
            .collect()
    }

    fn leaves_matching_locale(&self, locale: Locale) -> Vec<Neighbor> {
        self.leaves
            .iter()
            .filter(|n| n.record.locale == locale)
            .cloned()
            .collect()
    }

    fn average_uptime_millis(&self) -> u64 {
        self.average_uptime_millis
    }
}
