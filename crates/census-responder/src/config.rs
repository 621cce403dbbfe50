use std::fs;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use census_protocol::{Locale, PeerRecord};
use census_registry::{InMemoryRegistry, Neighbor, ResponderConfig};

/// On-disk responder configuration (TOML).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// UDP socket the responder listens on.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// This node's own locale; locale-preferenced pings rank by it.
    #[serde(default = "default_locale")]
    pub locale: Locale,
    /// Agent string appended as the final entry of every agent block.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Reported lifetime average connection uptime, in millis.
    #[serde(default)]
    pub average_uptime_millis: u64,
    /// Static neighbor tables, useful for testbeds and demos. A real
    /// node feeds the registry from its connection manager instead.
    #[serde(default)]
    pub supernodes: Vec<StaticPeer>,
    #[serde(default)]
    pub leaves: Vec<StaticPeer>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            locale: default_locale(),
            user_agent: default_user_agent(),
            average_uptime_millis: 0,
            supernodes: Vec::new(),
            leaves: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn responder_config(&self) -> ResponderConfig {
        ResponderConfig {
            locale: self.locale,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Seed a registry from the static tables. Static peers count as
    /// connected at `now_millis`.
    pub fn registry(&self, now_millis: i64) -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        for peer in &self.supernodes {
            registry.add_supernode(peer.neighbor(now_millis));
        }
        for peer in &self.leaves {
            registry.add_leaf(peer.neighbor(now_millis));
        }
        registry.set_average_uptime_millis(self.average_uptime_millis);
        registry
    }
}

/// One statically configured neighbor.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticPeer {
    pub addr: SocketAddr,
    #[serde(default = "default_locale")]
    pub locale: Locale,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub good_supernode: bool,
    #[serde(default)]
    pub crawler_support: u8,
    #[serde(default)]
    pub reply_count: u64,
}

impl StaticPeer {
    fn neighbor(&self, now_millis: i64) -> Neighbor {
        Neighbor::new(PeerRecord {
            addr: self.addr,
            connected_at_millis: now_millis,
            locale: self.locale,
            reply_count: self.reply_count,
            user_agent: self.user_agent.clone(),
        })
        .good_supernode(self.good_supernode)
        .crawler_support(self.crawler_support)
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 6346))
}

fn default_locale() -> Locale {
    Locale::EN
}

fn default_user_agent() -> String {
    format!("census/{}", env!("CARGO_PKG_VERSION"))
}
