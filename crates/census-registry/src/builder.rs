use chrono::Utc;
use rand::Rng;
use tracing::{debug, error};

use census_protocol::{
    append_agent_block, compress_agent_block, encode_pong, join_agents, CrawlerPing, Locale,
    ProtocolError, ResponderStats,
};

use crate::registry::RegistryView;
use crate::selector::select_peers;

/// Identity the responder stamps into its pongs: the locale used to
/// preference selection and the user-agent string closing the agent
/// block. Passed in at construction, never read from ambient settings.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub locale: Locale,
    pub user_agent: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            locale: Locale::EN,
            user_agent: format!("census/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builds one crawler pong payload per ping: select peers, encode the
/// records, append the agent block when asked for. Stateless across
/// builds.
#[derive(Debug, Clone, Default)]
pub struct PongBuilder {
    config: ResponderConfig,
}

impl PongBuilder {
    pub fn new(config: ResponderConfig) -> Self {
        Self { config }
    }

    /// Build against the wall clock and thread-local randomness.
    pub fn build(
        &self,
        registry: &dyn RegistryView,
        ping: &CrawlerPing,
    ) -> Result<Vec<u8>, ProtocolError> {
        self.build_with(
            registry,
            ping,
            Utc::now().timestamp_millis(),
            &mut rand::thread_rng(),
        )
    }

    /// Deterministic entry point: the caller supplies the one captured
    /// `now` and the randomness source. For a fixed registry snapshot,
    /// ping, timestamp and rng outcome the payload is byte-identical
    /// across calls.
    pub fn build_with<R>(
        &self,
        registry: &dyn RegistryView,
        ping: &CrawlerPing,
        now_millis: i64,
        rng: &mut R,
    ) -> Result<Vec<u8>, ProtocolError>
    where
        R: Rng + ?Sized,
    {
        let selection = select_peers(registry, ping, self.config.locale, rng);
        let stats = ResponderStats {
            average_uptime_millis: registry.average_uptime_millis(),
        };

        let mut payload = encode_pong(
            ping,
            &selection.supernodes,
            &selection.leaves,
            &stats,
            now_millis,
        )?;

        if ping.wants_user_agents() {
            let joined = join_agents(
                selection.records().map(|r| r.user_agent.as_str()),
                &self.config.user_agent,
            );
            match compress_agent_block(&joined) {
                Ok(block) => append_agent_block(&mut payload, &block),
                // Degrade: the fixed-layout records still go out intact.
                Err(e) => error!(error = %e, "omitting user-agent block"),
            }
        }

        debug!(
            supernodes = selection.supernodes.len(),
            leaves = selection.leaves.len(),
            bytes = payload.len(),
            "built crawler pong"
        );
        Ok(payload)
    }
}
