use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::UdpSocket;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use census_protocol::CrawlerPing;
use census_registry::{InMemoryRegistry, PongBuilder};

/// Pings are 3 bytes; a little slack tolerates future extensions.
const RECV_BUF: usize = 512;

/// The UDP serving loop. Each datagram is handled to completion before
/// the next is read; a pong build is synchronous and cheap.
pub struct Responder {
    socket: UdpSocket,
    builder: PongBuilder,
    registry: Arc<RwLock<InMemoryRegistry>>,
}

impl Responder {
    pub async fn bind(
        bind: SocketAddr,
        builder: PongBuilder,
        registry: Arc<RwLock<InMemoryRegistry>>,
    ) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind(bind)
            .await
            .with_context(|| format!("binding {bind}"))?;
        Ok(Self {
            socket,
            builder,
            registry,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve pings until the socket fails or the task is dropped.
    pub async fn run(self) -> anyhow::Result<()> {
        let mut buf = [0u8; RECV_BUF];
        loop {
            let (len, from) = self
                .socket
                .recv_from(&mut buf)
                .await
                .context("receiving datagram")?;

            let ping = match CrawlerPing::decode(&buf[..len]) {
                Ok(ping) => ping,
                Err(e) => {
                    warn!(%from, error = %e, "ignoring malformed crawler ping");
                    continue;
                }
            };

            let payload = {
                let registry = self.registry.read().await;
                self.builder.build(&*registry, &ping)
            };

            match payload {
                Ok(payload) => {
                    if let Err(e) = self.socket.send_to(&payload, from).await {
                        warn!(%from, error = %e, "failed to send pong");
                    } else {
                        debug!(%from, bytes = payload.len(), "answered crawler ping");
                    }
                }
                Err(e) => warn!(%from, error = %e, "dropping unanswerable ping"),
            }
        }
    }
}
