use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::RwLock;

use census_protocol::{Locale, PeerRecord};
use census_registry::{InMemoryRegistry, Neighbor, PongBuilder, RegistryView};
use census_responder::{Config, Responder};

const NOW: i64 = 1_700_000_000_000;

fn record(host: u8) -> PeerRecord {
    PeerRecord {
        addr: format!("10.0.0.{host}:6346").parse().unwrap(),
        connected_at_millis: NOW,
        locale: Locale::EN,
        reply_count: 0,
        user_agent: format!("peer-{host}/1.0"),
    }
}

fn seeded_registry() -> InMemoryRegistry {
    let mut registry = InMemoryRegistry::new();
    registry.add_supernode(Neighbor::new(record(1)).good_supernode(true));
    registry.add_supernode(Neighbor::new(record(2)).good_supernode(true));
    registry.add_leaf(Neighbor::new(record(3)));
    registry
}

async fn spawn_responder(registry: InMemoryRegistry) -> std::net::SocketAddr {
    let responder = Responder::bind(
        "127.0.0.1:0".parse().unwrap(),
        PongBuilder::default(),
        Arc::new(RwLock::new(registry)),
    )
    .await
    .unwrap();
    let addr = responder.local_addr().unwrap();
    tokio::spawn(responder.run());
    addr
}

async fn recv_with_timeout(socket: &UdpSocket, buf: &mut [u8]) -> usize {
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(buf))
        .await
        .expect("timed out waiting for a pong")
        .unwrap();
    len
}

#[tokio::test]
async fn test_responder_answers_a_plain_ping() {
    let addr = spawn_responder(seeded_registry()).await;

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(&[0xFF, 0xFF, 0x00], addr).await.unwrap();

    let mut buf = [0u8; 2048];
    let len = recv_with_timeout(&client, &mut buf).await;

    assert_eq!(len, 3 + 6 * 3);
    assert_eq!(buf[0], 2);
    assert_eq!(buf[1], 1);
    assert_eq!(buf[2], 0x00);
}

#[tokio::test]
async fn test_responder_drops_malformed_and_recovers() {
    let addr = spawn_responder(seeded_registry()).await;

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    // Too short to be a ping: no reply expected.
    client.send_to(&[0x01], addr).await.unwrap();
    // A valid ping right after must still be answered.
    client.send_to(&[2, 0, 0x00], addr).await.unwrap();

    let mut buf = [0u8; 2048];
    let len = recv_with_timeout(&client, &mut buf).await;

    assert_eq!(len, 3 + 6 * 2);
    assert_eq!(buf[0], 2);
    assert_eq!(buf[1], 0);
}

#[test]
fn test_config_parses_and_seeds_registry() {
    let raw = r#"
bind = "127.0.0.1:7000"
locale = "fr"
user_agent = "census-test/1.0"
average_uptime_millis = 120000

[[supernodes]]
addr = "10.1.1.1:6346"
locale = "fr"
user_agent = "peer/1.0"
good_supernode = true
crawler_support = 1

[[leaves]]
addr = "10.1.1.2:1024"
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(raw.as_bytes()).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.bind, "127.0.0.1:7000".parse().unwrap());
    assert_eq!(config.locale, Locale(*b"fr"));

    let registry = config.registry(NOW);
    assert_eq!(registry.supernode_count(), 1);
    assert_eq!(registry.leaf_count(), 1);
    assert_eq!(registry.average_uptime_millis(), 120_000);

    let supernodes = registry.active_supernodes();
    assert!(supernodes[0].good_supernode);
    assert_eq!(supernodes[0].crawler_support, 1);
    assert_eq!(supernodes[0].record.connected_at_millis, NOW);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config: Config = Default::default();
    assert_eq!(config.bind.port(), 6346);
    assert_eq!(config.locale, Locale::EN);
    assert!(config.registry(NOW).active_supernodes().is_empty());
}
