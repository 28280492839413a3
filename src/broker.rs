//! Broker identity and the per-worker broker registry.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::metadata::NodeInfo;
use crate::network::NetworkClient;

/// Identity of a broker. Two brokers are the same iff host and port match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrokerAddr {
    pub host: String,
    pub port: u16,
}

impl BrokerAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Display for BrokerAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for BrokerAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("invalid broker address \"{s}\": expected host:port"))?;
        if host.is_empty() {
            return Err(format!("invalid broker address \"{s}\": empty host"));
        }
        let port = port
            .parse()
            .map_err(|_| format!("invalid broker address \"{s}\": bad port"))?;
        Ok(Self::new(host, port))
    }
}

/// A known broker with its (optionally) live socket.
///
/// The socket is owned exclusively by the worker; it is closed when the broker
/// is dropped from the registry and on worker shutdown.
#[derive(Debug)]
pub struct Broker<S> {
    pub addr: BrokerAddr,
    /// Node id learned from cluster metadata. Seed brokers start out unknown.
    pub node_id: Option<i32>,
    pub socket: Option<S>,
}

impl<S> Broker<S> {
    fn new(addr: BrokerAddr, node_id: Option<i32>, socket: Option<S>) -> Self {
        Self {
            addr,
            node_id,
            socket,
        }
    }

    pub fn connected<N>(&self, net: &N) -> bool
    where
        N: NetworkClient<Socket = S>,
    {
        self.socket.as_ref().map(|s| net.is_connected(s)).unwrap_or(false)
    }
}

/// Ordered set of known brokers.
///
/// New brokers are prepended; the insertion order only matters for the
/// "first broker" fallback used by uncoordinated offset commits.
#[derive(Debug, Default)]
pub struct BrokerRegistry<S> {
    brokers: Vec<Broker<S>>,
}

impl<S> BrokerRegistry<S> {
    pub fn new() -> Self {
        Self {
            brokers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.brokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brokers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Broker<S>> {
        self.brokers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Broker<S>> {
        self.brokers.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Broker<S>> {
        self.brokers.get_mut(index)
    }

    /// Index of the registry head, the fallback target when no better broker
    /// is known.
    pub fn first_index(&self) -> Option<usize> {
        (!self.brokers.is_empty()).then_some(0)
    }

    pub fn index_of(&self, addr: &BrokerAddr) -> Option<usize> {
        self.brokers.iter().position(|b| &b.addr == addr)
    }

    pub fn index_of_host_port(&self, host: &str, port: u16) -> Option<usize> {
        self.brokers
            .iter()
            .position(|b| b.addr.host == host && b.addr.port == port)
    }

    /// Open sockets to the seed brokers, in the order given.
    ///
    /// A connect failure leaves the broker in the registry without a socket;
    /// it is skipped by request dispatch until reconciliation replaces it.
    pub async fn connect_seeds<N>(&mut self, net: &N, seeds: &[BrokerAddr])
    where
        N: NetworkClient<Socket = S>,
    {
        for addr in seeds {
            let socket = open_socket(net, addr).await;
            self.brokers.push(Broker::new(addr.clone(), None, socket));
        }
    }

    /// Reconcile the registry against the broker list of a fresh metadata
    /// snapshot.
    ///
    /// Brokers absent from `new_brokers` (or present but with a dead socket)
    /// are closed and dropped, unless that would empty the registry: a
    /// metadata response that names none of our brokers must not disconnect
    /// the worker entirely, so in that case nothing is removed. Entries of
    /// `new_brokers` we do not hold a live socket for get one opened and are
    /// prepended; kept brokers refresh their node id.
    pub async fn reconcile<N>(&mut self, net: &N, new_brokers: &[NodeInfo])
    where
        N: NetworkClient<Socket = S>,
    {
        let named = |broker: &Broker<S>| {
            new_brokers
                .iter()
                .any(|n| broker.addr.host == n.host && broker.addr.port == n.port)
        };

        let keep = self
            .brokers
            .iter()
            .filter(|b| named(b) && b.connected(net))
            .count();

        if keep == 0 {
            if !self.brokers.is_empty() && !new_brokers.is_empty() {
                debug!("metadata names no live broker we hold, keeping registry as-is");
            }
        } else {
            let mut retained = Vec::with_capacity(keep);
            for mut broker in std::mem::take(&mut self.brokers) {
                if named(&broker) && broker.connected(net) {
                    retained.push(broker);
                    continue;
                }
                info!(broker = %broker.addr, "dropping broker absent from metadata");
                if let Some(mut socket) = broker.socket.take() {
                    net.close_socket(&mut socket).await;
                }
            }
            self.brokers = retained;
        }

        for node in new_brokers {
            match self.index_of_host_port(&node.host, node.port) {
                Some(index) => {
                    let broker = &mut self.brokers[index];
                    broker.node_id = Some(node.node_id);
                    if !broker.connected(net) {
                        broker.socket = open_socket(net, &broker.addr).await;
                    }
                }
                None => {
                    let addr = BrokerAddr::new(node.host.clone(), node.port);
                    let socket = open_socket(net, &addr).await;
                    self.brokers
                        .insert(0, Broker::new(addr, Some(node.node_id), socket));
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, broker: Broker<S>) {
        self.brokers.push(broker);
    }

    /// Close every socket. Used on worker shutdown.
    pub async fn close_all<N>(&mut self, net: &N)
    where
        N: NetworkClient<Socket = S>,
    {
        for broker in &mut self.brokers {
            if let Some(mut socket) = broker.socket.take() {
                net.close_socket(&mut socket).await;
            }
        }
    }
}

async fn open_socket<N>(net: &N, addr: &BrokerAddr) -> Option<N::Socket>
where
    N: NetworkClient,
{
    match net.create_socket(addr).await {
        Ok(socket) => Some(socket),
        Err(error) => {
            warn!(broker = %addr, %error, "failed to connect to broker");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    #[derive(Debug)]
    struct TestSocket {
        connected: bool,
    }

    /// Network fake that connects everything and counts closes.
    #[derive(Debug, Default)]
    struct TestNet {
        closed: Arc<AtomicUsize>,
        refuse: Vec<BrokerAddr>,
    }

    #[async_trait]
    impl NetworkClient for TestNet {
        type Socket = TestSocket;

        async fn create_socket(&self, addr: &BrokerAddr) -> io::Result<TestSocket> {
            if self.refuse.contains(addr) {
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
            }
            Ok(TestSocket { connected: true })
        }

        async fn close_socket(&self, socket: &mut TestSocket) {
            socket.connected = false;
            self.closed.fetch_add(1, Ordering::SeqCst);
        }

        async fn send_sync_request(
            &self,
            _socket: &mut TestSocket,
            _request: &[u8],
            _timeout: std::time::Duration,
        ) -> Option<Vec<u8>> {
            None
        }

        async fn send_async_request(
            &self,
            _socket: &mut TestSocket,
            _request: &[u8],
        ) -> io::Result<()> {
            Ok(())
        }

        fn is_connected(&self, socket: &TestSocket) -> bool {
            socket.connected
        }
    }

    fn node(node_id: i32, host: &str, port: u16) -> NodeInfo {
        NodeInfo {
            node_id,
            host: host.to_string(),
            port,
        }
    }

    fn addrs<S>(registry: &BrokerRegistry<S>) -> Vec<String> {
        registry.iter().map(|b| b.addr.to_string()).collect()
    }

    #[test]
    fn parse_addr() {
        let addr: BrokerAddr = "kafka1.internal:9092".parse().unwrap();
        assert_eq!(addr, BrokerAddr::new("kafka1.internal", 9092));
        assert_eq!(addr.to_string(), "kafka1.internal:9092");

        assert!("kafka1.internal".parse::<BrokerAddr>().is_err());
        assert!(":9092".parse::<BrokerAddr>().is_err());
        assert!("kafka1.internal:lots".parse::<BrokerAddr>().is_err());
    }

    #[tokio::test]
    async fn seeds_keep_their_order() {
        let net = TestNet::default();
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(
                &net,
                &[BrokerAddr::new("h1", 9092), BrokerAddr::new("h2", 9092)],
            )
            .await;

        assert_eq!(addrs(&registry), ["h1:9092", "h2:9092"]);
        assert_eq!(registry.first_index(), Some(0));
        assert!(registry.iter().all(|b| b.connected(&net)));
    }

    #[tokio::test]
    async fn seed_connect_failure_yields_socketless_broker() {
        let net = TestNet {
            refuse: vec![BrokerAddr::new("h2", 9092)],
            ..Default::default()
        };
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(
                &net,
                &[BrokerAddr::new("h1", 9092), BrokerAddr::new("h2", 9092)],
            )
            .await;

        assert_eq!(registry.len(), 2);
        assert!(!registry.iter().nth(1).unwrap().connected(&net));
    }

    #[tokio::test]
    async fn reconcile_drops_absent_and_adds_new() {
        let net = TestNet::default();
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(
                &net,
                &[BrokerAddr::new("h1", 9092), BrokerAddr::new("h2", 9092)],
            )
            .await;

        registry
            .reconcile(&net, &[node(1, "h1", 9092), node(3, "h3", 9092)])
            .await;

        // h2 closed and dropped, h3 prepended, h1 keeps its socket and learns
        // its node id.
        assert_eq!(addrs(&registry), ["h3:9092", "h1:9092"]);
        assert_eq!(net.closed.load(Ordering::SeqCst), 1);
        let h1 = registry.iter().nth(1).unwrap();
        assert_eq!(h1.node_id, Some(1));
    }

    #[tokio::test]
    async fn reconcile_never_empties_the_registry() {
        let net = TestNet::default();
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(
                &net,
                &[BrokerAddr::new("h1", 9092), BrokerAddr::new("h2", 9092)],
            )
            .await;

        registry.reconcile(&net, &[]).await;
        assert_eq!(addrs(&registry), ["h1:9092", "h2:9092"]);
        assert_eq!(net.closed.load(Ordering::SeqCst), 0);

        // A list naming only strangers also must not cost us our sockets.
        registry.reconcile(&net, &[node(9, "h9", 9092)]).await;
        assert_eq!(addrs(&registry), ["h9:9092", "h1:9092", "h2:9092"]);
        assert_eq!(net.closed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reconcile_reopens_dead_socket_of_named_broker() {
        let net = TestNet::default();
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(&net, &[BrokerAddr::new("h1", 9092)])
            .await;
        registry.get_mut(0).unwrap().socket = None;

        registry.reconcile(&net, &[node(1, "h1", 9092)]).await;

        assert_eq!(registry.len(), 1);
        assert!(registry.iter().next().unwrap().connected(&net));
    }

    #[tokio::test]
    async fn close_all_closes_every_socket() {
        let net = TestNet::default();
        let mut registry = BrokerRegistry::new();
        registry
            .connect_seeds(
                &net,
                &[BrokerAddr::new("h1", 9092), BrokerAddr::new("h2", 9092)],
            )
            .await;

        registry.close_all(&net).await;
        assert_eq!(net.closed.load(Ordering::SeqCst), 2);
        assert!(registry.iter().all(|b| b.socket.is_none()));
    }
}
