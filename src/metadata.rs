//! Cluster-wide metadata snapshots and the leader lookup.

use crate::broker::BrokerRegistry;
use crate::protocol::ErrorCode;

/// An immutable view of the cluster, as reported by one metadata response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataSnapshot {
    /// Brokers known to the cluster.
    pub brokers: Vec<NodeInfo>,

    /// Topics, scoped to the request (all topics unless one was named).
    pub topics: Vec<TopicMetadata>,
}

/// A broker as named by a metadata response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub node_id: i32,
    pub host: String,
    pub port: u16,
}

/// Metadata for a certain topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMetadata {
    pub topic: String,
    pub error_code: ErrorCode,
    pub partitions: Vec<PartitionMetadata>,
}

/// Metadata for a certain partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMetadata {
    pub partition: i32,
    /// Node id of the current leader.
    pub leader: i32,
    pub error_code: ErrorCode,
}

impl MetadataSnapshot {
    /// True if any topic in the snapshot reports a missing leader, in which
    /// case the snapshot is not worth caching yet.
    pub fn leader_unavailable(&self) -> bool {
        self.topics
            .iter()
            .any(|t| t.error_code == ErrorCode::LeaderNotAvailable)
    }
}

/// Registry index of the broker leading `(topic, partition)`.
///
/// Pure over (snapshot, registry): the leader's node id is resolved to a
/// (host, port) through the snapshot's own broker list, then to a registry
/// entry. `None` when the topic or partition is unknown, the partition has no
/// elected leader, or we do not hold the leading broker.
pub fn leader_index<S>(
    metadata: &MetadataSnapshot,
    registry: &BrokerRegistry<S>,
    topic: &str,
    partition: i32,
) -> Option<usize> {
    let topic_metadata = metadata.topics.iter().find(|t| t.topic == topic)?;
    let partition_metadata = topic_metadata
        .partitions
        .iter()
        .find(|p| p.partition == partition)?;
    if partition_metadata.error_code == ErrorCode::LeaderNotAvailable {
        return None;
    }
    let leader = metadata
        .brokers
        .iter()
        .find(|b| b.node_id == partition_metadata.leader)?;
    registry.index_of_host_port(&leader.host, leader.port)
}
