//! Consumer-group coordinator snapshots and the coordinator lookup.

use crate::broker::BrokerRegistry;
use crate::protocol::ErrorCode;

/// The coordinator broker for the worker's consumer group, as reported by one
/// consumer-metadata response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorSnapshot {
    pub error_code: ErrorCode,
    pub node_id: i32,
    pub host: String,
    pub port: u16,
}

impl CoordinatorSnapshot {
    /// A snapshot carrying only an error code, used when discovery failed.
    pub fn error(error_code: ErrorCode) -> Self {
        Self {
            error_code,
            node_id: -1,
            host: String::new(),
            port: 0,
        }
    }
}

/// Registry index of the coordinator broker, if the snapshot names one we
/// hold. Pure over (snapshot, registry).
pub fn coordinator_index<S>(
    coordinator: &CoordinatorSnapshot,
    registry: &BrokerRegistry<S>,
) -> Option<usize> {
    if coordinator.error_code.is_error() {
        return None;
    }
    registry.index_of_host_port(&coordinator.host, coordinator.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::broker::{Broker, BrokerAddr};

    fn registry() -> BrokerRegistry<()> {
        let mut registry = BrokerRegistry::new();
        registry.push_for_test(Broker::<()> {
            addr: BrokerAddr::new("h1", 9092),
            node_id: Some(1),
            socket: None,
        });
        registry
    }

    #[test]
    fn resolves_through_registry() {
        let snapshot = CoordinatorSnapshot {
            error_code: ErrorCode::NoError,
            node_id: 1,
            host: "h1".to_string(),
            port: 9092,
        };
        assert_eq!(coordinator_index(&snapshot, &registry()), Some(0));
    }

    #[test]
    fn error_snapshot_resolves_to_none() {
        let snapshot = CoordinatorSnapshot::error(ErrorCode::ConsumerCoordinatorNotAvailable);
        assert_eq!(coordinator_index(&snapshot, &registry()), None);
    }

    #[test]
    fn unknown_coordinator_resolves_to_none() {
        let snapshot = CoordinatorSnapshot {
            error_code: ErrorCode::NoError,
            node_id: 7,
            host: "elsewhere".to_string(),
            port: 9092,
        };
        assert_eq!(coordinator_index(&snapshot, &registry()), None);
    }
}
