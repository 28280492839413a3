//! Worker configuration.

use std::time::Duration;

use crate::broker::BrokerAddr;
use crate::retry::RetryConfig;

/// Client id stamped into every request header.
pub const CLIENT_ID: &str = "kafka_ex";

/// Fetch parameters used by the streaming loop.
pub(crate) const STREAM_WAIT_TIME_MS: i32 = 900;
pub(crate) const STREAM_MIN_BYTES: i32 = 1;
pub(crate) const STREAM_MAX_BYTES: i32 = 1_000_000;

/// Metadata refresh: three attempts, 300 ms apart.
pub(crate) const METADATA_RETRY: RetryConfig = RetryConfig {
    attempts: 3,
    pause: Duration::from_millis(300),
};

/// Coordinator discovery: three attempts, 400 ms apart.
pub(crate) const COORDINATOR_RETRY: RetryConfig = RetryConfig {
    attempts: 3,
    pause: Duration::from_millis(400),
};

/// Configuration of a single worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seed brokers used to bootstrap the registry.
    pub uris: Vec<BrokerAddr>,

    /// Period of the background metadata refresh.
    pub metadata_update_interval: Duration,

    /// Period of the background coordinator refresh. Only relevant when a
    /// consumer group is configured.
    pub consumer_group_update_interval: Duration,

    /// Upper bound on every synchronous broker exchange.
    pub sync_timeout: Duration,

    /// Consumer group this worker belongs to; `None` means no group, which
    /// makes every group-dependent operation a caller contract violation.
    /// Validity of the name is the caller's responsibility.
    pub consumer_group: Option<String>,

    /// Name used in diagnostics.
    pub name: String,
}

impl WorkerConfig {
    pub fn new(uris: Vec<BrokerAddr>) -> Self {
        Self {
            uris,
            metadata_update_interval: Duration::from_secs(30),
            consumer_group_update_interval: Duration::from_secs(30),
            sync_timeout: Duration::from_secs(1),
            consumer_group: None,
            name: "kafka-worker".to_string(),
        }
    }

    pub fn consumer_group(mut self, group: impl Into<String>) -> Self {
        self.consumer_group = Some(group.into());
        self
    }

    pub fn metadata_update_interval(mut self, interval: Duration) -> Self {
        self.metadata_update_interval = interval;
        self
    }

    pub fn consumer_group_update_interval(mut self, interval: Duration) -> Self {
        self.consumer_group_update_interval = interval;
        self
    }

    pub fn sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
