use thiserror::Error;

use crate::protocol::CodecError;

/// Errors surfaced to callers of individual worker operations.
///
/// These are all recoverable from the worker's point of view: the worker keeps
/// serving requests after returning any of them.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no leader available for topic \"{topic}\" partition {partition}")]
    LeaderNotAvailable { topic: String, partition: i32 },

    #[error("topic \"{topic}\" not found")]
    TopicNotFound { topic: String },

    #[error("broker did not reply within the sync timeout")]
    NoResponse,

    #[error("malformed response: {0}")]
    Codec(#[from] CodecError),

    #[error("a message stream is already attached to this worker")]
    StreamInUse,

    #[error("worker has shut down")]
    WorkerShutdown,
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors that terminate the worker.
///
/// Recoverable conditions (missing leader, stale coordinator, timeouts) are
/// retried or surfaced as [`ClientError`]s; only total metadata unavailability
/// tears the worker down. An external supervisor is expected to restart it.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("unable to fetch metadata from any broker")]
    NoMetadataAvailable,
}
