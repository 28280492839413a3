//! The wire-format collaborator.
//!
//! The worker never encodes or decodes request bodies itself. It hands a
//! correlation id, the client id and a decoded request to a [`WireProtocol`]
//! implementation and gets opaque bytes back; replies travel the opposite way.
//! A codec crate (or the embedding application) provides the implementation.

use thiserror::Error;

use crate::coordinator::CoordinatorSnapshot;
use crate::metadata::MetadataSnapshot;

mod messages;
pub use messages::*;

/// Error codes carried inside broker replies.
///
/// These pass through to callers unchanged; the worker only inspects the few
/// it reacts to (`NoError`, `LeaderNotAvailable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCode {
    #[default]
    NoError,
    Unknown,
    OffsetOutOfRange,
    InvalidMessage,
    UnknownTopicOrPartition,
    InvalidMessageSize,
    LeaderNotAvailable,
    NotLeaderForPartition,
    RequestTimedOut,
    BrokerNotAvailable,
    ReplicaNotAvailable,
    MessageSizeTooLarge,
    StaleControllerEpoch,
    OffsetMetadataTooLarge,
    OffsetsLoadInProgress,
    ConsumerCoordinatorNotAvailable,
    NotCoordinatorForConsumer,
    /// A code this client does not know about.
    Other(i16),
}

impl ErrorCode {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::NoError,
            -1 => Self::Unknown,
            1 => Self::OffsetOutOfRange,
            2 => Self::InvalidMessage,
            3 => Self::UnknownTopicOrPartition,
            4 => Self::InvalidMessageSize,
            5 => Self::LeaderNotAvailable,
            6 => Self::NotLeaderForPartition,
            7 => Self::RequestTimedOut,
            8 => Self::BrokerNotAvailable,
            9 => Self::ReplicaNotAvailable,
            10 => Self::MessageSizeTooLarge,
            11 => Self::StaleControllerEpoch,
            12 => Self::OffsetMetadataTooLarge,
            14 => Self::OffsetsLoadInProgress,
            15 => Self::ConsumerCoordinatorNotAvailable,
            16 => Self::NotCoordinatorForConsumer,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i16 {
        match self {
            Self::NoError => 0,
            Self::Unknown => -1,
            Self::OffsetOutOfRange => 1,
            Self::InvalidMessage => 2,
            Self::UnknownTopicOrPartition => 3,
            Self::InvalidMessageSize => 4,
            Self::LeaderNotAvailable => 5,
            Self::NotLeaderForPartition => 6,
            Self::RequestTimedOut => 7,
            Self::BrokerNotAvailable => 8,
            Self::ReplicaNotAvailable => 9,
            Self::MessageSizeTooLarge => 10,
            Self::StaleControllerEpoch => 11,
            Self::OffsetMetadataTooLarge => 12,
            Self::OffsetsLoadInProgress => 14,
            Self::ConsumerCoordinatorNotAvailable => 15,
            Self::NotCoordinatorForConsumer => 16,
            Self::Other(other) => other,
        }
    }

    pub fn is_error(self) -> bool {
        self != Self::NoError
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("truncated response")]
    Truncated,

    #[error("invalid response: {0}")]
    Invalid(String),
}

/// Stateless encode/decode pair per operation.
///
/// `encode_*` receives the correlation id and client id that go into the
/// request header; `decode_*` receives the reply bytes with the framing
/// already stripped.
pub trait WireProtocol: Send + Sync + 'static {
    fn encode_metadata(&self, correlation_id: i32, client_id: &str, topic: Option<&str>)
        -> Vec<u8>;
    fn decode_metadata(&self, response: &[u8]) -> Result<MetadataSnapshot, CodecError>;

    fn encode_consumer_metadata(&self, correlation_id: i32, client_id: &str, group: &str)
        -> Vec<u8>;
    fn decode_consumer_metadata(&self, response: &[u8])
        -> Result<CoordinatorSnapshot, CodecError>;

    fn encode_produce(&self, correlation_id: i32, client_id: &str, request: &ProduceRequest)
        -> Vec<u8>;
    fn decode_produce(&self, response: &[u8]) -> Result<ProduceResponse, CodecError>;

    fn encode_fetch(&self, correlation_id: i32, client_id: &str, request: &FetchRequest)
        -> Vec<u8>;
    fn decode_fetch(&self, response: &[u8]) -> Result<FetchResponse, CodecError>;

    fn encode_list_offsets(&self, correlation_id: i32, client_id: &str, request: &OffsetRequest)
        -> Vec<u8>;
    fn decode_list_offsets(&self, response: &[u8]) -> Result<OffsetResponse, CodecError>;

    fn encode_offset_fetch(
        &self,
        correlation_id: i32,
        client_id: &str,
        request: &OffsetFetchRequest,
    ) -> Vec<u8>;
    fn decode_offset_fetch(&self, response: &[u8]) -> Result<OffsetFetchResponse, CodecError>;

    fn encode_offset_commit(
        &self,
        correlation_id: i32,
        client_id: &str,
        request: &OffsetCommitRequest,
    ) -> Vec<u8>;
    fn decode_offset_commit(&self, response: &[u8]) -> Result<OffsetCommitResponse, CodecError>;

    fn encode_join_group(&self, correlation_id: i32, client_id: &str, request: &JoinGroupRequest)
        -> Vec<u8>;
    fn decode_join_group(&self, response: &[u8]) -> Result<JoinGroupResponse, CodecError>;

    fn encode_sync_group(&self, correlation_id: i32, client_id: &str, request: &SyncGroupRequest)
        -> Vec<u8>;
    fn decode_sync_group(&self, response: &[u8]) -> Result<SyncGroupResponse, CodecError>;

    fn encode_heartbeat(&self, correlation_id: i32, client_id: &str, request: &HeartbeatRequest)
        -> Vec<u8>;
    fn decode_heartbeat(&self, response: &[u8]) -> Result<HeartbeatResponse, CodecError>;
}
