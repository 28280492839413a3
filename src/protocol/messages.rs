//! Decoded request and response bodies.
//!
//! These are the values the worker routes and replies with; their wire shape
//! belongs to the [`WireProtocol`](super::WireProtocol) implementation.

use super::ErrorCode;

/// A single decoded message from a partition log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub offset: i64,
    pub key: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
}

/// One message to be appended by a produce request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProduceMessage {
    pub key: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduceRequest {
    pub topic: String,
    pub partition: i32,
    /// Number of acknowledgements the leader must collect before answering.
    /// `0` means fire-and-forget: the broker sends no reply at all.
    pub required_acks: i16,
    pub timeout_ms: i32,
    pub messages: Vec<ProduceMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduceResponse {
    pub topics: Vec<ProduceResponseTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduceResponseTopic {
    pub topic: String,
    pub partitions: Vec<ProduceResponsePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProduceResponsePartition {
    pub partition: i32,
    pub error_code: ErrorCode,
    /// Offset assigned to the first appended message.
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// Maximum time the broker may block waiting for `min_bytes`.
    pub wait_time_ms: i32,
    pub min_bytes: i32,
    pub max_bytes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub topics: Vec<FetchResponseTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponseTopic {
    pub topic: String,
    pub partitions: Vec<FetchResponsePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponsePartition {
    pub partition: i32,
    pub error_code: ErrorCode,
    pub high_watermark: i64,
    /// Offset of the last message in `messages`, if any were returned.
    pub last_offset: Option<i64>,
    pub messages: Vec<Message>,
}

/// Target of a time-indexed offset lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetTime {
    Latest,
    Earliest,
    /// Milliseconds since the unix epoch.
    At(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetRequest {
    pub topic: String,
    pub partition: i32,
    pub time: OffsetTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetResponse {
    pub topics: Vec<OffsetResponseTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetResponseTopic {
    pub topic: String,
    pub partitions: Vec<OffsetResponsePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetResponsePartition {
    pub partition: i32,
    pub error_code: ErrorCode,
    pub offsets: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchRequest {
    pub topic: String,
    pub partition: i32,
    /// `None` is replaced with the worker's configured group before dispatch.
    pub consumer_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchResponse {
    pub topics: Vec<OffsetFetchResponseTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchResponseTopic {
    pub topic: String,
    pub partitions: Vec<OffsetFetchResponsePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetFetchResponsePartition {
    pub partition: i32,
    pub offset: i64,
    pub metadata: String,
    pub error_code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCommitRequest {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub metadata: String,
    /// `None` is replaced with the worker's configured group before dispatch.
    pub consumer_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCommitResponse {
    pub topics: Vec<OffsetCommitResponseTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCommitResponseTopic {
    pub topic: String,
    pub partitions: Vec<OffsetCommitResponsePartition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetCommitResponsePartition {
    pub partition: i32,
    pub error_code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroupRequest {
    pub group: String,
    /// Empty on first join; the broker assigns one in the reply.
    pub member_id: String,
    pub topics: Vec<String>,
    pub session_timeout_ms: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroupResponse {
    pub error_code: ErrorCode,
    pub generation_id: i32,
    pub leader_id: String,
    pub member_id: String,
    pub members: Vec<String>,
}

/// Partitions of one topic assigned to a group member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPartitions {
    pub topic: String,
    pub partitions: Vec<i32>,
}

/// Assignment for one member, as computed by the group leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAssignment {
    pub member_id: String,
    pub assignments: Vec<TopicPartitions>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncGroupRequest {
    pub group: String,
    pub generation_id: i32,
    pub member_id: String,
    /// Empty for followers; the leader submits the full assignment here.
    pub assignments: Vec<MemberAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncGroupResponse {
    pub error_code: ErrorCode,
    pub assignments: Vec<TopicPartitions>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatRequest {
    pub group: String,
    pub generation_id: i32,
    pub member_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatResponse {
    pub error_code: ErrorCode,
}
