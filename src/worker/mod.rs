//! The worker: a single task owning all cluster-facing state, fed by a
//! mailbox of tagged requests.
//!
//! [`Worker::spawn`] connects to the seed brokers, performs the initial
//! metadata retrieval and starts the event loop. The returned [`WorkerHandle`]
//! is a cheap clone-able sender; every operation posts one request variant and
//! awaits its reply. Exactly one request is processed at a time, so state
//! updates of request *n* are visible to request *n + 1*.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::WorkerConfig;
use crate::coordinator::CoordinatorSnapshot;
use crate::error::{ClientError, FatalError, Result};
use crate::metadata::MetadataSnapshot;
use crate::network::NetworkClient;
use crate::protocol::{
    FetchRequest, FetchResponse, HeartbeatRequest, HeartbeatResponse, JoinGroupResponse,
    OffsetCommitRequest, OffsetCommitResponse, OffsetFetchRequest, OffsetFetchResponse,
    OffsetRequest, OffsetResponse, ProduceRequest, ProduceResponse, SyncGroupRequest,
    SyncGroupResponse, WireProtocol,
};

mod state;
mod stream;

pub use stream::MessageStream;

use state::WorkerState;

/// Mailbox depth; a full mailbox back-pressures the callers.
const MAILBOX_DEPTH: usize = 64;

/// Reply to a produce request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProduceOutcome {
    /// `required_acks == 0`: the request was dispatched fire-and-forget and
    /// no reply will ever exist.
    Dispatched,
    Response(ProduceResponse),
}

type Reply<T> = oneshot::Sender<T>;

/// Everything a worker can be asked to do, one variant per operation, plus
/// the events the worker posts to itself.
pub(crate) enum Request {
    ConsumerGroup {
        reply: Reply<Option<String>>,
    },
    Produce {
        request: ProduceRequest,
        reply: Reply<Result<ProduceOutcome>>,
    },
    Fetch {
        request: FetchRequest,
        auto_commit: bool,
        reply: Reply<Result<FetchResponse>>,
    },
    Offset {
        request: OffsetRequest,
        reply: Reply<Result<OffsetResponse>>,
    },
    OffsetFetch {
        request: OffsetFetchRequest,
        reply: Reply<Result<OffsetFetchResponse>>,
    },
    OffsetCommit {
        request: OffsetCommitRequest,
        reply: Reply<Result<OffsetCommitResponse>>,
    },
    ConsumerGroupMetadata {
        group: String,
        reply: Reply<CoordinatorSnapshot>,
    },
    Metadata {
        topic: Option<String>,
        reply: Reply<MetadataSnapshot>,
    },
    JoinGroup {
        topics: Vec<String>,
        session_timeout_ms: i32,
        reply: Reply<Result<JoinGroupResponse>>,
    },
    SyncGroup {
        request: SyncGroupRequest,
        reply: Reply<Result<SyncGroupResponse>>,
    },
    Heartbeat {
        request: HeartbeatRequest,
        reply: Reply<Result<HeartbeatResponse>>,
    },
    CreateStream {
        reply: Reply<Result<MessageStream>>,
    },
    /// Self-posted by the streaming loop; carries the offset to poll at.
    StartStreaming {
        topic: String,
        partition: i32,
        offset: i64,
        auto_commit: bool,
        poll_interval: Duration,
    },
    StopStreaming,
}

pub struct Worker;

impl Worker {
    /// Start a worker: open sockets to the seed brokers, perform the initial
    /// metadata retrieval and arm the refresh timers.
    ///
    /// Fails with [`FatalError::NoMetadataAvailable`] when no seed broker
    /// answers the initial metadata request. The returned join handle resolves
    /// when the worker terminates: `Ok(())` after the last handle is dropped,
    /// `Err` on a fatal refresh failure.
    pub async fn spawn<N>(
        config: WorkerConfig,
        net: N,
        codec: Arc<dyn WireProtocol>,
    ) -> Result<(WorkerHandle, JoinHandle<Result<(), FatalError>>), FatalError>
    where
        N: NetworkClient,
    {
        let (tx, rx) = mpsc::channel(MAILBOX_DEPTH);
        info!(worker = %config.name, seeds = ?config.uris, "starting worker");

        let mut state = WorkerState::new(config, net, codec, tx.downgrade());
        state.connect_seeds().await;
        state.update_metadata().await?;

        let join = tokio::spawn(state.run(rx));
        Ok((WorkerHandle { tx }, join))
    }
}

/// Cheap handle to a running worker. All clones feed the same mailbox.
#[derive(Clone, Debug)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Request>,
}

impl WorkerHandle {
    async fn call<T>(&self, build: impl FnOnce(Reply<T>) -> Request) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| ClientError::WorkerShutdown)?;
        rx.await.map_err(|_| ClientError::WorkerShutdown)
    }

    async fn post(&self, request: Request) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| ClientError::WorkerShutdown)
    }

    /// The worker's configured consumer group, if any.
    pub async fn consumer_group(&self) -> Result<Option<String>> {
        self.call(|reply| Request::ConsumerGroup { reply }).await
    }

    pub async fn produce(&self, request: ProduceRequest) -> Result<ProduceOutcome> {
        self.call(|reply| Request::Produce { request, reply }).await?
    }

    /// Fetch messages. With `auto_commit` the worker commits the reply's last
    /// offset under its consumer group; configuring one is then mandatory.
    pub async fn fetch(&self, request: FetchRequest, auto_commit: bool) -> Result<FetchResponse> {
        self.call(|reply| Request::Fetch {
            request,
            auto_commit,
            reply,
        })
        .await?
    }

    /// Time-indexed offset lookup.
    pub async fn offset(&self, request: OffsetRequest) -> Result<OffsetResponse> {
        self.call(|reply| Request::Offset { request, reply }).await?
    }

    pub async fn offset_fetch(&self, request: OffsetFetchRequest) -> Result<OffsetFetchResponse> {
        self.call(|reply| Request::OffsetFetch { request, reply })
            .await?
    }

    pub async fn offset_commit(
        &self,
        request: OffsetCommitRequest,
    ) -> Result<OffsetCommitResponse> {
        self.call(|reply| Request::OffsetCommit { request, reply })
            .await?
    }

    /// Discover the coordinator of the worker's group. The snapshot carries
    /// the discovery error code when the coordinator is unknown.
    pub async fn consumer_group_metadata(
        &self,
        group: impl Into<String>,
    ) -> Result<CoordinatorSnapshot> {
        let group = group.into();
        self.call(|reply| Request::ConsumerGroupMetadata { group, reply })
            .await
    }

    /// Force a metadata refresh, optionally scoped to one topic, and return
    /// the fresh snapshot.
    pub async fn metadata(&self, topic: Option<String>) -> Result<MetadataSnapshot> {
        self.call(|reply| Request::Metadata { topic, reply }).await
    }

    pub async fn join_group(
        &self,
        topics: Vec<String>,
        session_timeout_ms: i32,
    ) -> Result<JoinGroupResponse> {
        self.call(|reply| Request::JoinGroup {
            topics,
            session_timeout_ms,
            reply,
        })
        .await?
    }

    pub async fn sync_group(&self, request: SyncGroupRequest) -> Result<SyncGroupResponse> {
        self.call(|reply| Request::SyncGroup { request, reply })
            .await?
    }

    pub async fn heartbeat(&self, request: HeartbeatRequest) -> Result<HeartbeatResponse> {
        self.call(|reply| Request::Heartbeat { request, reply })
            .await?
    }

    /// Attach a sink to the worker and return its output sequence. Fails with
    /// [`ClientError::StreamInUse`] while a live stream is attached.
    pub async fn create_stream(&self) -> Result<MessageStream> {
        self.call(|reply| Request::CreateStream { reply }).await?
    }

    /// Kick off the polling loop feeding the stream created by
    /// [`create_stream`](Self::create_stream). With `auto_commit` each polled
    /// offset is committed under the worker's group.
    pub async fn start_streaming(
        &self,
        topic: impl Into<String>,
        partition: i32,
        offset: i64,
        auto_commit: bool,
        poll_interval: Duration,
    ) -> Result<()> {
        self.post(Request::StartStreaming {
            topic: topic.into(),
            partition,
            offset,
            auto_commit,
            poll_interval,
        })
        .await
    }

    /// Stop the polling loop and end the stream. A poll already in flight is
    /// discarded when it arrives.
    pub async fn stop_streaming(&self) -> Result<()> {
        self.post(Request::StopStreaming).await
    }
}
