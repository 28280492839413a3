//! Worker state and the event loop owning it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::broker::{BrokerAddr, BrokerRegistry};
use crate::config::{
    WorkerConfig, CLIENT_ID, COORDINATOR_RETRY, METADATA_RETRY, STREAM_MAX_BYTES,
    STREAM_MIN_BYTES, STREAM_WAIT_TIME_MS,
};
use crate::coordinator::{coordinator_index, CoordinatorSnapshot};
use crate::error::{ClientError, FatalError, Result};
use crate::metadata::{leader_index, MetadataSnapshot};
use crate::network::NetworkClient;
use crate::protocol::{
    ErrorCode, FetchRequest, FetchResponse, HeartbeatRequest, HeartbeatResponse,
    JoinGroupRequest, JoinGroupResponse, OffsetCommitRequest, OffsetCommitResponse,
    OffsetFetchRequest, OffsetFetchResponse, OffsetRequest, OffsetResponse, ProduceRequest,
    SyncGroupRequest, SyncGroupResponse, WireProtocol,
};
use crate::retry::Retry;

use super::stream::StreamSink;
use super::{MessageStream, ProduceOutcome, Request};

/// All mutable state of one worker. Owned by a single task; mutation happens
/// only between mailbox messages.
pub(crate) struct WorkerState<N: NetworkClient> {
    name: String,
    net: N,
    codec: Arc<dyn WireProtocol>,
    registry: BrokerRegistry<N::Socket>,
    metadata: MetadataSnapshot,
    coordinator: Option<CoordinatorSnapshot>,
    /// Assigned at handling time, strictly increasing across the worker's
    /// lifetime (wrapping at the wire's signed 32-bit range).
    correlation_id: i32,
    consumer_group: Option<String>,
    seeds: Vec<BrokerAddr>,
    sync_timeout: Duration,
    metadata_update_interval: Duration,
    consumer_group_update_interval: Duration,
    sink: Option<StreamSink>,
    /// Weak sender into the own mailbox, used by the streaming loop to
    /// re-post itself. Weak so that the worker does not keep its own mailbox
    /// open after the last handle is gone.
    self_tx: mpsc::WeakSender<Request>,
}

impl<N: NetworkClient> WorkerState<N> {
    pub(crate) fn new(
        config: WorkerConfig,
        net: N,
        codec: Arc<dyn WireProtocol>,
        self_tx: mpsc::WeakSender<Request>,
    ) -> Self {
        Self {
            name: config.name,
            net,
            codec,
            registry: BrokerRegistry::new(),
            metadata: MetadataSnapshot::default(),
            coordinator: None,
            correlation_id: 0,
            consumer_group: config.consumer_group,
            seeds: config.uris,
            sync_timeout: config.sync_timeout,
            metadata_update_interval: config.metadata_update_interval,
            consumer_group_update_interval: config.consumer_group_update_interval,
            sink: None,
            self_tx,
        }
    }

    pub(crate) async fn connect_seeds(&mut self) {
        self.registry.connect_seeds(&self.net, &self.seeds).await;
    }

    pub(crate) async fn run(mut self, mut rx: mpsc::Receiver<Request>) -> Result<(), FatalError> {
        let result = self.serve(&mut rx).await;
        if let Err(error) = &result {
            error!(worker = %self.name, %error, "worker terminating");
        }
        self.teardown().await;
        result
    }

    /// One message or timer tick at a time, to completion. Suspension happens
    /// only here, between messages.
    async fn serve(&mut self, rx: &mut mpsc::Receiver<Request>) -> Result<(), FatalError> {
        let mut metadata_tick = interval_at(
            Instant::now() + self.metadata_update_interval,
            self.metadata_update_interval,
        );
        metadata_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut coordinator_tick = interval_at(
            Instant::now() + self.consumer_group_update_interval,
            self.consumer_group_update_interval,
        );
        coordinator_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let group_configured = self.consumer_group.is_some();

        loop {
            tokio::select! {
                request = rx.recv() => match request {
                    Some(request) => self.handle_request(request).await?,
                    None => return Ok(()),
                },
                _ = metadata_tick.tick() => self.update_metadata().await?,
                _ = coordinator_tick.tick(), if group_configured => {
                    self.update_coordinator().await;
                }
            }
        }
    }

    async fn teardown(&mut self) {
        self.sink = None;
        self.registry.close_all(&self.net).await;
        debug!(worker = %self.name, "worker shut down");
    }

    async fn handle_request(&mut self, request: Request) -> Result<(), FatalError> {
        match request {
            Request::ConsumerGroup { reply } => {
                let _ = reply.send(self.consumer_group.clone());
            }
            Request::Produce { request, reply } => {
                let outcome = self.handle_produce(request).await?;
                let _ = reply.send(outcome);
            }
            Request::Fetch {
                request,
                auto_commit,
                reply,
            } => {
                let response = self.handle_fetch(request, auto_commit).await?;
                let _ = reply.send(response);
            }
            Request::Offset { request, reply } => {
                let response = self.handle_offset(request).await?;
                let _ = reply.send(response);
            }
            Request::OffsetFetch { request, reply } => {
                let response = self.handle_offset_fetch(request).await?;
                let _ = reply.send(response);
            }
            Request::OffsetCommit { request, reply } => {
                let response = self.handle_offset_commit(request).await?;
                let _ = reply.send(response);
            }
            Request::ConsumerGroupMetadata { group, reply } => {
                debug!(worker = %self.name, %group, "coordinator lookup");
                self.require_consumer_group();
                let snapshot = self.update_coordinator().await;
                let _ = reply.send(snapshot);
            }
            Request::Metadata { topic, reply } => {
                let snapshot = self.handle_metadata(topic).await?;
                let _ = reply.send(snapshot);
            }
            Request::JoinGroup {
                topics,
                session_timeout_ms,
                reply,
            } => {
                let response = self.handle_join_group(topics, session_timeout_ms).await?;
                let _ = reply.send(response);
            }
            Request::SyncGroup { request, reply } => {
                let response = self.handle_sync_group(request).await?;
                let _ = reply.send(response);
            }
            Request::Heartbeat { request, reply } => {
                let response = self.handle_heartbeat(request).await?;
                let _ = reply.send(response);
            }
            Request::CreateStream { reply } => {
                let _ = reply.send(self.handle_create_stream());
            }
            Request::StartStreaming {
                topic,
                partition,
                offset,
                auto_commit,
                poll_interval,
            } => {
                self.handle_start_streaming(topic, partition, offset, auto_commit, poll_interval)
                    .await?;
            }
            Request::StopStreaming => self.handle_stop_streaming(),
        }
        Ok(())
    }

    // ===== metadata refresher =====

    /// Fetch a metadata snapshot, optionally scoped to one topic.
    ///
    /// Consumes one correlation id per attempt. No broker answering at all is
    /// fatal; exhausting the retries on a cluster without elected leaders
    /// degrades to the empty snapshot.
    async fn retrieve_metadata(
        &mut self,
        topic: Option<&str>,
    ) -> Result<MetadataSnapshot, FatalError> {
        let mut retry = Retry::new(METADATA_RETRY);
        loop {
            let correlation_id = self.correlation_id;
            let payload = self.codec.encode_metadata(correlation_id, CLIENT_ID, topic);
            self.correlation_id = self.correlation_id.wrapping_add(1);

            let Some(bytes) = self.first_broker_response(&payload).await else {
                error!(worker = %self.name, "unable to fetch metadata from any broker");
                return Err(FatalError::NoMetadataAvailable);
            };

            match self.codec.decode_metadata(&bytes) {
                Ok(snapshot) if !snapshot.leader_unavailable() => return Ok(snapshot),
                Ok(_) => {
                    if !retry
                        .pause("metadata", &"topic without available leader")
                        .await
                    {
                        warn!(
                            worker = %self.name,
                            error_code = ?ErrorCode::LeaderNotAvailable,
                            "metadata retries exhausted",
                        );
                        return Ok(MetadataSnapshot::default());
                    }
                }
                Err(codec_error) => {
                    if !retry.pause("metadata", &codec_error).await {
                        warn!(
                            worker = %self.name,
                            error = %codec_error,
                            "metadata retries exhausted",
                        );
                        return Ok(MetadataSnapshot::default());
                    }
                }
            }
        }
    }

    /// Refresh the full cluster view: retrieve, reconcile the registry
    /// against the reported brokers, install the snapshot.
    pub(crate) async fn update_metadata(&mut self) -> Result<(), FatalError> {
        let snapshot = self.retrieve_metadata(None).await?;
        self.registry.reconcile(&self.net, &snapshot.brokers).await;
        self.metadata = snapshot;
        Ok(())
    }

    // ===== coordinator refresher =====

    /// Discover the group coordinator. Installs the snapshot on success; on
    /// exhaustion returns one carrying the last error code and leaves the
    /// cache untouched.
    async fn update_coordinator(&mut self) -> CoordinatorSnapshot {
        let group = self.require_consumer_group().to_owned();
        let mut retry = Retry::new(COORDINATOR_RETRY);
        loop {
            let correlation_id = self.correlation_id;
            let payload = self
                .codec
                .encode_consumer_metadata(correlation_id, CLIENT_ID, &group);
            self.correlation_id = self.correlation_id.wrapping_add(1);

            let snapshot = match self.first_broker_response(&payload).await {
                Some(bytes) => match self.codec.decode_consumer_metadata(&bytes) {
                    Ok(snapshot) => snapshot,
                    Err(codec_error) => {
                        warn!(worker = %self.name, error = %codec_error, "malformed consumer metadata response");
                        CoordinatorSnapshot::error(ErrorCode::Unknown)
                    }
                },
                None => CoordinatorSnapshot::error(ErrorCode::BrokerNotAvailable),
            };

            if !snapshot.error_code.is_error() {
                self.coordinator = Some(snapshot.clone());
                return snapshot;
            }
            if !retry
                .pause("consumer metadata", &format!("{:?}", snapshot.error_code))
                .await
            {
                error!(
                    worker = %self.name,
                    %group,
                    error_code = ?snapshot.error_code,
                    "fetching consumer group metadata failed",
                );
                return snapshot;
            }
        }
    }

    /// Iterate the registry in order and return the first non-empty reply,
    /// skipping brokers without a live socket.
    async fn first_broker_response(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        for broker in self.registry.iter_mut() {
            let Some(socket) = broker.socket.as_mut() else {
                continue;
            };
            if !self.net.is_connected(socket) {
                continue;
            }
            match self
                .net
                .send_sync_request(socket, payload, self.sync_timeout)
                .await
            {
                Some(reply) if !reply.is_empty() => return Some(reply),
                _ => debug!(broker = %broker.addr, "broker did not answer"),
            }
        }
        None
    }

    // ===== request router =====

    async fn route_partition(
        &mut self,
        topic: &str,
        partition: i32,
    ) -> Result<Option<usize>, FatalError> {
        if let Some(index) = leader_index(&self.metadata, &self.registry, topic, partition) {
            return Ok(Some(index));
        }
        self.update_metadata().await?;
        Ok(leader_index(&self.metadata, &self.registry, topic, partition))
    }

    /// Like [`route_partition`](Self::route_partition), but a miss first runs
    /// a topic-scoped query: a metadata request naming the topic prompts the
    /// broker to auto-create it before the full refresh runs.
    async fn route_produce(
        &mut self,
        topic: &str,
        partition: i32,
    ) -> Result<Option<usize>, FatalError> {
        if let Some(index) = leader_index(&self.metadata, &self.registry, topic, partition) {
            return Ok(Some(index));
        }
        let _ = self.retrieve_metadata(Some(topic)).await?;
        self.update_metadata().await?;
        Ok(leader_index(&self.metadata, &self.registry, topic, partition))
    }

    async fn route_coordinator(&mut self, use_first_as_default: bool) -> Option<usize> {
        if let Some(coordinator) = &self.coordinator {
            if let Some(index) = coordinator_index(coordinator, &self.registry) {
                return Some(index);
            }
        }
        self.update_coordinator().await;
        if let Some(coordinator) = &self.coordinator {
            if let Some(index) = coordinator_index(coordinator, &self.registry) {
                return Some(index);
            }
        }
        if use_first_as_default {
            return self.registry.first_index();
        }
        None
    }

    // ===== operation handlers =====

    async fn handle_produce(
        &mut self,
        request: ProduceRequest,
    ) -> Result<Result<ProduceOutcome>, FatalError> {
        let Some(index) = self.route_produce(&request.topic, request.partition).await? else {
            warn!(
                worker = %self.name,
                topic = %request.topic,
                partition = request.partition,
                "produce: no leader available",
            );
            return Ok(Err(ClientError::LeaderNotAvailable {
                topic: request.topic,
                partition: request.partition,
            }));
        };

        // Produce consumes two ids: the request goes out with the incremented
        // id and the stored id advances once more after dispatch.
        let correlation_id = self.correlation_id.wrapping_add(1);
        let payload = self.codec.encode_produce(correlation_id, CLIENT_ID, &request);
        let outcome = if request.required_acks == 0 {
            if let Err(error) = self.send_async(index, &payload).await {
                warn!(worker = %self.name, %error, "async produce dispatch failed");
            }
            Ok(ProduceOutcome::Dispatched)
        } else {
            match self.sync_exchange(index, &payload).await {
                Some(bytes) => self
                    .codec
                    .decode_produce(&bytes)
                    .map(ProduceOutcome::Response)
                    .map_err(ClientError::from),
                None => Err(ClientError::NoResponse),
            }
        };
        self.correlation_id = self.correlation_id.wrapping_add(2);
        Ok(outcome)
    }

    async fn handle_fetch(
        &mut self,
        request: FetchRequest,
        auto_commit: bool,
    ) -> Result<Result<FetchResponse>, FatalError> {
        if auto_commit {
            self.require_consumer_group();
        }
        let Some(index) = self.route_partition(&request.topic, request.partition).await? else {
            warn!(worker = %self.name, topic = %request.topic, "fetch: topic not found");
            return Ok(Err(ClientError::TopicNotFound {
                topic: request.topic,
            }));
        };

        let correlation_id = self.correlation_id;
        let payload = self.codec.encode_fetch(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        let Some(bytes) = reply else {
            return Ok(Err(ClientError::NoResponse));
        };
        let response = match self.codec.decode_fetch(&bytes) {
            Ok(response) => response,
            Err(codec_error) => return Ok(Err(codec_error.into())),
        };

        if auto_commit {
            let last_offset = response
                .topics
                .first()
                .and_then(|t| t.partitions.first())
                .and_then(|p| p.last_offset);
            if let Some(offset) = last_offset {
                let commit = OffsetCommitRequest {
                    topic: request.topic.clone(),
                    partition: request.partition,
                    offset,
                    metadata: String::new(),
                    consumer_group: None,
                };
                if let Err(error) = self.handle_offset_commit(commit).await? {
                    warn!(worker = %self.name, %error, "auto-commit after fetch failed");
                }
            }
        }

        Ok(Ok(response))
    }

    async fn handle_offset(
        &mut self,
        request: OffsetRequest,
    ) -> Result<Result<OffsetResponse>, FatalError> {
        let Some(index) = self.route_partition(&request.topic, request.partition).await? else {
            warn!(worker = %self.name, topic = %request.topic, "offset: topic not found");
            return Ok(Err(ClientError::TopicNotFound {
                topic: request.topic,
            }));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_list_offsets(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_list_offsets(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    async fn handle_offset_fetch(
        &mut self,
        mut request: OffsetFetchRequest,
    ) -> Result<Result<OffsetFetchResponse>, FatalError> {
        self.require_consumer_group();
        if request.consumer_group.is_none() {
            request.consumer_group = self.consumer_group.clone();
        }
        let Some(index) = self.route_coordinator(false).await else {
            warn!(worker = %self.name, topic = %request.topic, "offset fetch: no coordinator");
            return Ok(Err(ClientError::TopicNotFound {
                topic: request.topic,
            }));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_offset_fetch(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_offset_fetch(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    async fn handle_offset_commit(
        &mut self,
        mut request: OffsetCommitRequest,
    ) -> Result<Result<OffsetCommitResponse>, FatalError> {
        self.require_consumer_group();
        if request.consumer_group.is_none() {
            request.consumer_group = self.consumer_group.clone();
        }
        // Commits fall back to the registry head when no coordinator is
        // known.
        let Some(index) = self.route_coordinator(true).await else {
            warn!(worker = %self.name, topic = %request.topic, "offset commit: no broker available");
            return Ok(Err(ClientError::NoResponse));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_offset_commit(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_offset_commit(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    async fn handle_metadata(
        &mut self,
        topic: Option<String>,
    ) -> Result<MetadataSnapshot, FatalError> {
        let snapshot = self.retrieve_metadata(topic.as_deref()).await?;
        self.metadata = snapshot.clone();
        Ok(snapshot)
    }

    async fn handle_join_group(
        &mut self,
        topics: Vec<String>,
        session_timeout_ms: i32,
    ) -> Result<Result<JoinGroupResponse>, FatalError> {
        let group = self.require_consumer_group().to_owned();
        let request = JoinGroupRequest {
            group,
            member_id: String::new(),
            topics,
            session_timeout_ms,
        };
        let Some(index) = self.route_coordinator(false).await else {
            warn!(worker = %self.name, "join group: no coordinator");
            return Ok(Err(ClientError::NoResponse));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_join_group(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_join_group(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    async fn handle_sync_group(
        &mut self,
        request: SyncGroupRequest,
    ) -> Result<Result<SyncGroupResponse>, FatalError> {
        self.require_consumer_group();
        let Some(index) = self.route_coordinator(false).await else {
            warn!(worker = %self.name, group = %request.group, "sync group: no coordinator");
            return Ok(Err(ClientError::NoResponse));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_sync_group(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_sync_group(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    async fn handle_heartbeat(
        &mut self,
        request: HeartbeatRequest,
    ) -> Result<Result<HeartbeatResponse>, FatalError> {
        self.require_consumer_group();
        let Some(index) = self.route_coordinator(false).await else {
            warn!(worker = %self.name, group = %request.group, "heartbeat: no coordinator");
            return Ok(Err(ClientError::NoResponse));
        };

        let correlation_id = self.correlation_id;
        let payload = self
            .codec
            .encode_heartbeat(correlation_id, CLIENT_ID, &request);
        let reply = self.sync_exchange(index, &payload).await;
        self.correlation_id = self.correlation_id.wrapping_add(1);

        Ok(match reply {
            Some(bytes) => self
                .codec
                .decode_heartbeat(&bytes)
                .map_err(ClientError::from),
            None => Err(ClientError::NoResponse),
        })
    }

    // ===== streaming =====

    fn handle_create_stream(&mut self) -> Result<MessageStream> {
        if let Some(sink) = &self.sink {
            if sink.is_live() {
                warn!(worker = %self.name, "stream already attached to this worker");
                return Err(ClientError::StreamInUse);
            }
        }
        let (sink, stream) = StreamSink::new();
        self.sink = Some(sink);
        Ok(stream)
    }

    async fn handle_start_streaming(
        &mut self,
        topic: String,
        partition: i32,
        offset: i64,
        auto_commit: bool,
        poll_interval: Duration,
    ) -> Result<(), FatalError> {
        let live = self.sink.as_ref().map(StreamSink::is_live).unwrap_or(false);
        if !live {
            // The stream was cancelled (or its consumer walked away) while
            // this poll was in flight.
            debug!(worker = %self.name, topic = %topic, "stream poll without sink, dropping");
            self.sink = None;
            return Ok(());
        }

        let request = FetchRequest {
            topic: topic.clone(),
            partition,
            offset,
            wait_time_ms: STREAM_WAIT_TIME_MS,
            min_bytes: STREAM_MIN_BYTES,
            max_bytes: STREAM_MAX_BYTES,
        };
        let mut next_offset = offset;
        match self.handle_fetch(request, auto_commit).await? {
            Ok(response) => {
                let data = response
                    .topics
                    .into_iter()
                    .next()
                    .and_then(|t| t.partitions.into_iter().next());
                if let Some(data) = data {
                    if let Some(sink) = &self.sink {
                        for message in data.messages {
                            sink.emit(message);
                        }
                    }
                    if let Some(last) = data.last_offset {
                        next_offset = last + 1;
                    }
                }
            }
            Err(client_error) => {
                debug!(worker = %self.name, error = %client_error, "stream fetch failed, keeping offset");
            }
        }

        self.schedule_stream_poll(topic, partition, next_offset, auto_commit, poll_interval);
        Ok(())
    }

    fn schedule_stream_poll(
        &self,
        topic: String,
        partition: i32,
        offset: i64,
        auto_commit: bool,
        poll_interval: Duration,
    ) {
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(poll_interval).await;
            // The mailbox may be gone; the stream dies with the worker.
            let Some(tx) = tx.upgrade() else {
                return;
            };
            let _ = tx
                .send(Request::StartStreaming {
                    topic,
                    partition,
                    offset,
                    auto_commit,
                    poll_interval,
                })
                .await;
        });
    }

    fn handle_stop_streaming(&mut self) {
        if self.sink.take().is_some() {
            debug!(worker = %self.name, "stream stopped");
        }
    }

    // ===== plumbing =====

    async fn sync_exchange(&mut self, index: usize, payload: &[u8]) -> Option<Vec<u8>> {
        let timeout = self.sync_timeout;
        let broker = self.registry.get_mut(index)?;
        let socket = broker.socket.as_mut()?;
        self.net.send_sync_request(socket, payload, timeout).await
    }

    async fn send_async(&mut self, index: usize, payload: &[u8]) -> std::io::Result<()> {
        let broker = self.registry.get_mut(index).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "broker no longer in registry")
        })?;
        let socket = broker.socket.as_mut().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotConnected, "broker has no socket")
        })?;
        self.net.send_async_request(socket, payload).await
    }

    /// Group-dependent operations on a group-less worker are a caller
    /// contract violation; the worker asserts instead of guessing.
    fn require_consumer_group(&self) -> &str {
        self.consumer_group
            .as_deref()
            .expect("operation requires a consumer group, but the worker was configured without one")
    }
}
