//! A stateful client worker for Kafka-style message broker clusters.
//!
//! One [`Worker`] owns the sockets to a cluster's brokers, tracks cluster
//! metadata and (optionally) a consumer-group coordinator, and serializes all
//! requests through a single event loop. Wire encoding and transport are
//! collaborators: the worker is generic over a [`network::NetworkClient`] and
//! takes a [`protocol::WireProtocol`] codec.

pub mod broker;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod metadata;
pub mod network;
pub mod protocol;
mod retry;
pub mod worker;

pub use broker::BrokerAddr;
pub use config::WorkerConfig;
pub use error::{ClientError, FatalError};
pub use worker::{MessageStream, ProduceOutcome, Worker, WorkerHandle};
