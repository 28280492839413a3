//! The transport collaborator.
//!
//! [`NetworkClient`] is the seam between the worker and the outside world:
//! opening sockets, strictly request/reply sync exchanges bounded by the sync
//! timeout, and fire-and-forget async sends. [`TcpClient`] is the production
//! implementation; tests install fakes.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::broker::BrokerAddr;

#[async_trait]
pub trait NetworkClient: Send + Sync + 'static {
    type Socket: Send + Sync + 'static;

    async fn create_socket(&self, addr: &BrokerAddr) -> io::Result<Self::Socket>;

    async fn close_socket(&self, socket: &mut Self::Socket);

    /// One request/reply exchange. `None` on timeout or a broken connection;
    /// the socket is considered unusable afterwards.
    async fn send_sync_request(
        &self,
        socket: &mut Self::Socket,
        request: &[u8],
        timeout: Duration,
    ) -> Option<Vec<u8>>;

    /// Fire-and-forget send; no reply is read.
    async fn send_async_request(
        &self,
        socket: &mut Self::Socket,
        request: &[u8],
    ) -> io::Result<()>;

    fn is_connected(&self, socket: &Self::Socket) -> bool;
}

/// Plain-TCP transport. Messages are framed with a signed 32-bit big-endian
/// length prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpClient;

/// A connection to one broker.
///
/// `stream` goes `None` once the connection is unusable: after an I/O error,
/// and also after a sync timeout, because exchanges are strictly
/// request/reply and a late reply would desynchronize the stream.
#[derive(Debug)]
pub struct TcpSocket {
    stream: Option<BufStream<TcpStream>>,
}

#[async_trait]
impl NetworkClient for TcpClient {
    type Socket = TcpSocket;

    async fn create_socket(&self, addr: &BrokerAddr) -> io::Result<TcpSocket> {
        info!(broker = %addr, "establishing new connection");
        let stream = TcpStream::connect((addr.host.as_str(), addr.port)).await?;
        stream.set_nodelay(true)?;
        Ok(TcpSocket {
            stream: Some(BufStream::new(stream)),
        })
    }

    async fn close_socket(&self, socket: &mut TcpSocket) {
        if let Some(mut stream) = socket.stream.take() {
            let _ = stream.shutdown().await;
        }
    }

    async fn send_sync_request(
        &self,
        socket: &mut TcpSocket,
        request: &[u8],
        timeout: Duration,
    ) -> Option<Vec<u8>> {
        let stream = socket.stream.as_mut()?;
        let exchange = async {
            write_frame(stream, request).await?;
            read_frame(stream).await
        };
        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(reply)) => Some(reply),
            Ok(Err(error)) => {
                warn!(%error, "connection broke during sync exchange");
                socket.stream = None;
                None
            }
            Err(_) => {
                debug!(timeout_ms = timeout.as_millis() as u64, "sync exchange timed out");
                socket.stream = None;
                None
            }
        }
    }

    async fn send_async_request(&self, socket: &mut TcpSocket, request: &[u8]) -> io::Result<()> {
        let stream = socket
            .stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "socket is closed"))?;
        match write_frame(stream, request).await {
            Ok(()) => Ok(()),
            Err(error) => {
                socket.stream = None;
                Err(error)
            }
        }
    }

    fn is_connected(&self, socket: &TcpSocket) -> bool {
        socket.stream.is_some()
    }
}

async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Send + Unpin,
{
    let len = i32::try_from(payload.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message too large: {}", payload.len()),
        )
    })?;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await
}

async fn read_frame<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Send + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = i32::from_be_bytes(len_buf);
    if len < 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("negative frame length: {len}"),
        ));
    }
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}
