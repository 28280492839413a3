//! The consumer-facing side of the streaming loop.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::protocol::Message;

/// Worker-owned sending half of a stream.
///
/// Delivery is one-way: the worker emits, the consumer reads the
/// [`MessageStream`] at its own pace. Dropping the sink ends the stream.
#[derive(Debug)]
pub(crate) struct StreamSink {
    tx: mpsc::UnboundedSender<Message>,
}

impl StreamSink {
    pub(crate) fn new() -> (Self, MessageStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, MessageStream { rx })
    }

    /// A sink is live while its consumer still holds the receiving half.
    pub(crate) fn is_live(&self) -> bool {
        !self.tx.is_closed()
    }

    pub(crate) fn emit(&self, message: Message) {
        // The consumer may have walked away; that is its prerogative.
        let _ = self.tx.send(message);
    }
}

/// Output sequence of a worker stream.
///
/// Ends when the stream is stopped via `stop_streaming` or the worker shuts
/// down.
#[derive(Debug)]
pub struct MessageStream {
    rx: mpsc::UnboundedReceiver<Message>,
}

impl MessageStream {
    /// Receive the next message, `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }
}

impl Stream for MessageStream {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::StreamExt;

    fn message(offset: i64) -> Message {
        Message {
            offset,
            key: None,
            value: Some(b"payload".to_vec()),
        }
    }

    #[tokio::test]
    async fn emitted_messages_arrive_in_order() {
        let (sink, mut stream) = StreamSink::new();
        sink.emit(message(1));
        sink.emit(message(2));

        assert_eq!(stream.next().await.unwrap().offset, 1);
        assert_eq!(stream.recv().await.unwrap().offset, 2);
    }

    #[tokio::test]
    async fn dropping_the_sink_ends_the_stream() {
        let (sink, mut stream) = StreamSink::new();
        sink.emit(message(1));
        drop(sink);

        assert!(stream.recv().await.is_some());
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn liveness_tracks_the_consumer() {
        let (sink, stream) = StreamSink::new();
        assert!(sink.is_live());
        drop(stream);
        assert!(!sink.is_live());
    }
}
