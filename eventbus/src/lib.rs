//! Bounded in-process event channels.
//!
//! This crate provides the only communication path between bounded contexts:
//! a bounded FIFO channel per event category. Publishing into a full channel
//! suspends the publisher (backpressure) rather than dropping the event, and
//! a single consumer takes events in the order they were published.
//!
//! Channels have process lifetime. They are created once at startup and torn
//! down when the last publisher or the subscriber is dropped; nothing is
//! persisted across restarts.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Default capacity for an event channel.
pub const DEFAULT_CAPACITY: usize = 100;

/// Creates a bounded event channel carrying events of type `E`.
///
/// `capacity` must be greater than zero. The returned publisher can be
/// cloned cheaply; the subscriber is the channel's single consumer.
pub fn channel<E>(capacity: usize) -> (EventPublisher<E>, EventSubscriber<E>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventPublisher { tx }, EventSubscriber { rx })
}

/// The publishing half of an event channel.
#[derive(Debug)]
pub struct EventPublisher<E> {
    tx: mpsc::Sender<E>,
}

// Manual impl: a publisher is cloneable regardless of whether `E` is.
impl<E> Clone for EventPublisher<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventPublisher<E> {
    /// Publishes one event onto the channel.
    ///
    /// Suspends the caller while the channel is full and resumes once the
    /// subscriber has taken an event. Fails only when the subscriber has
    /// been dropped.
    pub async fn publish(&self, event: E) -> Result<(), PublishError> {
        self.tx.send(event).await.map_err(|_| PublishError::Closed)
    }
}

/// The consuming half of an event channel.
#[derive(Debug)]
pub struct EventSubscriber<E> {
    rx: mpsc::Receiver<E>,
}

impl<E> EventSubscriber<E> {
    /// Takes the next event, suspending until one is available.
    ///
    /// Returns `None` once every publisher has been dropped and the channel
    /// has been drained, which is the cooperative shutdown signal for
    /// consumer loops.
    pub async fn take(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    /// Takes the next event without suspending.
    pub fn try_take(&mut self) -> Result<E, TryTakeError> {
        self.rx.try_recv().map_err(|e| match e {
            TryRecvError::Empty => TryTakeError::Empty,
            TryRecvError::Disconnected => TryTakeError::Closed,
        })
    }
}

/// Error returned when publishing onto a channel whose subscriber is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The subscriber was dropped; the event cannot be delivered.
    #[error("event channel closed: the subscriber was dropped")]
    Closed,
}

/// Error returned by [`EventSubscriber::try_take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryTakeError {
    /// No event is currently queued.
    #[error("no event is currently queued")]
    Empty,
    /// Every publisher was dropped and the channel is drained.
    #[error("event channel closed: all publishers were dropped")]
    Closed,
}
