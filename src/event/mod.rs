//! Publisher port and application lifecycle marker.
//!
//! The core announces message creation through an injected [`Publisher`]
//! rather than a module-level singleton, so tests can substitute a no-op or
//! recording implementation. Publishing is fire-and-forget: delivery is
//! at-least-once at best and subscribers must tolerate concurrent delivery.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::sync::broadcast;
use tracing::info;

/// Kind of a published domain event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A record was created.
    Created,
    /// A record was updated.
    Updated,
    /// A record was deleted.
    Deleted,
}

impl EventKind {
    /// Returns the wire name of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// A published event: a kind plus its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event<T> {
    /// What happened.
    pub kind: EventKind,
    /// The subject of the event.
    pub payload: T,
}

/// Port through which the core announces domain events.
///
/// `publish` must not block on slow subscribers and must not fail the caller:
/// the contract is fire-and-forget.
pub trait Publisher<T>: Send + Sync {
    /// Publishes an event to whoever is listening.
    fn publish(&self, kind: EventKind, payload: T);
}

/// Publisher that drops every event. Useful as a test default and for
/// embedders that do not care about events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPublisher;

impl<T> Publisher<T> for NoopPublisher {
    fn publish(&self, _kind: EventKind, _payload: T) {}
}

/// Publisher that records every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingPublisher<T> {
    events: Mutex<Vec<Event<T>>>,
}

impl<T> RecordingPublisher<T> {
    /// Creates an empty recording publisher.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("recording publisher lock poisoned").len()
    }

    /// Returns true if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> RecordingPublisher<T> {
    /// Returns a snapshot of the recorded events in publication order.
    pub fn events(&self) -> Vec<Event<T>> {
        self.events
            .lock()
            .expect("recording publisher lock poisoned")
            .clone()
    }
}

impl<T: Send> Publisher<T> for RecordingPublisher<T> {
    fn publish(&self, kind: EventKind, payload: T) {
        self.events
            .lock()
            .expect("recording publisher lock poisoned")
            .push(Event { kind, payload });
    }
}

/// In-process fan-out publisher backed by a tokio broadcast channel.
///
/// Events published while no subscriber exists are dropped, consistent with
/// the no-exactly-once contract.
#[derive(Clone, Debug)]
pub struct BroadcastPublisher<T> {
    sender: broadcast::Sender<Event<T>>,
}

impl<T: Clone + Send + 'static> BroadcastPublisher<T> {
    /// Creates a publisher whose channel buffers up to `capacity` events per
    /// subscriber before lagging.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event<T>> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Send + 'static> Publisher<T> for BroadcastPublisher<T> {
    fn publish(&self, kind: EventKind, payload: T) {
        // A send error only means nobody is listening.
        let _ = self.sender.send(Event { kind, payload });
    }
}

/// Start-of-run marker created once at process start and threaded to
/// consumers that report uptime or run duration.
///
/// This is an explicit, lifecycle-scoped value rather than global mutable
/// state: whoever constructs it owns it and hands it down.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    started: Instant,
    started_at: DateTime<Local>,
}

impl Lifecycle {
    /// Captures the start marker and logs the startup event.
    pub fn start() -> Self {
        info!("app initialized");
        Self {
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    /// Returns the wall-clock time the run started.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Returns time elapsed since the run started.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Logs the shutdown event with the whole-second run duration.
    pub fn shutdown(&self) {
        let seconds = self.uptime().as_secs();
        info!(duration_seconds = seconds, "app exited");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Created.as_str(), "created");
        assert_eq!(EventKind::Updated.as_str(), "updated");
        assert_eq!(EventKind::Deleted.as_str(), "deleted");
    }

    #[test]
    fn test_recording_publisher_captures_in_order() {
        let publisher = RecordingPublisher::new();
        publisher.publish(EventKind::Created, "first");
        publisher.publish(EventKind::Deleted, "second");

        let events = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Created);
        assert_eq!(events[0].payload, "first");
        assert_eq!(events[1].kind, EventKind::Deleted);
        assert_eq!(events[1].payload, "second");
    }

    #[test]
    fn test_noop_publisher_accepts_anything() {
        let publisher = NoopPublisher;
        publisher.publish(EventKind::Created, 42);
        publisher.publish(EventKind::Updated, "text");
    }

    #[tokio::test]
    async fn test_broadcast_publisher_fans_out() {
        let publisher: BroadcastPublisher<String> = BroadcastPublisher::new(8);
        let mut rx_a = publisher.subscribe();
        let mut rx_b = publisher.subscribe();

        publisher.publish(EventKind::Created, "hello".to_string());

        let event_a = rx_a.recv().await.unwrap();
        let event_b = rx_b.recv().await.unwrap();
        assert_eq!(event_a.kind, EventKind::Created);
        assert_eq!(event_a.payload, "hello");
        assert_eq!(event_b, event_a);
    }

    #[test]
    fn test_broadcast_publish_without_subscribers_is_dropped() {
        let publisher: BroadcastPublisher<u8> = BroadcastPublisher::new(4);
        // Must not panic or block.
        publisher.publish(EventKind::Created, 1);
    }

    #[test]
    fn test_lifecycle_uptime_is_monotonic() {
        let lifecycle = Lifecycle::start();
        let first = lifecycle.uptime();
        let second = lifecycle.uptime();
        assert!(second >= first);
        assert!(lifecycle.started_at() <= Local::now());
    }
}
