use crate::api::ActionDto;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ─── Wire events ──────────────────────────────────────────────────────────

/// State-change notification from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangeEvent {
    pub action_id: u32,
    pub state: String,
    pub timestamp: DateTime<Utc>,
}

/// One message from the feed.
///
/// The service sends no envelope: creations arrive as full action objects
/// (the `/actions/stream` channel) and state changes as
/// `{action_id, state, timestamp}` (the `/actions/state/stream` channel), so
/// discrimination is by field shape. The required fields are disjoint, which
/// makes the untagged representation unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionEvent {
    StateChanged(StateChangeEvent),
    Created(ActionDto),
}

// ─── EventSource ──────────────────────────────────────────────────────────

/// A feed of action events.
///
/// One capability: deliver the next event. `Ok(None)` means the feed is
/// exhausted. The dashboard stays correct with no feed at all (see
/// [`NullEventSource`]); it only loses liveness.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn next_event(&mut self) -> Result<Option<ActionEvent>>;
}

/// Feed that never delivers anything. Stands in whenever no streaming
/// channel is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSource;

impl EventSource for NullEventSource {
    async fn next_event(&mut self) -> Result<Option<ActionEvent>> {
        Ok(None)
    }
}

/// Feed backed by a tokio mpsc channel.
///
/// Whatever owns the transport (a WebSocket task, a test) pushes decoded
/// events into the sender half; the feed ends once every sender is dropped
/// and the buffer drains.
#[derive(Debug)]
pub struct ChannelEventSource {
    rx: mpsc::Receiver<ActionEvent>,
}

impl ChannelEventSource {
    pub fn channel(capacity: usize) -> (mpsc::Sender<ActionEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }
}

impl EventSource for ChannelEventSource {
    async fn next_event(&mut self) -> Result<Option<ActionEvent>> {
        Ok(self.rx.recv().await)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
