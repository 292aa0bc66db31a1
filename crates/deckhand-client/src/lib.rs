//! `deckhand-client` — network layer for the deckhand dashboard.
//!
//! Everything here funnels mutations of the client-side action view through
//! one owner:
//!
//! ```text
//! ActionApi       ← typed reqwest client for the action service
//!     │              GET/POST/DELETE /actions, {error} bodies → ClientError
//!     ▼
//! SyncCoordinator ← owns the ActionStore; sequences bulk loads,
//!     │              create/delete intents, and feed events
//!     ▼
//! ActionStore     ← deckhand-core; insertion-ordered, id-unique,
//!                    stale-event-rejecting
//! ```
//!
//! The event feed is optional by design: [`EventSource`] has a single
//! capability (deliver the next event), [`NullEventSource`] satisfies it
//! when no streaming channel is wired up, and [`ChannelEventSource`] carries
//! decoded events from whatever transport a caller attaches. The dashboard
//! stays correct either way, it is just less live without a feed.

pub mod api;
pub mod coordinator;
pub mod error;
pub mod events;

pub use api::{ActionApi, ActionDto, CreateActionRequest, DeleteActionResponse};
pub use coordinator::{EventDisposition, RefreshOutcome, SyncCoordinator};
pub use error::ClientError;
pub use events::{ActionEvent, ChannelEventSource, EventSource, NullEventSource, StateChangeEvent};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, ClientError>;
