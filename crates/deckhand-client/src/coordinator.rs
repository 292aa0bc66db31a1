use crate::api::{ActionApi, ActionDto, CreateActionRequest};
use crate::events::{ActionEvent, EventSource};
use crate::Result;
use deckhand_core::store::{ActionStore, Removal, StateChangeOutcome, Upsert};
use deckhand_core::ActionRecord;
use tracing::debug;

// ─── Outcomes ─────────────────────────────────────────────────────────────

/// Result of a completed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The store now holds this many records.
    Loaded(usize),
    /// A newer refresh started while this one was in flight; its data was
    /// discarded unapplied.
    Superseded,
}

/// What became of a single feed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Inserted,
    DuplicateCreation,
    Applied,
    UnknownId,
    Stale,
}

// ─── SyncCoordinator ──────────────────────────────────────────────────────

/// Owns the action store and sequences every mutation source against it:
/// bulk loads, user-issued create/delete intents, and feed events.
///
/// Nothing else ever touches the store, which is what keeps its invariants
/// enforceable.
#[derive(Debug)]
pub struct SyncCoordinator {
    api: ActionApi,
    store: ActionStore,
    /// Tag of the most recently started refresh. A completion whose tag is
    /// no longer current belongs to a superseded fetch and is discarded.
    generation: u64,
    loaded: bool,
}

impl SyncCoordinator {
    pub fn new(api: ActionApi) -> Self {
        Self {
            api,
            store: ActionStore::new(),
            generation: 0,
            loaded: false,
        }
    }

    // ─── Bulk load ────────────────────────────────────────────────────────

    /// Fetch the full collection and replace the store with it.
    ///
    /// On failure the store is left exactly as it was: empty if nothing was
    /// ever loaded, otherwise the last-known data. The error is returned for
    /// the caller to report; whether to retry is the caller's decision.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        let generation = self.begin_refresh();
        let result = self.api.list_actions().await;
        self.finish_refresh(generation, result)
    }

    /// Start a refresh and return its generation tag.
    fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a completed fetch, unless a newer refresh started since.
    fn finish_refresh(
        &mut self,
        generation: u64,
        result: Result<Vec<ActionDto>>,
    ) -> Result<RefreshOutcome> {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding superseded refresh"
            );
            return Ok(RefreshOutcome::Superseded);
        }

        let records: Vec<ActionRecord> = result?.into_iter().map(ActionRecord::from).collect();
        let count = records.len();
        self.store.load_all(records);
        self.loaded = true;
        Ok(RefreshOutcome::Loaded(count))
    }

    // ─── User intents ─────────────────────────────────────────────────────

    /// Delete `id` on the server, then drop it locally once acknowledged.
    ///
    /// Deletion is destructive, so the store only ever reflects confirmed
    /// state; on a server error it is left unchanged and the error
    /// propagates verbatim. No automatic retry.
    pub async fn request_deletion(&mut self, id: u32) -> Result<Removal> {
        let ack = self.api.delete_action(id).await?;
        if ack.id != id {
            debug!(requested = id, acknowledged = ack.id, "deletion ack id mismatch");
        }
        Ok(self.store.remove(id))
    }

    /// Submit a new action; the acknowledged record joins the store.
    pub async fn submit_action(&mut self, request: &CreateActionRequest) -> Result<ActionRecord> {
        let dto = self.api.create_action(request).await?;
        let record = ActionRecord::from(dto);
        self.store.upsert_from_creation(record.clone());
        Ok(record)
    }

    // ─── Feed events ──────────────────────────────────────────────────────

    /// Merge one feed event into the store.
    ///
    /// Orderings the network can produce (an event behind a deletion, a
    /// reordered delivery, a duplicate creation ack) are absorbed by the
    /// store's own rules, not special-cased here.
    pub fn handle_event(&mut self, event: ActionEvent) -> EventDisposition {
        match event {
            ActionEvent::Created(dto) => {
                match self.store.upsert_from_creation(ActionRecord::from(dto)) {
                    Upsert::Inserted => EventDisposition::Inserted,
                    Upsert::AlreadyPresent => EventDisposition::DuplicateCreation,
                }
            }
            ActionEvent::StateChanged(ev) => {
                match self
                    .store
                    .apply_state_change(ev.action_id, &ev.state, ev.timestamp)
                {
                    StateChangeOutcome::Applied => EventDisposition::Applied,
                    StateChangeOutcome::IgnoredUnknownId => {
                        debug!(action_id = ev.action_id, "state change for unknown action ignored");
                        EventDisposition::UnknownId
                    }
                    StateChangeOutcome::IgnoredStale => {
                        debug!(action_id = ev.action_id, "stale state change ignored");
                        EventDisposition::Stale
                    }
                }
            }
        }
    }

    /// Drain `source` until it reports the feed exhausted. Returns how many
    /// events actually mutated the store.
    pub async fn pump_events<S: EventSource>(&mut self, source: &mut S) -> Result<usize> {
        let mut applied = 0;
        while let Some(event) = source.next_event().await? {
            match self.handle_event(event) {
                EventDisposition::Inserted | EventDisposition::Applied => applied += 1,
                EventDisposition::DuplicateCreation
                | EventDisposition::UnknownId
                | EventDisposition::Stale => {}
            }
        }
        Ok(applied)
    }

    // ─── Reads ────────────────────────────────────────────────────────────

    /// Insertion-ordered copy of the current view.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.store.snapshot()
    }

    /// Whether any bulk load has ever succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &ActionStore {
        &self.store
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
