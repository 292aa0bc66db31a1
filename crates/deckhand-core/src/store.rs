use crate::types::ActionRecord;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

/// Result of [`ActionStore::apply_state_change`]. Events race deletions and
/// reloads in normal operation, so every case is a value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeOutcome {
    Applied,
    /// No record with that id. Creation is authoritative only through the
    /// bulk-load and creation-acknowledgment paths, so the event must not
    /// conjure a record.
    IgnoredUnknownId,
    /// Delivered out of order: strictly older than the last change applied
    /// for this id.
    IgnoredStale,
}

/// Result of [`ActionStore::upsert_from_creation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// The id was already synced; the existing record is left untouched so a
    /// duplicate acknowledgment cannot regress it.
    AlreadyPresent,
}

/// Result of [`ActionStore::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    Absent,
}

// ---------------------------------------------------------------------------
// ActionStore
// ---------------------------------------------------------------------------

/// In-memory view of the action collection.
///
/// Insertion order is preserved and `id` is unique. All mutation goes through
/// the narrow operation set below; none of it returns `Result` or panics,
/// because the store sits on the render path and must absorb whatever the
/// network delivers.
#[derive(Debug, Default)]
pub struct ActionStore {
    records: Vec<ActionRecord>,
    /// Timestamp of the last applied state change per id, used to reject
    /// reordered deliveries.
    applied: HashMap<u32, DateTime<Utc>>,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. A bulk reload is authoritative: ids
    /// absent from `records` are dropped, and their event timestamps with
    /// them. Timestamps for surviving ids are kept, so an event already
    /// superseded before the reload stays superseded after it. Duplicate ids
    /// in the input keep the first occurrence.
    pub fn load_all(&mut self, records: Vec<ActionRecord>) {
        let mut seen = HashSet::new();
        self.records = records.into_iter().filter(|r| seen.insert(r.id)).collect();
        self.applied.retain(|id, _| seen.contains(id));
    }

    /// Insert a record acknowledged by a creation path.
    pub fn upsert_from_creation(&mut self, record: ActionRecord) -> Upsert {
        if self.records.iter().any(|r| r.id == record.id) {
            return Upsert::AlreadyPresent;
        }
        self.records.push(record);
        Upsert::Inserted
    }

    /// Overwrite `state` for `id` if the event is current enough. Equal
    /// timestamps apply; only strictly older ones are stale.
    pub fn apply_state_change(
        &mut self,
        id: u32,
        new_state: &str,
        timestamp: DateTime<Utc>,
    ) -> StateChangeOutcome {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return StateChangeOutcome::IgnoredUnknownId;
        };
        if let Some(last) = self.applied.get(&id) {
            if timestamp < *last {
                return StateChangeOutcome::IgnoredStale;
            }
        }
        record.state = new_state.to_string();
        self.applied.insert(id, timestamp);
        StateChangeOutcome::Applied
    }

    /// Drop the record for `id`, if present. Its event timestamp goes with
    /// it, so a later re-creation under the same id starts fresh.
    pub fn remove(&mut self, id: u32) -> Removal {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            Removal::Absent
        } else {
            self.applied.remove(&id);
            Removal::Removed
        }
    }

    pub fn get(&self, id: u32) -> Option<&ActionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Insertion-ordered copy of the collection. Callers receive owned data,
    /// so nothing outside the store can break its invariants.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lifecycle;
    use chrono::TimeZone;

    fn record(id: u32, state: &str) -> ActionRecord {
        ActionRecord {
            id,
            repo_url: format!("https://git.example/repo-{id}"),
            image: "alpine:3".into(),
            state: state.into(),
        }
    }

    fn ts(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, secs).unwrap()
    }

    #[test]
    fn load_all_replaces_previous_contents() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running"), record(2, "queued")]);
        store.load_all(vec![record(2, "Completed"), record(3, "Running")]);

        assert!(store.get(1).is_none());
        assert_eq!(store.get(2).unwrap().state, "Completed");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_all_is_idempotent() {
        let records = vec![record(1, "Running"), record(2, "queued")];
        let mut store = ActionStore::new();
        store.load_all(records.clone());
        let first = store.snapshot();
        store.load_all(records);
        assert_eq!(store.snapshot(), first);
    }

    #[test]
    fn load_all_preserves_input_order() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(5, "a"), record(1, "b"), record(3, "c")]);
        let ids: Vec<u32> = store.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    #[test]
    fn load_all_keeps_first_occurrence_of_a_duplicate_id() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running"), record(1, "Failed")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().state, "Running");
    }

    #[test]
    fn loaded_record_classifies_from_raw_state() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        assert_eq!(store.get(1).unwrap().lifecycle(), Lifecycle::InProgress);
    }

    #[test]
    fn upsert_inserts_at_the_end() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        assert_eq!(store.upsert_from_creation(record(2, "queued")), Upsert::Inserted);
        let ids: Vec<u32> = store.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn duplicate_upsert_leaves_first_record_intact() {
        let mut store = ActionStore::new();
        store.upsert_from_creation(record(7, "Running"));

        let mut late_ack = record(7, "Failed");
        late_ack.image = "other:latest".into();
        assert_eq!(store.upsert_from_creation(late_ack), Upsert::AlreadyPresent);

        let kept = store.get(7).unwrap();
        assert_eq!(kept.state, "Running");
        assert_eq!(kept.image, "alpine:3");
    }

    #[test]
    fn state_change_for_unknown_id_is_a_no_op() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        let before = store.snapshot();

        let outcome = store.apply_state_change(99, "Completed", ts(1));
        assert_eq!(outcome, StateChangeOutcome::IgnoredUnknownId);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn stale_state_change_is_rejected() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(7, "Running")]);

        assert_eq!(
            store.apply_state_change(7, "Completed", ts(10)),
            StateChangeOutcome::Applied
        );
        assert_eq!(
            store.apply_state_change(7, "Failed", ts(5)),
            StateChangeOutcome::IgnoredStale
        );
        assert_eq!(store.get(7).unwrap().state, "Completed");
    }

    #[test]
    fn equal_timestamp_applies() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(7, "Running")]);

        store.apply_state_change(7, "Completed", ts(10));
        assert_eq!(
            store.apply_state_change(7, "Failed", ts(10)),
            StateChangeOutcome::Applied
        );
        assert_eq!(store.get(7).unwrap().state, "Failed");
    }

    #[test]
    fn first_state_change_needs_no_prior_timestamp() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "queued")]);
        assert_eq!(
            store.apply_state_change(1, "Running", ts(0)),
            StateChangeOutcome::Applied
        );
        assert_eq!(store.get(1).unwrap().state, "Running");
    }

    #[test]
    fn timestamps_survive_a_reload() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        store.apply_state_change(1, "Completed", ts(10));

        // Reload with the same id: an event from before the last applied one
        // must still be stale.
        store.load_all(vec![record(1, "Completed")]);
        assert_eq!(
            store.apply_state_change(1, "Running", ts(5)),
            StateChangeOutcome::IgnoredStale
        );
    }

    #[test]
    fn removal_resets_the_timestamp_for_a_recreated_id() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        store.apply_state_change(1, "Completed", ts(10));

        assert_eq!(store.remove(1), Removal::Removed);
        store.upsert_from_creation(record(1, "queued"));

        // The new incarnation starts fresh; an old-looking timestamp applies.
        assert_eq!(
            store.apply_state_change(1, "Running", ts(1)),
            StateChangeOutcome::Applied
        );
    }

    #[test]
    fn remove_reports_removed_then_absent() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running"), record(2, "queued")]);

        assert_eq!(store.remove(1), Removal::Removed);
        assert!(store.snapshot().iter().all(|r| r.id != 1));

        let before = store.snapshot();
        assert_eq!(store.remove(1), Removal::Absent);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn state_change_after_removal_reports_unknown_id() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);
        store.remove(1);
        assert_eq!(
            store.apply_state_change(1, "Completed", ts(1)),
            StateChangeOutcome::IgnoredUnknownId
        );
    }

    #[test]
    fn snapshot_is_isolated_from_the_store() {
        let mut store = ActionStore::new();
        store.load_all(vec![record(1, "Running")]);

        let mut view = store.snapshot();
        view[0].state = "Failed".into();
        view.clear();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().state, "Running");
    }

    #[test]
    fn empty_store_reports_empty() {
        let store = ActionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.snapshot().is_empty());
    }
}
