use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Canonical lifecycle category for an action.
///
/// The scheduler reports state as free text, so classification is total:
/// every label maps to a category, with `Pending` as the fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl Lifecycle {
    /// Map a raw state label to its category. Comparison is case-insensitive;
    /// anything unrecognized (including the empty string) is `Pending`.
    pub fn classify(raw: &str) -> Lifecycle {
        match raw.to_ascii_lowercase().as_str() {
            "running" | "in progress" | "inprogress" => Lifecycle::InProgress,
            "completed" | "success" => Lifecycle::Completed,
            "failed" | "error" => Lifecycle::Failed,
            _ => Lifecycle::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::InProgress => "in_progress",
            Lifecycle::Completed => "completed",
            Lifecycle::Failed => "failed",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionRecord
// ---------------------------------------------------------------------------

/// One action as held in the client-side view.
///
/// `id`, `repo_url` and `image` are immutable once created; only `state` is
/// overwritten, by applied state-change events. The lifecycle category is
/// derived from `state` on every read and never cached, so a change to the
/// classification rules can never be shadowed by a stale value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: u32,
    pub repo_url: String,
    pub image: String,
    pub state: String,
}

impl ActionRecord {
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::classify(&self.state)
    }

    /// Display label for the state column. When classification fell through
    /// to `Pending`, the raw label is preserved alongside the category so an
    /// unexpected scheduler state stays visible.
    pub fn state_label(&self) -> String {
        let lifecycle = self.lifecycle();
        if lifecycle == Lifecycle::Pending
            && !self.state.is_empty()
            && !self.state.eq_ignore_ascii_case("pending")
        {
            format!("{} ({})", lifecycle, self.state)
        } else {
            lifecycle.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
