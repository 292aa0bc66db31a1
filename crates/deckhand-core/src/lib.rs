pub mod store;
pub mod types;

pub use store::{ActionStore, Removal, StateChangeOutcome, Upsert};
pub use types::{ActionRecord, Lifecycle};
