//! Persistent cross-period state.

mod store;

pub use store::{SnapshotStore, previous_period};
