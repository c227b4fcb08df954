//! State layer: the journaled transaction overlay and its commit format.

mod journal;
mod object;
mod snapshot;
mod state_object;
mod txn;

pub use journal::Journal;
pub use journal::JournalKey;
pub use journal::JournalValue;
pub use object::Object;
pub use object::StorageObject;
pub use snapshot::InMemorySnapshot;
pub use snapshot::Snapshot;
pub use state_object::StateObject;
pub use txn::Txn;
