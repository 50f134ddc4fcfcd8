/// In-memory record model
///
/// Records are pushed into a [`MemoryStore`] together with their
/// relationships. A relationship may point at records that are not
/// materialized yet; those are staged as "remote" and only become visible
/// once a reference loads them, after the store's fetch latency.
mod notifier;
mod record;
mod reference;
mod store;

pub use notifier::MemoryChangeNotifier;
pub use record::{MemoryRecord, RecordData, RecordIdentifier, RelationshipData};
pub use reference::MemoryReference;
pub use store::{FetchPolicy, MemoryStore};
