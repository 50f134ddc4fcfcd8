use super::store::StoreInner;
use super::{MemoryRecord, RecordIdentifier};
use crate::ports::outbound::Reference;
use crate::relationship::domain::RelationshipValue;
use crate::shared::error::ViewError;
use crate::shared::Result;
use async_trait::async_trait;
use std::rc::{Rc, Weak};

/// Reference to one relationship of one [`MemoryRecord`]
///
/// Holds only identifiers and a weak store handle; every read goes back to
/// the store, so a reference never observes stale membership.
pub struct MemoryReference {
    store: Weak<StoreInner>,
    record: RecordIdentifier,
    relationship: String,
}

impl MemoryReference {
    pub(super) fn new(store: Weak<StoreInner>, record: RecordIdentifier, relationship: &str) -> Self {
        Self {
            store,
            record,
            relationship: relationship.to_string(),
        }
    }

    pub fn record(&self) -> &RecordIdentifier {
        &self.record
    }

    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    fn store(&self) -> Result<Rc<StoreInner>> {
        self.store.upgrade().ok_or_else(|| {
            anyhow::anyhow!(
                "The store holding {} was dropped before '{}' could be read",
                self.record,
                self.relationship
            )
        })
    }
}

#[async_trait(?Send)]
impl Reference for MemoryReference {
    type Entity = MemoryRecord;

    fn value(&self) -> RelationshipValue<MemoryRecord> {
        match self
            .store()
            .and_then(|store| store.relationship_value(&self.record, &self.relationship))
        {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(
                    record = %self.record,
                    relationship = %self.relationship,
                    error = %error,
                    "memory_store.value.unavailable"
                );
                RelationshipValue::Empty
            }
        }
    }

    async fn load(&self) -> Result<RelationshipValue<MemoryRecord>> {
        let store = self.store()?;
        let missing = store.missing_targets(&self.record, &self.relationship)?;
        if missing.is_empty() {
            return store.relationship_value(&self.record, &self.relationship);
        }

        let policy = store.fetch_policy();
        tracing::debug!(
            record = %self.record,
            relationship = %self.relationship,
            missing = missing.len(),
            latency_ms = policy.latency.as_millis() as u64,
            "memory_store.fetch"
        );

        if !policy.latency.is_zero() {
            tokio::time::sleep(policy.latency).await;
        }
        store.record_fetch();

        if let Some(details) = policy.fail_with {
            return Err(ViewError::FetchFailed {
                record: self.record.to_string(),
                relationship: self.relationship.clone(),
                details,
            }
            .into());
        }

        store.materialize(&missing, &self.record, &self.relationship)?;
        store.relationship_value(&self.record, &self.relationship)
    }
}
