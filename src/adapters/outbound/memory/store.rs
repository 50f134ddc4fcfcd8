use super::{MemoryChangeNotifier, MemoryRecord, RecordData, RecordIdentifier};
use crate::relationship::domain::{RelationshipKind, RelationshipValue};
use crate::shared::error::ViewError;
use crate::shared::Result;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// How the store answers loads that need to fetch remote records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Simulated round-trip time of a fetch
    pub latency: Duration,
    /// When set, every fetch fails with this message
    pub fail_with: Option<String>,
}

impl FetchPolicy {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            fail_with: None,
        }
    }

    pub fn failing(details: impl Into<String>) -> Self {
        Self {
            latency: Duration::ZERO,
            fail_with: Some(details.into()),
        }
    }
}

pub(super) struct StoreInner {
    records: RefCell<HashMap<RecordIdentifier, Rc<MemoryRecord>>>,
    /// Records known to the "server" but not materialized locally
    remote: RefCell<HashMap<RecordIdentifier, RecordData>>,
    notifier: MemoryChangeNotifier,
    policy: RefCell<FetchPolicy>,
    fetch_count: Cell<usize>,
}

impl StoreInner {
    fn insert(self: &Rc<Self>, data: RecordData) -> Rc<MemoryRecord> {
        let existing = self.records.borrow().get(&data.identifier).cloned();
        if let Some(record) = existing {
            for field in record.update(data) {
                self.notifier.notify(&record, &field);
            }
            return record;
        }

        let identifier = data.identifier.clone();
        let record = Rc::new(MemoryRecord::new(data, Rc::downgrade(self)));
        self.records
            .borrow_mut()
            .insert(identifier, Rc::clone(&record));
        record
    }

    fn lookup(&self, identifier: &RecordIdentifier) -> Result<Rc<MemoryRecord>> {
        self.records
            .borrow()
            .get(identifier)
            .cloned()
            .ok_or_else(|| {
                ViewError::UnknownRecord {
                    identifier: identifier.to_string(),
                }
                .into()
            })
    }

    /// Current value of a relationship from locally materialized records
    ///
    /// A to-one value whose target is not materialized is `Empty`; a to-many
    /// value is `Empty` until every member is materialized.
    pub(super) fn relationship_value(
        &self,
        owner: &RecordIdentifier,
        relationship: &str,
    ) -> Result<RelationshipValue<MemoryRecord>> {
        let owner = self.lookup(owner)?;
        let slots = owner.slots.borrow();
        let slot = slots
            .get(relationship)
            .ok_or_else(|| owner.unknown_relationship(relationship))?;
        let records = self.records.borrow();

        let value = match slot.meta.kind {
            RelationshipKind::BelongsTo => match slot.targets.first().and_then(|id| records.get(id)) {
                Some(target) => RelationshipValue::One(Rc::clone(target)),
                None => RelationshipValue::Empty,
            },
            RelationshipKind::HasMany => {
                let members: Option<Vec<Rc<MemoryRecord>>> = slot
                    .targets
                    .iter()
                    .map(|id| records.get(id).cloned())
                    .collect();
                match members {
                    Some(members) => {
                        slot.collection.replace(members);
                        RelationshipValue::Many(slot.collection.clone())
                    }
                    None => RelationshipValue::Empty,
                }
            }
        };

        Ok(value)
    }

    pub(super) fn missing_targets(
        &self,
        owner: &RecordIdentifier,
        relationship: &str,
    ) -> Result<Vec<RecordIdentifier>> {
        let targets = self.lookup(owner)?.targets(relationship)?;
        let records = self.records.borrow();
        Ok(targets
            .into_iter()
            .filter(|id| !records.contains_key(id))
            .collect())
    }

    /// Moves fetched records from the remote side into the store
    pub(super) fn materialize(
        self: &Rc<Self>,
        missing: &[RecordIdentifier],
        owner: &RecordIdentifier,
        relationship: &str,
    ) -> Result<()> {
        // Nothing is written unless every missing record can be supplied
        {
            let remote = self.remote.borrow();
            let records = self.records.borrow();
            if let Some(absent) = missing
                .iter()
                .find(|id| !remote.contains_key(*id) && !records.contains_key(*id))
            {
                return Err(ViewError::FetchFailed {
                    record: owner.to_string(),
                    relationship: relationship.to_string(),
                    details: format!("{} does not exist on the remote side", absent),
                }
                .into());
            }
        }

        for identifier in missing {
            // `None` means a concurrent load already materialized it
            let data = self.remote.borrow_mut().remove(identifier);
            if let Some(data) = data {
                self.insert(data);
            }
        }
        Ok(())
    }

    pub(super) fn fetch_policy(&self) -> FetchPolicy {
        self.policy.borrow().clone()
    }

    pub(super) fn record_fetch(&self) {
        self.fetch_count.set(self.fetch_count.get() + 1);
    }
}

/// MemoryStore - fixture-backed home of [`MemoryRecord`]s
///
/// Cloning creates a new handle to the **same** store. All relationship
/// writes go through the store so that observers of `(record, field)` are
/// notified, the way a host's normal mutation path would.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Rc<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_fetch_policy(FetchPolicy::default())
    }

    pub fn with_fetch_policy(policy: FetchPolicy) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                records: RefCell::new(HashMap::new()),
                remote: RefCell::new(HashMap::new()),
                notifier: MemoryChangeNotifier::new(),
                policy: RefCell::new(policy),
                fetch_count: Cell::new(0),
            }),
        }
    }

    /// Materializes a record, merging into an existing one with the same
    /// identifier
    ///
    /// Relationships rewritten by the merge notify their observers.
    pub fn push(&self, data: RecordData) -> Rc<MemoryRecord> {
        self.inner.insert(data)
    }

    /// Makes a record fetchable without materializing it
    pub fn stage_remote(&self, data: RecordData) {
        self.inner
            .remote
            .borrow_mut()
            .insert(data.identifier.clone(), data);
    }

    pub fn peek(&self, identifier: &RecordIdentifier) -> Option<Rc<MemoryRecord>> {
        self.inner.records.borrow().get(identifier).cloned()
    }

    /// # Errors
    /// Returns `ViewError::UnknownRecord` if the record is not materialized
    pub fn find(&self, identifier: &RecordIdentifier) -> Result<Rc<MemoryRecord>> {
        self.inner.lookup(identifier)
    }

    pub fn notifier(&self) -> MemoryChangeNotifier {
        self.inner.notifier.clone()
    }

    pub fn set_fetch_policy(&self, policy: FetchPolicy) {
        *self.inner.policy.borrow_mut() = policy;
    }

    /// Number of fetches performed so far (for testing/monitoring)
    pub fn fetch_count(&self) -> usize {
        self.inner.fetch_count.get()
    }

    /// Points a to-one relationship at `target` (or at nothing)
    pub fn set_one(
        &self,
        record: &Rc<MemoryRecord>,
        field: &str,
        target: Option<&Rc<MemoryRecord>>,
    ) -> Result<()> {
        let targets = target.map(|t| t.identifier().clone()).into_iter().collect();
        record.set_targets(field, RelationshipKind::BelongsTo, targets)?;
        self.inner.notifier.notify(record, field);
        Ok(())
    }

    /// Replaces the members of a to-many relationship
    pub fn set_many(
        &self,
        record: &Rc<MemoryRecord>,
        field: &str,
        members: &[Rc<MemoryRecord>],
    ) -> Result<()> {
        let targets = members.iter().map(|m| m.identifier().clone()).collect();
        record.set_targets(field, RelationshipKind::HasMany, targets)?;
        self.inner.notifier.notify(record, field);
        Ok(())
    }

    /// Appends `member` to a to-many relationship unless already present
    pub fn push_related(
        &self,
        record: &Rc<MemoryRecord>,
        field: &str,
        member: &Rc<MemoryRecord>,
    ) -> Result<()> {
        let mut targets = record.targets(field)?;
        if targets.contains(member.identifier()) {
            return Ok(());
        }
        targets.push(member.identifier().clone());
        record.set_targets(field, RelationshipKind::HasMany, targets)?;
        self.inner.notifier.notify(record, field);
        Ok(())
    }

    /// Removes `member` from a to-many relationship if present
    pub fn remove_related(
        &self,
        record: &Rc<MemoryRecord>,
        field: &str,
        member: &Rc<MemoryRecord>,
    ) -> Result<()> {
        let mut targets = record.targets(field)?;
        let before = targets.len();
        targets.retain(|id| id != member.identifier());
        if targets.len() == before {
            return Ok(());
        }
        record.set_targets(field, RelationshipKind::HasMany, targets)?;
        self.inner.notifier.notify(record, field);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
