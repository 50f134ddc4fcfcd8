use super::reference::MemoryReference;
use super::store::StoreInner;
use crate::ports::outbound::{DescribeEntity, RecordModel, SharedReference};
use crate::relationship::domain::{RelatedCollection, RelationshipKind, RelationshipMeta};
use crate::shared::error::ViewError;
use crate::shared::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

/// `<type>:<id>` identity of a record inside a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordIdentifier {
    record_type: String,
    id: String,
}

impl RecordIdentifier {
    pub fn new(record_type: impl Into<String>, id: impl Into<String>) -> Result<Self> {
        let record_type = record_type.into();
        let id = id.into();

        for (part, label) in [(&record_type, "type"), (&id, "id")] {
            if part.trim().is_empty() {
                return Err(ViewError::InvalidRecordIdentifier {
                    value: format!("{}:{}", record_type, id),
                    reason: format!("record {} must not be empty", label),
                }
                .into());
            }
        }

        Ok(Self { record_type, id })
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RecordIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.record_type, self.id)
    }
}

impl FromStr for RecordIdentifier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((record_type, id)) => Self::new(record_type.trim(), id.trim()),
            None => Err(ViewError::InvalidRecordIdentifier {
                value: s.to_string(),
                reason: "missing ':' separator".to_string(),
            }
            .into()),
        }
    }
}

/// Declared relationship plus the identifiers it currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipData {
    pub meta: RelationshipMeta,
    pub targets: Vec<RecordIdentifier>,
}

impl RelationshipData {
    pub fn belongs_to(is_async: bool, target: Option<RecordIdentifier>) -> Self {
        Self {
            meta: RelationshipMeta::belongs_to(is_async),
            targets: target.into_iter().collect(),
        }
    }

    pub fn has_many(is_async: bool, targets: Vec<RecordIdentifier>) -> Self {
        Self {
            meta: RelationshipMeta::has_many(is_async),
            targets,
        }
    }
}

/// Everything needed to push one record into a store
#[derive(Debug, Clone)]
pub struct RecordData {
    pub identifier: RecordIdentifier,
    pub attributes: BTreeMap<String, String>,
    pub relationships: BTreeMap<String, RelationshipData>,
}

impl RecordData {
    pub fn new(identifier: RecordIdentifier) -> Self {
        Self {
            identifier,
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_relationship(mut self, name: &str, relationship: RelationshipData) -> Self {
        self.relationships.insert(name.to_string(), relationship);
        self
    }
}

pub(super) struct RelationshipSlot {
    pub(super) meta: RelationshipMeta,
    pub(super) targets: Vec<RecordIdentifier>,
    /// Stable collection handed out for to-many values
    pub(super) collection: RelatedCollection<MemoryRecord>,
}

impl RelationshipSlot {
    fn new(data: RelationshipData) -> Self {
        Self {
            meta: data.meta,
            targets: data.targets,
            collection: RelatedCollection::new(),
        }
    }
}

/// A record living in a [`MemoryStore`](super::MemoryStore)
pub struct MemoryRecord {
    identifier: RecordIdentifier,
    attributes: RefCell<BTreeMap<String, String>>,
    pub(super) slots: RefCell<BTreeMap<String, RelationshipSlot>>,
    store: Weak<StoreInner>,
}

impl MemoryRecord {
    pub(super) fn new(data: RecordData, store: Weak<StoreInner>) -> Self {
        let slots = data
            .relationships
            .into_iter()
            .map(|(name, relationship)| (name, RelationshipSlot::new(relationship)))
            .collect();

        Self {
            identifier: data.identifier,
            attributes: RefCell::new(data.attributes),
            slots: RefCell::new(slots),
            store,
        }
    }

    /// Merges a later push of the same identifier into this record
    ///
    /// Existing relationships keep their collection so that to-many values
    /// stay identity-stable. Returns the names of the relationships whose
    /// declaration or targets changed.
    pub(super) fn update(&self, data: RecordData) -> Vec<String> {
        self.attributes.borrow_mut().extend(data.attributes);

        let mut changed = Vec::new();
        let mut slots = self.slots.borrow_mut();
        for (name, relationship) in data.relationships {
            match slots.get_mut(&name) {
                Some(slot) => {
                    if slot.meta != relationship.meta || slot.targets != relationship.targets {
                        slot.meta = relationship.meta;
                        slot.targets = relationship.targets;
                        changed.push(name);
                    }
                }
                None => {
                    slots.insert(name.clone(), RelationshipSlot::new(relationship));
                    changed.push(name);
                }
            }
        }
        changed
    }

    pub fn identifier(&self) -> &RecordIdentifier {
        &self.identifier
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Display name: the `name` attribute, falling back to the identifier
    pub fn label(&self) -> String {
        self.attribute("name")
            .unwrap_or_else(|| self.identifier.to_string())
    }

    pub fn relationship_names(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }

    /// Identifiers the relationship currently points at
    pub fn targets(&self, name: &str) -> Result<Vec<RecordIdentifier>> {
        self.slots
            .borrow()
            .get(name)
            .map(|slot| slot.targets.clone())
            .ok_or_else(|| self.unknown_relationship(name))
    }

    /// Rewrites the targets of a relationship, checking its declared kind
    pub(super) fn set_targets(
        &self,
        name: &str,
        kind: RelationshipKind,
        targets: Vec<RecordIdentifier>,
    ) -> Result<()> {
        let mut slots = self.slots.borrow_mut();
        let slot = slots
            .get_mut(name)
            .ok_or_else(|| self.unknown_relationship(name))?;

        if slot.meta.kind != kind {
            anyhow::bail!(
                "'{}' on {} is declared {} and cannot be written as {}",
                name,
                self.identifier,
                slot.meta.kind,
                kind
            );
        }

        slot.targets = targets;
        Ok(())
    }

    pub(super) fn unknown_relationship(&self, name: &str) -> anyhow::Error {
        ViewError::UnknownRelationship {
            record: self.identifier.to_string(),
            relationship: name.to_string(),
        }
        .into()
    }
}

impl fmt::Debug for MemoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRecord")
            .field("identifier", &self.identifier)
            .field("attributes", &self.attributes.borrow())
            .finish_non_exhaustive()
    }
}

impl RecordModel for MemoryRecord {
    type Entity = MemoryRecord;

    fn relationship_metadata(&self, name: &str) -> Result<RelationshipMeta> {
        self.slots
            .borrow()
            .get(name)
            .map(|slot| slot.meta)
            .ok_or_else(|| self.unknown_relationship(name))
    }

    fn reference(&self, name: &str) -> Result<SharedReference<MemoryRecord>> {
        if !self.slots.borrow().contains_key(name) {
            return Err(self.unknown_relationship(name));
        }

        Ok(Rc::new(MemoryReference::new(
            self.store.clone(),
            self.identifier.clone(),
            name,
        )))
    }
}

impl DescribeEntity for MemoryRecord {
    fn entity_id(&self) -> String {
        self.identifier.to_string()
    }

    fn entity_label(&self) -> String {
        self.label()
    }
}
