use crate::ports::outbound::DescribeEntity;
use crate::relationship::domain::{RelationshipDocument, RelationshipKind, RelationshipValue};
use serde::Serialize;

/// One related entity as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    pub id: String,
    pub label: String,
}

impl EntityView {
    pub fn describe<E: DescribeEntity + ?Sized>(entity: &E) -> Self {
        Self {
            id: entity.entity_id(),
            label: entity.entity_label(),
        }
    }
}

/// Snapshot of a relationship value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValueView {
    One(Option<EntityView>),
    Many(Vec<EntityView>),
}

impl ValueView {
    /// Builds a snapshot, describing each entity with `describe`
    ///
    /// `Empty` renders as an empty list for to-many relationships and as
    /// `null` otherwise.
    pub fn from_value<E>(
        value: &RelationshipValue<E>,
        kind: Option<RelationshipKind>,
        describe: impl Fn(&E) -> EntityView,
    ) -> Self {
        match value {
            RelationshipValue::Empty if kind == Some(RelationshipKind::HasMany) => {
                ValueView::Many(Vec::new())
            }
            RelationshipValue::Empty => ValueView::One(None),
            RelationshipValue::One(entity) => ValueView::One(Some(describe(&**entity))),
            RelationshipValue::Many(collection) => ValueView::Many(
                collection.members().iter().map(|e| describe(&**e)).collect(),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ValueView::One(entity) => entity.is_none(),
            ValueView::Many(members) => members.is_empty(),
        }
    }
}

/// Everything a formatter needs to render one state of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipReadModel {
    pub record: String,
    pub relationship: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RelationshipKind>,
    /// A load was still outstanding when this snapshot was taken
    pub loading: bool,
    /// Rendered as `{ data }` rather than a bare value
    #[serde(skip)]
    pub document: bool,
    pub value: ValueView,
}

impl RelationshipReadModel {
    pub fn from_value<E>(
        record: &str,
        relationship: &str,
        value: &RelationshipValue<E>,
        loading: bool,
        describe: impl Fn(&E) -> EntityView,
    ) -> Self {
        Self {
            record: record.to_string(),
            relationship: relationship.to_string(),
            kind: None,
            loading,
            document: false,
            value: ValueView::from_value(value, None, describe),
        }
    }

    pub fn from_document<E>(
        record: &str,
        relationship: &str,
        document: &RelationshipDocument<E>,
        loading: bool,
        describe: impl Fn(&E) -> EntityView,
    ) -> Self {
        Self {
            record: record.to_string(),
            relationship: relationship.to_string(),
            kind: document.kind,
            loading,
            document: true,
            value: ValueView::from_value(&document.data, document.kind, describe),
        }
    }
}
