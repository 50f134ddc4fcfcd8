use super::SharedReference;
use crate::relationship::domain::RelationshipMeta;
use crate::shared::Result;

/// RecordModel port for reading relationship metadata and references
///
/// This port abstracts the record a view is bound to. Validation of the
/// relationship name is entirely the record model's concern: an unknown
/// name must surface as an error from either method, and the view passes
/// that error through unchanged.
pub trait RecordModel {
    /// The type of the related entities reachable through this record
    type Entity;

    /// Returns the declared kind and async flag of a relationship
    ///
    /// # Errors
    /// Returns an error if the relationship is not declared on this record
    fn relationship_metadata(&self, name: &str) -> Result<RelationshipMeta>;

    /// Returns the reference object bound to a relationship
    ///
    /// # Errors
    /// Returns an error if the relationship is not declared on this record
    fn reference(&self, name: &str) -> Result<SharedReference<Self::Entity>>;
}

/// DescribeEntity port for showing an entity to the user
///
/// Used when a view's value is turned into a read model for output.
pub trait DescribeEntity {
    /// Stable identifier, e.g. `pet:1`
    fn entity_id(&self) -> String;

    /// Human-readable name
    fn entity_label(&self) -> String;
}
