use crate::relationship::domain::RelationshipValue;
use crate::shared::Result;
use async_trait::async_trait;
use std::rc::Rc;

/// Reference port for one relationship instance
///
/// A reference reports the currently-materialized value synchronously and
/// can (re)load it asynchronously.
///
/// # Async Support
/// References live on a single thread together with the records they point
/// into, so the trait is `?Send` and loads are driven on a local task set.
#[async_trait(?Send)]
pub trait Reference {
    type Entity;

    /// Returns the value currently known without fetching anything
    ///
    /// For a relationship whose targets are not materialized yet this is
    /// `RelationshipValue::Empty`.
    fn value(&self) -> RelationshipValue<Self::Entity>;

    /// Loads the relationship, fetching whatever is missing
    ///
    /// Resolves immediately with the current value when everything is
    /// already materialized.
    ///
    /// # Errors
    /// Returns an error if fetching the related entities fails
    async fn load(&self) -> Result<RelationshipValue<Self::Entity>>;
}

/// Shared handle to a reference, as handed out by a record model
pub type SharedReference<E> = Rc<dyn Reference<Entity = E>>;
