use crate::application::read_models::RelationshipReadModel;
use crate::shared::Result;

/// RelationshipFormatter port for rendering a resolved relationship
///
/// This port abstracts the output format (plain text, JSON, ...) so the
/// render loop can stay the same for every format.
pub trait RelationshipFormatter {
    /// Formats one rendering of a relationship
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &RelationshipReadModel) -> Result<String>;
}

impl<T: RelationshipFormatter + ?Sized> RelationshipFormatter for Box<T> {
    fn format(&self, model: &RelationshipReadModel) -> Result<String> {
        (**self).format(model)
    }
}
