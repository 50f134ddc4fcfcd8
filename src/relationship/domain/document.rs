use super::{RelationshipKind, RelationshipValue};
use std::fmt;

/// A relationship value wrapped as a document, `{ data }`-style.
///
/// Returned by `RelationshipView::compute_document`; `kind` is `None` only
/// when the view has not resolved any metadata yet.
pub struct RelationshipDocument<E> {
    pub data: RelationshipValue<E>,
    pub kind: Option<RelationshipKind>,
}

impl<E> RelationshipDocument<E> {
    pub fn new(data: RelationshipValue<E>, kind: Option<RelationshipKind>) -> Self {
        Self { data, kind }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<E> Clone for RelationshipDocument<E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            kind: self.kind,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for RelationshipDocument<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationshipDocument")
            .field("data", &self.data)
            .field("kind", &self.kind)
            .finish()
    }
}
