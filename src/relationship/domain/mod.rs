pub mod document;
pub mod metadata;
pub mod subscription_key;
pub mod value;

pub use document::RelationshipDocument;
pub use metadata::{RelationshipKind, RelationshipMeta};
pub use subscription_key::SubscriptionKey;
pub use value::{RelatedCollection, RelationshipValue};
