/// Relationship domain - values, metadata and subscription keys
///
/// Pure types with no knowledge of how records are stored or how
/// relationships are fetched.
pub mod domain;
