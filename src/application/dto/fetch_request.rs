use std::time::Duration;

/// FetchRequest - request DTO for the fetch-relationship use case
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Name of the relationship to read
    pub relationship: String,
    /// Render the value wrapped as a `{ data }` document
    pub document: bool,
    /// How long to wait for an outstanding load before giving up
    pub wait: Duration,
}

impl FetchRequest {
    pub fn new(relationship: impl Into<String>, document: bool, wait: Duration) -> Self {
        Self {
            relationship: relationship.into(),
            document,
            wait,
        }
    }
}
