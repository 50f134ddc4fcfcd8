use crate::application::read_models::RelationshipReadModel;

/// FetchResponse - what the fetch-relationship use case ended with
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Number of renderings presented, the interim one included
    pub renderings: usize,
    /// The last rendering presented
    pub last: RelationshipReadModel,
}
