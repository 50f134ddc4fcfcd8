mod fetch_relationship;

pub use fetch_relationship::FetchRelationshipUseCase;
