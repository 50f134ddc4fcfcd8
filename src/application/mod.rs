/// Application layer - the relationship view and the use case built on it
///
/// This layer holds the accessor that coordinates the record model, the
/// change notifier and the host through ports, and the fetch-data workflow
/// that renders it.
pub mod dto;
pub mod read_models;
pub mod relationship_view;
pub mod use_cases;

pub use relationship_view::RelationshipView;
