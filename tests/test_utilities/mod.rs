/// Shared helpers for integration tests
pub mod harness;
pub mod mocks;
