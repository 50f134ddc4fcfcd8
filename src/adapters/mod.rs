/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports: an in-memory
/// record model driven by fixtures, hosts that receive re-delivery signals,
/// and console output.
pub mod outbound;
