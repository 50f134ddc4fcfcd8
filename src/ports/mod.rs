/// Ports module defining interfaces for hexagonal architecture
///
/// The view core only talks to its collaborators through these outbound
/// (driven) ports: the record model, the relationship reference, the change
/// notifier and the host that re-delivers values.
pub mod outbound;
