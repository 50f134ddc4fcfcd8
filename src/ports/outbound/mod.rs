/// Outbound ports (Driven ports) - Collaborator interfaces
///
/// These ports define the interfaces that the view core uses to interact
/// with the record model, the reactivity runtime and the rendering host,
/// plus the output side of the fetch-data use case.
pub mod change_notifier;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod record_model;
pub mod reference;
pub mod view_host;

pub use change_notifier::{ChangeNotifier, FieldObserver};
pub use formatter::RelationshipFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use record_model::{DescribeEntity, RecordModel};
pub use reference::{Reference, SharedReference};
pub use view_host::ViewHost;
