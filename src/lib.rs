//! relationship-view - reactive, memoized access to record relationships
//!
//! A [`RelationshipView`](application::RelationshipView) returns the current
//! value of one relationship of one record, memoizes it, starts a
//! cancellable background load for async relationships and asks its host to
//! re-read it whenever the value changes, following hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`relationship`): relationship values, kinds and subscription keys
//! - **Application Layer** (`application`): the view itself and the fetch-data use case
//! - **Ports** (`ports`): Interface definitions for collaborators
//! - **Adapters** (`adapters`): in-memory record model, hosts, formatters and console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use relationship_view::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let store = MemoryStore::new();
//! store.push(RecordData::new("pet:1".parse()?).with_attribute("name", "Shen"));
//! let chris = store.push(
//!     RecordData::new("person:1".parse()?)
//!         .with_relationship("bestDog", RelationshipData::belongs_to(true, Some("pet:1".parse()?))),
//! );
//!
//! let (host, mut signals) = ChannelHost::new();
//! let view = RelationshipView::new(store.notifier(), host);
//!
//! tokio::task::LocalSet::new()
//!     .run_until(async {
//!         let value = view.compute(&chris, "bestDog")?;
//!         println!("{:?}", value.as_one().map(|pet| pet.label()));
//!         if let Some(HostSignal::Invalidated) = signals.recv().await {
//!             let value = view.compute(&chris, "bestDog")?;
//!             println!("{:?}", value.as_one().map(|pet| pet.label()));
//!         }
//!         Ok::<(), anyhow::Error>(())
//!     })
//!     .await
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod relationship;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::host::{ChannelHost, HostSignal, LoggingHost};
    pub use crate::adapters::outbound::memory::{
        FetchPolicy, MemoryChangeNotifier, MemoryRecord, MemoryReference, MemoryStore, RecordData,
        RecordIdentifier, RelationshipData,
    };
    pub use crate::application::dto::{FetchRequest, FetchResponse};
    pub use crate::application::read_models::{EntityView, RelationshipReadModel, ValueView};
    pub use crate::application::use_cases::FetchRelationshipUseCase;
    pub use crate::application::RelationshipView;
    pub use crate::config::{discover_config, load_config_from_path, load_fixture, ConfigFile};
    pub use crate::ports::outbound::{
        ChangeNotifier, DescribeEntity, FieldObserver, OutputPresenter, ProgressReporter,
        RecordModel, Reference, RelationshipFormatter, SharedReference, ViewHost,
    };
    pub use crate::relationship::domain::{
        RelatedCollection, RelationshipDocument, RelationshipKind, RelationshipMeta,
        RelationshipValue, SubscriptionKey,
    };
    pub use crate::shared::error::{ExitCode, ViewError};
    pub use crate::shared::Result;
}
