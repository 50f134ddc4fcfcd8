use crate::adapters::outbound::host::{ChannelHost, HostSignal};
use crate::application::dto::{FetchRequest, FetchResponse};
use crate::application::read_models::{EntityView, RelationshipReadModel};
use crate::application::RelationshipView;
use crate::ports::outbound::{
    ChangeNotifier, DescribeEntity, OutputPresenter, ProgressReporter, RecordModel,
    RelationshipFormatter,
};
use crate::shared::Result;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;

/// How often the waiting loop re-checks whether the load is still outstanding.
/// A load that resolves to the value already shown sends no signal at all.
const LOAD_POLL_INTERVAL_MS: u64 = 10;

type ChannelView<R, N> = RelationshipView<R, N, ChannelHost>;

/// FetchRelationshipUseCase - reads one relationship and follows its load
///
/// Presents the interim value right away, then every value the view
/// re-delivers until no load is outstanding. Must run inside a `LocalSet`.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
/// * `F` - RelationshipFormatter implementation
/// * `OP` - OutputPresenter implementation
pub struct FetchRelationshipUseCase<PR, F, OP> {
    progress_reporter: PR,
    formatter: F,
    presenter: OP,
}

impl<PR, F, OP> FetchRelationshipUseCase<PR, F, OP>
where
    PR: ProgressReporter,
    F: RelationshipFormatter,
    OP: OutputPresenter,
{
    pub fn new(progress_reporter: PR, formatter: F, presenter: OP) -> Self {
        Self {
            progress_reporter,
            formatter,
            presenter,
        }
    }

    /// Executes the use case for `record`
    ///
    /// # Errors
    /// Returns the record model's error if the relationship cannot be read,
    /// the load failure if the load fails, or a timeout error if the load is
    /// still outstanding after `request.wait`.
    pub async fn execute<R, N>(
        &self,
        record: Rc<R>,
        notifier: N,
        request: FetchRequest,
    ) -> Result<FetchResponse>
    where
        R: RecordModel + DescribeEntity + 'static,
        R::Entity: DescribeEntity + 'static,
        N: ChangeNotifier<R> + 'static,
    {
        self.progress_reporter.report(&format!(
            "🔍 Reading '{}' of {}...",
            request.relationship,
            record.entity_id()
        ));

        let (host, mut signals) = ChannelHost::new();
        let view = RelationshipView::new(notifier, host);

        let mut last = self.render(&view, &record, &request)?;
        let mut renderings = 1;

        let deadline = Instant::now() + request.wait;
        while view.is_loading() {
            self.progress_reporter
                .report_waiting(&format!("⏳ Loading '{}'...", request.relationship));

            tokio::select! {
                signal = signals.recv() => match signal {
                    Some(signal) => {
                        if let Some(model) = self.handle_signal(signal, &view, &record, &request)? {
                            last = model;
                            renderings += 1;
                        }
                    }
                    None => break,
                },
                _ = tokio::time::sleep(Duration::from_millis(LOAD_POLL_INTERVAL_MS)) => {}
            }

            if view.is_loading() && Instant::now() >= deadline {
                self.progress_reporter.report_error("❌ Load did not finish in time");
                anyhow::bail!(
                    "Timed out after {}ms waiting for '{}' of {}\n\n💡 Hint: Raise --wait-ms or lower fetch_latency_ms in the fixture",
                    request.wait.as_millis(),
                    request.relationship,
                    record.entity_id()
                );
            }
        }

        while let Ok(signal) = signals.try_recv() {
            if let Some(model) = self.handle_signal(signal, &view, &record, &request)? {
                last = model;
                renderings += 1;
            }
        }

        self.progress_reporter.report_completion(&format!(
            "✅ '{}' resolved ({} rendering{})",
            request.relationship,
            renderings,
            if renderings == 1 { "" } else { "s" }
        ));

        Ok(FetchResponse { renderings, last })
    }

    fn handle_signal<R, N>(
        &self,
        signal: HostSignal,
        view: &ChannelView<R, N>,
        record: &Rc<R>,
        request: &FetchRequest,
    ) -> Result<Option<RelationshipReadModel>>
    where
        R: RecordModel + DescribeEntity + 'static,
        R::Entity: DescribeEntity + 'static,
        N: ChangeNotifier<R> + 'static,
    {
        match signal {
            HostSignal::Invalidated => self.render(view, record, request).map(Some),
            HostSignal::Failed(error) => {
                self.progress_reporter
                    .report_error(&format!("❌ Failed to load '{}'", request.relationship));
                Err(error)
            }
        }
    }

    fn render<R, N>(
        &self,
        view: &ChannelView<R, N>,
        record: &Rc<R>,
        request: &FetchRequest,
    ) -> Result<RelationshipReadModel>
    where
        R: RecordModel + DescribeEntity + 'static,
        R::Entity: DescribeEntity + 'static,
        N: ChangeNotifier<R> + 'static,
    {
        let record_id = record.entity_id();
        let describe = |entity: &R::Entity| EntityView::describe(entity);

        let model = if request.document {
            let document = view.compute_document(record, &request.relationship)?;
            RelationshipReadModel::from_document(
                &record_id,
                &request.relationship,
                &document,
                view.is_loading(),
                describe,
            )
        } else {
            let value = view.compute(record, &request.relationship)?;
            RelationshipReadModel::from_value(
                &record_id,
                &request.relationship,
                &value,
                view.is_loading(),
                describe,
            )
        };

        self.presenter.present(&self.formatter.format(&model)?)?;
        Ok(model)
    }
}
