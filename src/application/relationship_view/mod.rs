use crate::ports::outbound::{ChangeNotifier, FieldObserver, RecordModel, SharedReference, ViewHost};
use crate::relationship::domain::{
    RelationshipDocument, RelationshipKind, RelationshipValue, SubscriptionKey,
};
use crate::shared::Result;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tokio_util::sync::CancellationToken;


/// Mutable state of one view, owned exclusively by that view
struct ViewState<R: RecordModel> {
    key: Option<SubscriptionKey<R>>,
    value: Option<RelationshipValue<R::Entity>>,
    kind: Option<RelationshipKind>,
    /// Outstanding fetch handle; at most one at any time
    pending_load: Option<CancellationToken>,
}

impl<R: RecordModel> Default for ViewState<R> {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
            kind: None,
            pending_load: None,
        }
    }
}

struct ViewCore<R: RecordModel, N, H> {
    notifier: N,
    host: H,
    /// The fixed callback installed for every subscription
    observer: FieldObserver,
    state: RefCell<ViewState<R>>,
}

/// RelationshipView - memoized, self-updating accessor for one relationship
///
/// `compute(record, name)` returns the relationship's best currently-known
/// value synchronously. Behind that value the view keeps exactly one
/// subscription on `(record, name)` and at most one outstanding load:
///
/// - repeated calls with the same record (by identity) and name return the
///   cached value without touching the record model again;
/// - a different record or name tears the old subscription down, cancels
///   the outstanding load, and starts over;
/// - a load that resolves to a different value, or any external mutation of
///   the field, updates the cache and calls [`ViewHost::invalidate`].
///
/// Loads run on the current thread's [`tokio::task::LocalSet`], so the view
/// must be driven from inside one when async relationships are involved.
/// Dropping the view releases its subscription and cancels its load.
///
/// # Type Parameters
/// * `R` - RecordModel implementation
/// * `N` - ChangeNotifier implementation
/// * `H` - ViewHost implementation
pub struct RelationshipView<R, N, H>
where
    R: RecordModel,
    N: ChangeNotifier<R>,
    H: ViewHost,
{
    core: Rc<ViewCore<R, N, H>>,
}

impl<R, N, H> RelationshipView<R, N, H>
where
    R: RecordModel + 'static,
    R::Entity: 'static,
    N: ChangeNotifier<R> + 'static,
    H: ViewHost + 'static,
{
    /// Creates a view with injected collaborators. No subscription is made
    /// until the first `compute`.
    pub fn new(notifier: N, host: H) -> Self {
        let core = Rc::new_cyclic(|core: &Weak<ViewCore<R, N, H>>| {
            let core = core.clone();
            let observer: FieldObserver = Rc::new(move || {
                if let Some(core) = core.upgrade() {
                    core.on_external_change();
                }
            });

            ViewCore {
                notifier,
                host,
                observer,
                state: RefCell::new(ViewState::default()),
            }
        });

        Self { core }
    }

    /// Returns the current value of `relationship` on `record`
    ///
    /// Never blocks. For an async relationship that is not materialized yet
    /// the returned value is interim (usually `Empty`); the host is
    /// invalidated once the load brings something different.
    ///
    /// # Errors
    /// Returns the record model's error unchanged when the relationship
    /// cannot be resolved. The subscription made for this call is released
    /// first, so the next call starts over.
    ///
    /// # Panics
    /// Starting a load outside a `LocalSet` panics (see
    /// [`tokio::task::spawn_local`]).
    pub fn compute(&self, record: &Rc<R>, relationship: &str) -> Result<RelationshipValue<R::Entity>> {
        self.core.compute(record, relationship)
    }

    /// Same as [`compute`](Self::compute), wrapped as a `{ data }` document
    pub fn compute_document(
        &self,
        record: &Rc<R>,
        relationship: &str,
    ) -> Result<RelationshipDocument<R::Entity>> {
        let data = self.core.compute(record, relationship)?;
        let kind = self.core.state.borrow().kind;
        Ok(RelationshipDocument::new(data, kind))
    }
}

impl<R, N, H> RelationshipView<R, N, H>
where
    R: RecordModel,
    N: ChangeNotifier<R>,
    H: ViewHost,
{
    /// Releases the subscription and cancels the outstanding load
    ///
    /// Idempotent; the view may be used again afterwards, starting from a
    /// fresh subscription.
    pub fn dispose(&self) {
        self.core.teardown();
    }

    /// Whether a load is outstanding for the current subscription
    pub fn is_loading(&self) -> bool {
        self.core.state.borrow().pending_load.is_some()
    }

    /// The cached value, without any side effect
    pub fn cached(&self) -> Option<RelationshipValue<R::Entity>> {
        self.core.state.borrow().value.clone()
    }

    /// Name of the relationship currently subscribed to
    pub fn subscription(&self) -> Option<String> {
        self.core
            .state
            .borrow()
            .key
            .as_ref()
            .map(|key| key.relationship().to_string())
    }
}

impl<R, N, H> Drop for RelationshipView<R, N, H>
where
    R: RecordModel,
    N: ChangeNotifier<R>,
    H: ViewHost,
{
    fn drop(&mut self) {
        self.core.teardown();
    }
}

impl<R, N, H> ViewCore<R, N, H>
where
    R: RecordModel,
    N: ChangeNotifier<R>,
    H: ViewHost,
{
    /// Removes the observer, cancels the outstanding load, clears the cache
    fn teardown(&self) {
        let (key, pending) = {
            let mut state = self.state.borrow_mut();
            state.value = None;
            state.kind = None;
            (state.key.take(), state.pending_load.take())
        };

        if let Some(key) = key {
            tracing::debug!(
                relationship = key.relationship(),
                "relationship_view.unsubscribe"
            );
            self.notifier
                .unsubscribe(key.record(), key.relationship(), &self.observer);
        }

        if let Some(token) = pending {
            tracing::debug!("relationship_view.load.cancel");
            token.cancel();
        }
    }
}

impl<R, N, H> ViewCore<R, N, H>
where
    R: RecordModel + 'static,
    R::Entity: 'static,
    N: ChangeNotifier<R> + 'static,
    H: ViewHost + 'static,
{
    fn compute(self: &Rc<Self>, record: &Rc<R>, relationship: &str) -> Result<RelationshipValue<R::Entity>> {
        {
            let state = self.state.borrow();
            if let (Some(key), Some(value)) = (&state.key, &state.value) {
                if key.matches(record, relationship) {
                    return Ok(value.clone());
                }
            }
        }

        self.teardown();

        self.state.borrow_mut().key = Some(SubscriptionKey::new(Rc::clone(record), relationship));
        self.notifier
            .subscribe(record, relationship, Rc::clone(&self.observer));
        tracing::debug!(relationship, "relationship_view.subscribe");

        self.resolve(record, relationship).inspect_err(|error| {
            tracing::debug!(relationship, error = %error, "relationship_view.resolve.failed");
            self.teardown();
        })
    }

    /// Reads the reference, caches its value and starts a load if needed
    fn resolve(self: &Rc<Self>, record: &Rc<R>, relationship: &str) -> Result<RelationshipValue<R::Entity>> {
        let meta = record.relationship_metadata(relationship)?;
        let reference = record.reference(relationship)?;
        let value = reference.value();
        let token = meta.is_async.then(CancellationToken::new);

        let superseded = {
            let mut state = self.state.borrow_mut();
            state.value = Some(value.clone());
            state.kind = Some(meta.kind);
            std::mem::replace(&mut state.pending_load, token.clone())
        };
        if let Some(previous) = superseded {
            previous.cancel();
        }

        if let Some(token) = token {
            self.start_load(reference, token, relationship);
        }

        Ok(value)
    }

    fn start_load(
        self: &Rc<Self>,
        reference: SharedReference<R::Entity>,
        token: CancellationToken,
        relationship: &str,
    ) {
        let core = Rc::downgrade(self);
        let relationship = relationship.to_string();
        tracing::debug!(relationship = %relationship, "relationship_view.load.start");

        tokio::task::spawn_local(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(relationship = %relationship, "relationship_view.load.discarded");
                    return;
                }
                outcome = reference.load() => outcome,
            };

            if token.is_cancelled() {
                tracing::debug!(relationship = %relationship, "relationship_view.load.discarded");
                return;
            }

            if let Some(core) = core.upgrade() {
                core.finish_load(&relationship, outcome);
            }
        });
    }

    /// Applies the outcome of a load whose token is still live
    fn finish_load(&self, relationship: &str, outcome: Result<RelationshipValue<R::Entity>>) {
        let mut state = self.state.borrow_mut();
        state.pending_load = None;

        match outcome {
            Ok(value) => {
                let changed = state
                    .value
                    .as_ref()
                    .is_none_or(|cached| !cached.same_as(&value));
                if changed {
                    state.value = Some(value);
                }
                drop(state);

                if changed {
                    tracing::debug!(relationship, "relationship_view.load.changed");
                    self.host.invalidate();
                } else {
                    tracing::trace!(relationship, "relationship_view.load.unchanged");
                }
            }
            Err(error) => {
                drop(state);
                tracing::warn!(relationship, error = %error, "relationship_view.load.failed");
                self.host.unhandled_failure(error);
            }
        }
    }

    /// Fired by the change notifier for the subscribed `(record, field)`
    fn on_external_change(self: &Rc<Self>) {
        let key = self.state.borrow().key.clone();
        let Some(key) = key else {
            return;
        };

        tracing::debug!(
            relationship = key.relationship(),
            "relationship_view.external_change"
        );
        if let Err(error) = self.resolve(key.record(), key.relationship()) {
            tracing::warn!(
                relationship = key.relationship(),
                error = %error,
                "relationship_view.recompute.failed"
            );
            self.host.unhandled_failure(error);
        }
        self.host.invalidate();
    }
}
