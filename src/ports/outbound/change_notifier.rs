use std::rc::Rc;

/// Callback invoked, with no arguments, when an observed field changes
///
/// Observers are identified by pointer: `unsubscribe` removes the
/// registration whose observer is `Rc::ptr_eq` to the one given.
pub type FieldObserver = Rc<dyn Fn()>;

/// ChangeNotifier port for field-level mutation observation
///
/// This port abstracts the host's reactivity runtime. Implementations call
/// every observer registered for `(target, field)` whenever that field is
/// mutated through the host's normal mutation path.
///
/// Implementations must not invoke observers from inside `subscribe` or
/// `unsubscribe`.
pub trait ChangeNotifier<R> {
    /// Registers `observer` for mutations of `field` on `target`
    fn subscribe(&self, target: &Rc<R>, field: &str, observer: FieldObserver);

    /// Removes a registration previously made with the same arguments
    ///
    /// Removing a registration that does not exist is a no-op.
    fn unsubscribe(&self, target: &Rc<R>, field: &str, observer: &FieldObserver);
}
