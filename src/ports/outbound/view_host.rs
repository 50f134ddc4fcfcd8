/// ViewHost port for re-delivering values to whoever renders them
///
/// The view never pushes values: it tells the host that the last value
/// returned by `compute` is stale, and the host decides when to call
/// `compute` again.
pub trait ViewHost {
    /// Signals that a new value is available
    ///
    /// May be called from a load continuation or from a change
    /// notification; the view holds no internal borrow while calling it, so
    /// implementations may call back into the view.
    fn invalidate(&self);

    /// Receives a load failure nobody else will handle
    ///
    /// # Arguments
    /// * `error` - The error returned by `Reference::load`, untranslated
    fn unhandled_failure(&self, error: anyhow::Error);
}
