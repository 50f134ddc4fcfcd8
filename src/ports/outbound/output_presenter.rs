use crate::shared::Result;

/// OutputPresenter port for presenting rendered output
///
/// This port abstracts the output destination (stdout, a buffer, ...)
/// where each rendering of a relationship is presented.
pub trait OutputPresenter {
    /// Presents one rendering
    ///
    /// # Errors
    /// Returns an error if writing to the output destination fails
    fn present(&self, content: &str) -> Result<()>;
}
