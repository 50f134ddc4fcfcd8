use crate::ports::outbound::ViewHost;
use std::cell::Cell;
use std::rc::Rc;

/// LoggingHost adapter that only records what it is told
///
/// Useful when the caller polls the view instead of reacting to signals:
/// failures are logged at `error` level and invalidations are counted.
#[derive(Clone, Default)]
pub struct LoggingHost {
    invalidations: Rc<Cell<usize>>,
    failures: Rc<Cell<usize>>,
}

impl LoggingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.get()
    }

    pub fn failures(&self) -> usize {
        self.failures.get()
    }
}

impl ViewHost for LoggingHost {
    fn invalidate(&self) {
        self.invalidations.set(self.invalidations.get() + 1);
        tracing::debug!(count = self.invalidations.get(), "logging_host.invalidate");
    }

    fn unhandled_failure(&self, error: anyhow::Error) {
        self.failures.set(self.failures.get() + 1);
        tracing::error!(error = %error, "logging_host.unhandled_failure");
    }
}
