use super::MemoryRecord;
use crate::ports::outbound::{ChangeNotifier, FieldObserver};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Registration {
    target: Weak<MemoryRecord>,
    field: String,
    observer: FieldObserver,
}

impl Registration {
    fn is_for(&self, target: &Rc<MemoryRecord>, field: &str) -> bool {
        std::ptr::eq(self.target.as_ptr(), Rc::as_ptr(target)) && self.field == field
    }
}

/// Field-level change notifier for [`MemoryRecord`]s
///
/// Cloning creates a new handle to the **same** registrations, so the store
/// and every view it feeds share one notifier.
#[derive(Clone, Default)]
pub struct MemoryChangeNotifier {
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl MemoryChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations (for testing/monitoring)
    pub fn registration_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn is_observed(&self, target: &Rc<MemoryRecord>, field: &str) -> bool {
        self.registrations
            .borrow()
            .iter()
            .any(|r| r.is_for(target, field))
    }

    /// Calls every observer registered for `(target, field)`
    ///
    /// Observers are collected first, so they may subscribe or unsubscribe
    /// while being notified.
    pub fn notify(&self, target: &Rc<MemoryRecord>, field: &str) {
        let observers: Vec<FieldObserver> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.is_for(target, field))
            .map(|r| Rc::clone(&r.observer))
            .collect();

        tracing::trace!(
            record = %target.identifier(),
            field,
            observers = observers.len(),
            "memory_store.notify"
        );
        for observer in observers {
            observer();
        }
    }
}

impl ChangeNotifier<MemoryRecord> for MemoryChangeNotifier {
    fn subscribe(&self, target: &Rc<MemoryRecord>, field: &str, observer: FieldObserver) {
        self.registrations.borrow_mut().push(Registration {
            target: Rc::downgrade(target),
            field: field.to_string(),
            observer,
        });
    }

    fn unsubscribe(&self, target: &Rc<MemoryRecord>, field: &str, observer: &FieldObserver) {
        self.registrations
            .borrow_mut()
            .retain(|r| !(r.is_for(target, field) && Rc::ptr_eq(&r.observer, observer)));
    }
}
