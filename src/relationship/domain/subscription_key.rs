use std::fmt;
use std::rc::Rc;

/// The `(record, relationship)` pair a view is currently tracking
///
/// The record half is compared by identity, the relationship half by
/// string equality. Two distinct records with equal contents are different
/// keys.
pub struct SubscriptionKey<R> {
    record: Rc<R>,
    relationship: String,
}

impl<R> SubscriptionKey<R> {
    pub fn new(record: Rc<R>, relationship: impl Into<String>) -> Self {
        Self {
            record,
            relationship: relationship.into(),
        }
    }

    pub fn record(&self) -> &Rc<R> {
        &self.record
    }

    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    pub fn matches(&self, record: &Rc<R>, relationship: &str) -> bool {
        Rc::ptr_eq(&self.record, record) && self.relationship == relationship
    }
}

impl<R> Clone for SubscriptionKey<R> {
    fn clone(&self) -> Self {
        Self {
            record: Rc::clone(&self.record),
            relationship: self.relationship.clone(),
        }
    }
}

impl<R> fmt::Debug for SubscriptionKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionKey")
            .field("record", &Rc::as_ptr(&self.record))
            .field("relationship", &self.relationship)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_same_record_and_relationship() {
        let record = Rc::new("person:1");
        let key = SubscriptionKey::new(Rc::clone(&record), "bestDog");
        assert!(key.matches(&record, "bestDog"));
    }

    #[test]
    fn test_does_not_match_other_relationship() {
        let record = Rc::new("person:1");
        let key = SubscriptionKey::new(Rc::clone(&record), "bestDog");
        assert!(!key.matches(&record, "children"));
    }

    #[test]
    fn test_record_compared_by_identity() {
        let record = Rc::new("person:1".to_string());
        let twin = Rc::new("person:1".to_string());
        let key = SubscriptionKey::new(Rc::clone(&record), "bestDog");
        assert!(!key.matches(&twin, "bestDog"));
    }

    #[test]
    fn test_clone_shares_record() {
        let record = Rc::new(42);
        let key = SubscriptionKey::new(Rc::clone(&record), "parents");
        let cloned = key.clone();
        assert!(Rc::ptr_eq(cloned.record(), &record));
        assert_eq!(cloned.relationship(), "parents");
    }
}
