use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An ordered, shared collection of related entities
///
/// Cloning a `RelatedCollection` creates a new handle to the **same**
/// members. Membership is replaced in place, so the collection keeps its
/// identity across membership changes; [`RelatedCollection::ptr_eq`] is the
/// only equality the view relies on.
pub struct RelatedCollection<E> {
    members: Rc<RefCell<Vec<Rc<E>>>>,
}

impl<E> RelatedCollection<E> {
    pub fn new() -> Self {
        Self::from_members(Vec::new())
    }

    pub fn from_members(members: Vec<Rc<E>>) -> Self {
        Self {
            members: Rc::new(RefCell::new(members)),
        }
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Snapshot of the current members, in order
    pub fn members(&self) -> Vec<Rc<E>> {
        self.members.borrow().clone()
    }

    /// Replaces the whole membership while keeping the collection identity
    pub fn replace(&self, members: Vec<Rc<E>>) {
        *self.members.borrow_mut() = members;
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.members, &other.members)
    }
}

impl<E> Clone for RelatedCollection<E> {
    fn clone(&self) -> Self {
        Self {
            members: Rc::clone(&self.members),
        }
    }
}

impl<E> Default for RelatedCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for RelatedCollection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.members.borrow().iter()).finish()
    }
}

/// The value of one relationship on one record
///
/// `Empty` stands for both "no related entity" on a to-one relationship and
/// "not materialized yet" on a to-many relationship.
pub enum RelationshipValue<E> {
    Empty,
    One(Rc<E>),
    Many(RelatedCollection<E>),
}

impl<E> RelationshipValue<E> {
    /// True for `Empty` and for an empty collection
    pub fn is_empty(&self) -> bool {
        match self {
            RelationshipValue::Empty => true,
            RelationshipValue::One(_) => false,
            RelationshipValue::Many(collection) => collection.is_empty(),
        }
    }

    /// Identity comparison.
    ///
    /// Entities and collections are compared by pointer, never by content: a
    /// collection whose members changed in place is still the same value.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (RelationshipValue::Empty, RelationshipValue::Empty) => true,
            (RelationshipValue::One(a), RelationshipValue::One(b)) => Rc::ptr_eq(a, b),
            (RelationshipValue::Many(a), RelationshipValue::Many(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn as_one(&self) -> Option<&Rc<E>> {
        match self {
            RelationshipValue::One(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&RelatedCollection<E>> {
        match self {
            RelationshipValue::Many(collection) => Some(collection),
            _ => None,
        }
    }

    /// Related entities in order (zero or one for a to-one value)
    pub fn entities(&self) -> Vec<Rc<E>> {
        match self {
            RelationshipValue::Empty => Vec::new(),
            RelationshipValue::One(entity) => vec![Rc::clone(entity)],
            RelationshipValue::Many(collection) => collection.members(),
        }
    }
}

impl<E> Clone for RelationshipValue<E> {
    fn clone(&self) -> Self {
        match self {
            RelationshipValue::Empty => RelationshipValue::Empty,
            RelationshipValue::One(entity) => RelationshipValue::One(Rc::clone(entity)),
            RelationshipValue::Many(collection) => RelationshipValue::Many(collection.clone()),
        }
    }
}

impl<E> Default for RelationshipValue<E> {
    fn default() -> Self {
        RelationshipValue::Empty
    }
}

impl<E: fmt::Debug> fmt::Debug for RelationshipValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipValue::Empty => f.write_str("Empty"),
            RelationshipValue::One(entity) => f.debug_tuple("One").field(entity).finish(),
            RelationshipValue::Many(collection) => {
                f.debug_tuple("Many").field(collection).finish()
            }
        }
    }
}
