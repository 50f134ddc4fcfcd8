use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a relationship points at a single entity or an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    /// To-one: a single related entity or none
    BelongsTo,
    /// To-many: an ordered collection of related entities
    HasMany,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::BelongsTo => "belongsTo",
            RelationshipKind::HasMany => "hasMany",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "belongsto" | "toone" => Ok(RelationshipKind::BelongsTo),
            "hasmany" | "tomany" => Ok(RelationshipKind::HasMany),
            _ => Err(format!(
                "Invalid relationship kind: {}. Please specify 'belongsTo' or 'hasMany'",
                s
            )),
        }
    }
}

/// Relationship metadata as declared on the record's model
///
/// `is_async == false` promises that the relationship is always loaded, so
/// the current value can be trusted without a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipMeta {
    pub kind: RelationshipKind,
    pub is_async: bool,
}

impl RelationshipMeta {
    pub fn new(kind: RelationshipKind, is_async: bool) -> Self {
        Self { kind, is_async }
    }

    pub fn belongs_to(is_async: bool) -> Self {
        Self::new(RelationshipKind::BelongsTo, is_async)
    }

    pub fn has_many(is_async: bool) -> Self {
        Self::new(RelationshipKind::HasMany, is_async)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str_accepts_common_spellings() {
        assert_eq!(
            "belongsTo".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::BelongsTo
        );
        assert_eq!(
            "belongs_to".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::BelongsTo
        );
        assert_eq!(
            "to-one".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::BelongsTo
        );
        assert_eq!(
            "hasMany".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::HasMany
        );
        assert_eq!(
            "to-many".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::HasMany
        );
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        let err = "manyToMany".parse::<RelationshipKind>().unwrap_err();
        assert!(err.contains("Invalid relationship kind"));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [RelationshipKind::BelongsTo, RelationshipKind::HasMany] {
            assert_eq!(kind.to_string().parse::<RelationshipKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_meta_constructors() {
        let meta = RelationshipMeta::belongs_to(true);
        assert_eq!(meta.kind, RelationshipKind::BelongsTo);
        assert!(meta.is_async);

        let meta = RelationshipMeta::has_many(false);
        assert_eq!(meta.kind, RelationshipKind::HasMany);
        assert!(!meta.is_async);
    }
}
