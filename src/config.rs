//! Fixture file support for fetch-data.
//!
//! Provides YAML-based fixtures through `fetch-data.config.yml` files,
//! including data structures, file loading, validation and conversion into a
//! [`MemoryStore`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::memory::{
    FetchPolicy, MemoryStore, RecordData, RecordIdentifier, RelationshipData,
};
use crate::relationship::domain::RelationshipKind;
use crate::shared::error::ViewError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "fetch-data.config.yml";

/// Top-level fixture file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Simulated latency of every fetch, in milliseconds
    pub fetch_latency_ms: Option<u64>,
    /// When set, every fetch fails with this message
    pub fail_fetches: Option<String>,
    /// Records materialized up front
    #[serde(default)]
    pub records: Vec<RecordEntry>,
    /// Records that only become local once a load fetches them
    #[serde(default)]
    pub remote: Vec<RecordEntry>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// One record in a fixture.
#[derive(Debug, Deserialize)]
pub struct RecordEntry {
    #[serde(rename = "type")]
    pub record_type: String,
    pub id: ScalarId,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipEntry>,
}

/// Record ids may be written as YAML strings or numbers.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScalarId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ScalarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarId::Number(n) => write!(f, "{}", n),
            ScalarId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A declared relationship and its linkage.
#[derive(Debug, Deserialize)]
pub struct RelationshipEntry {
    pub kind: RelationshipKind,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// `null`, a single `type:id`, or a list of them.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Linkage {
    One(String),
    Many(Vec<String>),
}

impl ConfigFile {
    /// Builds a store holding every record of this fixture.
    pub fn build_store(&self) -> Result<MemoryStore> {
        let store = MemoryStore::with_fetch_policy(self.fetch_policy());

        for entry in &self.records {
            store.push(entry.to_record_data()?);
        }
        for entry in &self.remote {
            store.stage_remote(entry.to_record_data()?);
        }

        tracing::debug!(
            records = self.records.len(),
            remote = self.remote.len(),
            "fixture.store_built"
        );
        Ok(store)
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            latency: Duration::from_millis(self.fetch_latency_ms.unwrap_or(0)),
            fail_with: self.fail_fetches.clone(),
        }
    }
}

impl RecordEntry {
    pub fn identifier(&self) -> Result<RecordIdentifier> {
        RecordIdentifier::new(self.record_type.clone(), self.id.to_string())
    }

    fn to_record_data(&self) -> Result<RecordData> {
        let mut data = RecordData::new(self.identifier()?);
        data.attributes = self.attributes.clone();

        for (name, relationship) in &self.relationships {
            let targets = relationship.targets()?;
            let relationship = match relationship.kind {
                RelationshipKind::BelongsTo => {
                    RelationshipData::belongs_to(relationship.is_async, targets.into_iter().next())
                }
                RelationshipKind::HasMany => {
                    RelationshipData::has_many(relationship.is_async, targets)
                }
            };
            data = data.with_relationship(name, relationship);
        }

        Ok(data)
    }
}

impl RelationshipEntry {
    fn targets(&self) -> Result<Vec<RecordIdentifier>> {
        match &self.data {
            None => Ok(Vec::new()),
            Some(Linkage::One(target)) => Ok(vec![target.parse()?]),
            Some(Linkage::Many(targets)) => targets.iter().map(|t| t.parse()).collect(),
        }
    }
}

/// Load a fixture from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read fixture file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse fixture file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config, path)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover a fixture in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Load a fixture from a file, or discover it when `path` is a directory.
pub fn load_fixture(path: &Path) -> Result<ConfigFile> {
    if !path.is_dir() {
        return load_config_from_path(path);
    }

    discover_config(path)?.ok_or_else(|| {
        ViewError::FixtureError {
            path: path.to_path_buf(),
            reason: format!("no {} found in this directory", CONFIG_FILENAME),
            hint: format!("Create {} or pass the fixture file directly", CONFIG_FILENAME),
        }
        .into()
    })
}

/// Validate the loaded fixture.
fn validate_config(config: &ConfigFile, path: &Path) -> Result<()> {
    let invalid = |reason: String, hint: &str| -> anyhow::Error {
        ViewError::FixtureError {
            path: path.to_path_buf(),
            reason,
            hint: hint.to_string(),
        }
        .into()
    };

    let sections = [("records", &config.records), ("remote", &config.remote)];
    for (section, entries) in sections {
        for (i, entry) in entries.iter().enumerate() {
            if entry.record_type.trim().is_empty() || entry.id.to_string().trim().is_empty() {
                return Err(invalid(
                    format!("{}[{}] must have a non-empty type and id", section, i),
                    "Each record needs both fields, e.g. `type: person` and `id: 1`",
                ));
            }

            for (name, relationship) in &entry.relationships {
                let mismatch = matches!(
                    (relationship.kind, &relationship.data),
                    (RelationshipKind::BelongsTo, Some(Linkage::Many(_)))
                        | (RelationshipKind::HasMany, Some(Linkage::One(_)))
                );
                if mismatch {
                    return Err(invalid(
                        format!(
                            "{}[{}].relationships.{} is declared {} but its data does not match",
                            section, i, name, relationship.kind
                        ),
                        "belongsTo takes a single `type:id` (or null); hasMany takes a list",
                    ));
                }

                relationship.targets().map_err(|e| {
                    invalid(
                        format!("{}[{}].relationships.{}: {}", section, i, name, e),
                        "Relationship data uses the form <type>:<id>, e.g. pet:1",
                    )
                })?;
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the fixture file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown fixture field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::RecordModel;
    use std::fs;
    use tempfile::TempDir;

    const PEOPLE: &str = r#"
fetch_latency_ms: 25
records:
  - type: person
    id: 1
    attributes:
      name: Chris
    relationships:
      bestDog:
        kind: belongsTo
        async: true
        data: pet:1
      children:
        kind: hasMany
        data: ["person:2"]
  - type: person
    id: "2"
    attributes:
      name: James
remote:
  - type: pet
    id: 1
    attributes:
      name: Shen
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_fixture() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "people.yml", PEOPLE);

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.fetch_latency_ms, Some(25));
        assert!(config.fail_fetches.is_none());
        assert_eq!(config.records.len(), 2);
        assert_eq!(config.records[0].id, ScalarId::Number(1));
        assert_eq!(config.records[1].id, ScalarId::Text("2".to_string()));

        let best_dog = &config.records[0].relationships["bestDog"];
        assert_eq!(best_dog.kind, RelationshipKind::BelongsTo);
        assert!(best_dog.is_async);
        assert_eq!(best_dog.data, Some(Linkage::One("pet:1".to_string())));

        let children = &config.records[0].relationships["children"];
        assert!(!children.is_async);
        assert_eq!(
            children.data,
            Some(Linkage::Many(vec!["person:2".to_string()]))
        );
    }

    #[test]
    fn test_build_store() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from_path(&write(&dir, "people.yml", PEOPLE)).unwrap();

        let store = config.build_store().unwrap();
        let chris = store.find(&"person:1".parse().unwrap()).unwrap();

        assert_eq!(chris.label(), "Chris");
        assert!(chris.relationship_metadata("bestDog").unwrap().is_async);
        assert!(store.peek(&"pet:1".parse().unwrap()).is_none());
        assert_eq!(
            config.fetch_policy(),
            FetchPolicy::with_latency(Duration::from_millis(25))
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, CONFIG_FILENAME, "fail_fetches: ServerError\n");

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.fail_fetches.as_deref(), Some("ServerError"));
        assert!(config.records.is_empty());
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_fixture_from_directory_without_file() {
        let dir = TempDir::new().unwrap();
        let err = load_fixture(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ViewError>(),
            Some(ViewError::FixtureError { .. })
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/fixture.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read fixture file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yml", "invalid: yaml: [[[broken");

        let err = format!("{}", load_config_from_path(&path).unwrap_err());
        assert!(err.contains("Failed to parse fixture file"));
    }

    #[test]
    fn test_empty_id_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "fixture.yml",
            r#"
records:
  - type: person
    id: ""
"#,
        );

        let err = format!("{}", load_config_from_path(&path).unwrap_err());
        assert!(err.contains("records[0] must have a non-empty type and id"));
    }

    #[test]
    fn test_kind_mismatch_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "fixture.yml",
            r#"
records:
  - type: person
    id: 1
    relationships:
      bestDog:
        kind: belongsTo
        data: ["pet:1", "pet:2"]
"#,
        );

        let err = format!("{}", load_config_from_path(&path).unwrap_err());
        assert!(err.contains("relationships.bestDog is declared belongsTo"));
    }

    #[test]
    fn test_bad_linkage_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "fixture.yml",
            r#"
remote:
  - type: person
    id: 1
    relationships:
      children:
        kind: hasMany
        data: ["person2"]
"#,
        );

        let err = format!("{}", load_config_from_path(&path).unwrap_err());
        assert!(err.contains("remote[0].relationships.children"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "fixture.yml", "included: []\nrecords: []\n");

        let config = load_config_from_path(&path).unwrap();
        assert!(config.unknown_fields.contains_key("included"));
    }
}
