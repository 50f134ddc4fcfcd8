use crate::application::read_models::{RelationshipReadModel, ValueView};
use crate::ports::outbound::RelationshipFormatter;
use crate::relationship::domain::RelationshipKind;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Document<'a> {
    data: &'a ValueView,
    meta: Meta<'a>,
}

#[derive(Debug, Serialize)]
struct Meta<'a> {
    record: &'a str,
    relationship: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<RelationshipKind>,
    loading: bool,
}

/// JsonFormatter adapter - one compact JSON object per rendering
///
/// Document renderings use a `{ "data": ..., "meta": ... }` envelope;
/// plain renderings serialize the read model as is.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipFormatter for JsonFormatter {
    fn format(&self, model: &RelationshipReadModel) -> Result<String> {
        let json = if model.document {
            serde_json::to_string(&Document {
                data: &model.value,
                meta: Meta {
                    record: &model.record,
                    relationship: &model.relationship,
                    kind: model.kind,
                    loading: model.loading,
                },
            })?
        } else {
            serde_json::to_string(model)?
        };
        Ok(json)
    }
}
