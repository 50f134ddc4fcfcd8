use crate::application::read_models::{EntityView, RelationshipReadModel, ValueView};
use crate::ports::outbound::RelationshipFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;

/// TextFormatter adapter - one human-readable line per rendering
///
/// Colors are only emitted when enabled, so piped output stays plain.
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn entity(&self, entity: &EntityView) -> String {
        if self.colored {
            format!("{} ({})", entity.label.green(), entity.id.dimmed())
        } else {
            format!("{} ({})", entity.label, entity.id)
        }
    }

    fn value(&self, value: &ValueView) -> String {
        match value {
            ValueView::One(None) => "(empty)".to_string(),
            ValueView::One(Some(entity)) => self.entity(entity),
            ValueView::Many(members) => {
                let members: Vec<String> = members.iter().map(|m| self.entity(m)).collect();
                format!("[{}]", members.join(", "))
            }
        }
    }
}

impl RelationshipFormatter for TextFormatter {
    fn format(&self, model: &RelationshipReadModel) -> Result<String> {
        let subject = format!("{} {}", model.record, model.relationship);
        let mut line = if self.colored {
            format!("{}", subject.bold())
        } else {
            subject
        };

        if let Some(kind) = model.kind.filter(|_| model.document) {
            line.push_str(&format!(" [{}]", kind));
        }

        let value = self.value(&model.value);
        if model.document {
            line.push_str(&format!(" -> {{ data: {} }}", value));
        } else {
            line.push_str(&format!(" -> {}", value));
        }

        if model.loading {
            let marker = "(loading...)";
            if self.colored {
                line.push_str(&format!(" {}", marker.yellow()));
            } else {
                line.push_str(&format!(" {}", marker));
            }
        }

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::domain::RelationshipKind;

    fn shen() -> EntityView {
        EntityView {
            id: "pet:1".to_string(),
            label: "Shen".to_string(),
        }
    }

    fn model(value: ValueView, loading: bool, document: bool) -> RelationshipReadModel {
        RelationshipReadModel {
            record: "person:1".to_string(),
            relationship: "bestDog".to_string(),
            kind: Some(RelationshipKind::BelongsTo),
            loading,
            document,
            value,
        }
    }

    #[test]
    fn test_plain_one() {
        let output = TextFormatter::new(false)
            .format(&model(ValueView::One(Some(shen())), false, false))
            .unwrap();
        assert_eq!(output, "person:1 bestDog -> Shen (pet:1)");
    }

    #[test]
    fn test_interim_empty_while_loading() {
        let output = TextFormatter::new(false)
            .format(&model(ValueView::One(None), true, false))
            .unwrap();
        assert_eq!(output, "person:1 bestDog -> (empty) (loading...)");
    }

    #[test]
    fn test_document_many() {
        let output = TextFormatter::new(false)
            .format(&model(ValueView::Many(vec![shen()]), false, true))
            .unwrap();
        assert_eq!(output, "person:1 bestDog [belongsTo] -> { data: [Shen (pet:1)] }");
    }

    #[test]
    fn test_colored_output_keeps_content() {
        let output = TextFormatter::new(true)
            .format(&model(ValueView::One(Some(shen())), false, false))
            .unwrap();
        assert!(output.contains("Shen"));
        assert!(output.contains('\u{1b}'));
    }
}
