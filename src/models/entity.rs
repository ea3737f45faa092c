// file: src/models/entity.rs
// description: named entity model produced by the tagger
// reference: conll-2003 entity categories

use serde::{Deserialize, Serialize};

/// Categories the pipeline keeps. Every other label the model predicts is
/// discarded before an `Entity` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "person",
            EntityLabel::Organization => "organization",
        }
    }

    /// Map a model label (BIO prefix already stripped) onto a kept category.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label {
            "PER" | "PERSON" => Some(EntityLabel::Person),
            "ORG" => Some(EntityLabel::Organization),
            _ => None,
        }
    }
}

/// A tagged span of the extracted text. Byte offsets index into the text the
/// tagger was given; the text field is the exact slice at those offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

impl Entity {
    pub fn new(text: String, label: EntityLabel, start: usize, end: usize, confidence: f32) -> Self {
        Self {
            text,
            label,
            start,
            end,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(
            EntityLabel::from_model_label("PER"),
            Some(EntityLabel::Person)
        );
        assert_eq!(
            EntityLabel::from_model_label("PERSON"),
            Some(EntityLabel::Person)
        );
        assert_eq!(
            EntityLabel::from_model_label("ORG"),
            Some(EntityLabel::Organization)
        );
    }

    #[test]
    fn test_unknown_labels_discarded() {
        assert_eq!(EntityLabel::from_model_label("LOC"), None);
        assert_eq!(EntityLabel::from_model_label("MISC"), None);
        assert_eq!(EntityLabel::from_model_label("DATE"), None);
        assert_eq!(EntityLabel::from_model_label(""), None);
    }

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new("Acme Corp".to_string(), EntityLabel::Organization, 18, 27, 0.97);
        assert_eq!(entity.label.as_str(), "organization");
        assert_eq!(entity.end - entity.start, entity.text.len());
    }
}
