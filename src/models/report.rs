// file: src/models/report.rs
// description: deduplicated per-category entity report
// reference: internal data structures

use crate::models::{Entity, EntityLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-scan report: the deduplicated person and organization name sets.
/// Ordered sets so rendering is deterministic; insertion order of the
/// underlying occurrences is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReport {
    pub names: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

impl EntityReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition tagged entities by label and deduplicate their texts.
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut report = Self::new();

        for entity in entities {
            match entity.label {
                EntityLabel::Person => {
                    report.names.insert(entity.text.clone());
                }
                EntityLabel::Organization => {
                    report.companies.insert(entity.text.clone());
                }
            }
        }

        report
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.companies.is_empty()
    }

    pub fn total_unique(&self) -> usize {
        self.names.len() + self.companies.len()
    }
}
