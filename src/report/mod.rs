// file: src/report/mod.rs
// description: rendering of the entity report as warning and success notices
// reference: internal presentation contract

use crate::models::EntityReport;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Success,
}

/// One human-readable result line. Printing and coloring happen at the CLI
/// layer; this stays plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    fn warning(text: String) -> Self {
        Self {
            severity: Severity::Warning,
            text,
        }
    }

    fn success(text: &str) -> Self {
        Self {
            severity: Severity::Success,
            text: text.to_string(),
        }
    }
}

/// Render exactly two notices: detected names get a warning listing the
/// deduplicated values, an empty category gets a success line.
pub fn render(report: &EntityReport) -> Vec<Notice> {
    let mut notices = Vec::with_capacity(2);

    if report.names.is_empty() {
        notices.push(Notice::success("No names detected."));
    } else {
        notices.push(Notice::warning(format!(
            "Names detected: {}",
            join(&report.names)
        )));
    }

    if report.companies.is_empty() {
        notices.push(Notice::success("No company names detected."));
    } else {
        notices.push(Notice::warning(format!(
            "Company names detected: {}",
            join(&report.companies)
        )));
    }

    notices
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, EntityLabel, EntityReport};
    use pretty_assertions::assert_eq;

    fn entity(text: &str, label: EntityLabel) -> Entity {
        Entity::new(text.to_string(), label, 0, text.len(), 0.9)
    }

    #[test]
    fn test_empty_report_renders_two_success_notices() {
        let notices = render(&EntityReport::new());

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].severity, Severity::Success);
        assert_eq!(notices[0].text, "No names detected.");
        assert_eq!(notices[1].severity, Severity::Success);
        assert_eq!(notices[1].text, "No company names detected.");
    }

    #[test]
    fn test_detected_names_render_as_warning() {
        let report = EntityReport::from_entities(&[
            entity("Alice", EntityLabel::Person),
            entity("Alice", EntityLabel::Person),
            entity("Bob", EntityLabel::Person),
        ]);
        let notices = render(&report);

        assert_eq!(notices[0].severity, Severity::Warning);
        assert_eq!(notices[0].text, "Names detected: Alice, Bob");
        assert_eq!(notices[1].severity, Severity::Success);
    }

    #[test]
    fn test_detected_companies_render_as_warning() {
        let report =
            EntityReport::from_entities(&[entity("Acme Corp", EntityLabel::Organization)]);
        let notices = render(&report);

        assert_eq!(notices[0].severity, Severity::Success);
        assert_eq!(notices[1].severity, Severity::Warning);
        assert_eq!(notices[1].text, "Company names detected: Acme Corp");
    }

    #[test]
    fn test_both_categories_detected() {
        let report = EntityReport::from_entities(&[
            entity("John Smith", EntityLabel::Person),
            entity("Acme Corp", EntityLabel::Organization),
            entity("Initech", EntityLabel::Organization),
        ]);
        let notices = render(&report);

        assert_eq!(notices[0].text, "Names detected: John Smith");
        assert_eq!(notices[1].text, "Company names detected: Acme Corp, Initech");
    }
}
