//! Event templates and the matching rules.
//!
//! A template is an event-shaped pattern in which an empty field means
//! "match anything". Non-empty fields match their own value plus
//! everything below it in the category hierarchy, so a query for
//! `stfu:File` also covers `stfu:File:Extra` but not a sibling
//! category. Matching is case-sensitive; there is no globbing beyond
//! the hierarchical-prefix rule.

use serde::{Deserialize, Serialize};

use crate::event::{Event, Subject};

/// Characters that delimit category segments. Covers short symbolic
/// forms (`stfu:File`), path-shaped uris, and ontology fragment uris
/// (`...zg#MoveEvent`).
const HIERARCHY_DELIMITERS: &[char] = &[':', '/', '#'];

/// Scalar field rule: an empty pattern is a wildcard; otherwise the
/// stored value must equal the pattern or extend it past a delimiter.
fn field_matches(pattern: &str, value: &str) -> bool {
  if pattern.is_empty() {
    return true;
  }
  match value.strip_prefix(pattern) {
    Some(rest) => rest.is_empty() || rest.starts_with(HIERARCHY_DELIMITERS),
    None => false,
  }
}

// ─── Subject templates ───────────────────────────────────────────────────────

/// A pattern over a single [`Subject`]. Every field follows the scalar
/// wildcard/hierarchy rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectTemplate {
  pub uri:            String,
  pub current_uri:    String,
  pub interpretation: String,
  pub manifestation:  String,
  pub origin:         String,
  pub current_origin: String,
  pub mimetype:       String,
  pub text:           String,
  pub storage:        String,
}

impl SubjectTemplate {
  pub fn matches(&self, subject: &Subject) -> bool {
    field_matches(&self.uri, &subject.uri)
      && field_matches(&self.current_uri, &subject.current_uri)
      && field_matches(&self.interpretation, &subject.interpretation)
      && field_matches(&self.manifestation, &subject.manifestation)
      && field_matches(&self.origin, &subject.origin)
      && field_matches(&self.current_origin, &subject.current_origin)
      && field_matches(&self.mimetype, &subject.mimetype)
      && field_matches(&self.text, &subject.text)
      && field_matches(&self.storage, &subject.storage)
  }
}

// ─── Event templates ─────────────────────────────────────────────────────────

/// A pattern over a whole [`Event`].
///
/// Subject matching is existential, not positional: for each subject
/// template supplied, at least one stored subject must satisfy it. An
/// empty subject-template list matches unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
  pub interpretation: String,
  pub manifestation:  String,
  pub actor:          String,
  pub origin:         String,
  pub subjects:       Vec<SubjectTemplate>,
}

impl Template {
  pub fn matches(&self, event: &Event) -> bool {
    field_matches(&self.interpretation, &event.interpretation)
      && field_matches(&self.manifestation, &event.manifestation)
      && field_matches(&self.actor, &event.actor)
      && field_matches(&self.origin, &event.origin)
      && self
        .subjects
        .iter()
        .all(|st| event.subjects.iter().any(|s| st.matches(s)))
  }

  /// Disjunction over a template set. The empty set matches everything.
  pub fn matches_any(templates: &[Template], event: &Event) -> bool {
    templates.is_empty() || templates.iter().any(|t| t.matches(event))
  }
}
