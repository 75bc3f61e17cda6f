//! Event and Subject — the records held by the log.
//!
//! Records are built from loosely-typed JSON (the interchange shape
//! shared with the test fixtures). Construction never fails for a
//! missing string field: every recognised field defaults to `""` and
//! `subjects` defaults to an empty list, so template wildcard matching
//! behaves uniformly. Keys we do not recognise are carried through
//! opaquely and reproduced on serialisation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned event identifier. `0` means "not yet inserted".
///
/// Ids are unique within a store and strictly increasing in insertion
/// order — which is not necessarily timestamp order.
pub type EventId = u32;

// ─── Event ───────────────────────────────────────────────────────────────────

/// A timestamped record of a user or application action.
///
/// Immutable once stored, except for the id assigned at insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
  /// Assigned exactly once, by the store, at insertion.
  pub id:             EventId,
  /// Milliseconds-since-epoch-like value. Not unique; ties are legal
  /// and are broken by id when sorting query results.
  pub timestamp:      i64,
  /// Hierarchical category of what happened (e.g. `stfu:OpenEvent`).
  pub interpretation: String,
  /// Hierarchical category of how the event was registered.
  pub manifestation:  String,
  /// The application that originated the event. May be empty.
  pub actor:          String,
  pub origin:         String,
  /// The resources involved, in the order they were supplied.
  pub subjects:       Vec<Subject>,
  /// Unknown keys from the source record, passed through untouched.
  #[serde(flatten)]
  pub extra:          Map<String, Value>,
}

impl Event {
  /// Advisory completeness check: a complete event carries both
  /// category fields, an actor, and at least one subject with a uri.
  ///
  /// The store never enforces this — incomplete events are inserted
  /// and retrieved like any other. Callers that want to reject
  /// degenerate records do so before insertion.
  pub fn is_complete(&self) -> bool {
    !self.interpretation.is_empty()
      && !self.manifestation.is_empty()
      && !self.actor.is_empty()
      && self.subjects.iter().any(|s| !s.uri.is_empty())
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// A resource (file, URL, etc.) affected by or involved in an [`Event`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
  /// Identifier of the affected resource.
  pub uri:            String,
  /// For move events: the resource's identifier after the move.
  pub current_uri:    String,
  pub interpretation: String,
  pub manifestation:  String,
  /// Containing location (e.g. parent directory or host).
  pub origin:         String,
  /// For move events: the containing location after the move.
  pub current_origin: String,
  pub mimetype:       String,
  /// Human-readable snippet describing the resource.
  pub text:           String,
  /// Identifier of the storage medium holding the resource.
  pub storage:        String,
  /// Unknown keys from the source record, passed through untouched.
  #[serde(flatten)]
  pub extra:          Map<String, Value>,
}

impl Subject {
  /// A subject with a populated `current_uri` records a rename/move.
  pub fn is_move(&self) -> bool { !self.current_uri.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_fields_default_to_empty() {
    let event: Event = serde_json::from_str("{}").unwrap();
    assert_eq!(event.id, 0);
    assert_eq!(event.timestamp, 0);
    assert_eq!(event.interpretation, "");
    assert_eq!(event.actor, "");
    assert!(event.subjects.is_empty());
    assert!(event.extra.is_empty());
  }

  #[test]
  fn fixture_shaped_record_parses() {
    let event: Event = serde_json::from_str(
      r#"{
        "timestamp": 123,
        "interpretation": "stfu:OpenEvent",
        "manifestation": "stfu:UserActivity",
        "actor": "firefox",
        "subjects": [
          { "uri": "http://www.google.de",
            "interpretation": "stfu:Document",
            "manifestation": "stfu:File",
            "origin": "file:///tmp",
            "mimetype": "text/plain" }
        ]
      }"#,
    )
    .unwrap();

    assert_eq!(event.timestamp, 123);
    // Event-level origin was omitted: normalised to "".
    assert_eq!(event.origin, "");
    assert_eq!(event.subjects.len(), 1);
    assert_eq!(event.subjects[0].mimetype, "text/plain");
    // Subject text/storage omitted: normalised to "".
    assert_eq!(event.subjects[0].text, "");
    assert_eq!(event.subjects[0].storage, "");
  }

  #[test]
  fn unknown_keys_round_trip() {
    let event: Event = serde_json::from_str(
      r#"{ "timestamp": 5, "payload": {"nested": true}, "rating": 3 }"#,
    )
    .unwrap();
    assert_eq!(event.extra["rating"], 3);

    let back = serde_json::to_value(&event).unwrap();
    assert_eq!(back["payload"]["nested"], true);
    assert_eq!(back["rating"], 3);
  }

  #[test]
  fn completeness_is_advisory() {
    let complete: Event = serde_json::from_str(
      r#"{ "interpretation": "i", "manifestation": "m", "actor": "a",
           "subjects": [{ "uri": "file:///x" }] }"#,
    )
    .unwrap();
    assert!(complete.is_complete());

    let no_subjects: Event =
      serde_json::from_str(r#"{ "interpretation": "i", "manifestation": "m", "actor": "a" }"#)
        .unwrap();
    assert!(!no_subjects.is_complete());

    let empty_uri: Event = serde_json::from_str(
      r#"{ "interpretation": "i", "manifestation": "m", "actor": "a",
           "subjects": [{ "uri": "" }] }"#,
    )
    .unwrap();
    assert!(!empty_uri.is_complete());
  }

  #[test]
  fn move_subjects_are_detected() {
    let subject: Subject = serde_json::from_str(
      r#"{ "uri": "file:///tmp/foo.txt", "current_uri": "file:///home/foo.txt" }"#,
    )
    .unwrap();
    assert!(subject.is_move());
    assert!(!Subject::default().is_move());
  }
}
