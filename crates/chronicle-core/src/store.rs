//! The `EventLog` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `chronicle-store-mem`). Higher layers (`chronicle-api`,
//! `chronicle-server`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  event::{Event, EventId},
  template::Template,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` window over event timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
  pub start: i64,
  pub end:   i64,
}

impl TimeRange {
  /// Construct a validated range; `start > end` is refused.
  pub fn new(start: i64, end: i64) -> Result<Self> {
    let range = Self { start, end };
    range.validate()?;
    Ok(range)
  }

  /// The window covering every representable timestamp.
  pub fn always() -> Self {
    Self { start: i64::MIN, end: i64::MAX }
  }

  /// Deserialised ranges arrive unchecked; callers validate before
  /// any query work starts, so a malformed range never yields partial
  /// results.
  pub fn validate(&self) -> Result<()> {
    if self.start > self.end {
      return Err(Error::InvalidTimeRange { start: self.start, end: self.end });
    }
    Ok(())
  }

  pub fn contains(&self, timestamp: i64) -> bool {
    self.start <= timestamp && timestamp <= self.end
  }
}

/// Result ordering for [`EventLog::find`].
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  /// Oldest first. Timestamp ties resolve by ascending id.
  #[default]
  Ascending,
  /// Newest first. Timestamp ties still resolve by ascending id.
  Descending,
}

/// Parameters for [`EventLog::find`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventQuery {
  /// Disjunction of templates; empty means "match everything".
  pub templates:  Vec<Template>,
  /// Inclusive window; `None` means all of time.
  pub time_range: Option<TimeRange>,
  /// Truncate the sorted result to this many events. Single-shot; no
  /// pagination token.
  pub limit:      Option<usize>,
  pub order:      SortOrder,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Chronicle event-log backend.
///
/// The log is append-only: events are never mutated or deleted by the
/// store itself. Insertion is the only write, and it always succeeds
/// for any record the model can construct — missing fields have
/// already been defaulted at the model boundary.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Dropping a
/// returned future cancels the query without affecting store state.
pub trait EventLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one event; the store assigns the next id and returns it.
  fn insert(
    &self,
    event: Event,
  ) -> impl Future<Output = Result<EventId, Self::Error>> + Send + '_;

  /// Append a batch, assigning ids in input order.
  fn insert_many(
    &self,
    events: Vec<Event>,
  ) -> impl Future<Output = Result<Vec<EventId>, Self::Error>> + Send + '_;

  /// Look up events by id. The result positionally mirrors `ids`,
  /// duplicates included; a miss is `None`, never an error.
  fn get_by_ids<'a>(
    &'a self,
    ids: &'a [EventId],
  ) -> impl Future<Output = Result<Vec<Option<Event>>, Self::Error>> + Send + 'a;

  /// Return all events inside the query window that match at least one
  /// template, sorted by timestamp per [`EventQuery::order`] with ties
  /// broken by ascending id, truncated to [`EventQuery::limit`].
  ///
  /// Fails with the invalid-argument condition if the window is
  /// malformed (`start > end`); no partial results are returned.
  fn find<'a>(
    &'a self,
    query: &'a EventQuery,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  /// Number of events currently stored.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn time_range_rejects_inverted_bounds() {
    assert!(TimeRange::new(100, 600).is_ok());
    assert!(matches!(
      TimeRange::new(600, 100),
      Err(Error::InvalidTimeRange { start: 600, end: 100 })
    ));
  }

  #[test]
  fn time_range_bounds_are_inclusive() {
    let range = TimeRange::new(100, 200).unwrap();
    assert!(range.contains(100));
    assert!(range.contains(200));
    assert!(!range.contains(99));
    assert!(!range.contains(201));
  }

  #[test]
  fn always_covers_everything() {
    let range = TimeRange::always();
    assert!(range.contains(i64::MIN));
    assert!(range.contains(0));
    assert!(range.contains(i64::MAX));
  }

  #[test]
  fn query_deserialises_with_defaults() {
    let query: EventQuery = serde_json::from_str("{}").unwrap();
    assert!(query.templates.is_empty());
    assert!(query.time_range.is_none());
    assert!(query.limit.is_none());
    assert_eq!(query.order, SortOrder::Ascending);

    let query: EventQuery =
      serde_json::from_str(r#"{ "order": "descending", "limit": 3 }"#).unwrap();
    assert_eq!(query.order, SortOrder::Descending);
    assert_eq!(query.limit, Some(3));
  }
}
