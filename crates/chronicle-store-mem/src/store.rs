//! [`MemoryStore`] — the in-memory implementation of [`EventLog`].

use std::{
  collections::BTreeMap,
  sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chronicle_core::{
  Error, Result,
  event::{Event, EventId},
  store::{EventLog, EventQuery, SortOrder},
  template::Template,
};

#[derive(Debug, Default)]
struct Inner {
  /// Keyed by assigned id; iteration order is therefore insertion
  /// order.
  events:  BTreeMap<EventId, Event>,
  last_id: EventId,
}

/// An append-only event log held entirely in memory.
///
/// Cloning is cheap — clones share the same backing storage. Inserts
/// serialise on the write lock, so id assignment and append are one
/// indivisible step; queries share the read lock, observe a consistent
/// snapshot, and run concurrently with each other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
    self
      .inner
      .read()
      .map_err(|_| Error::Internal("event store lock poisoned".into()))
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
    self
      .inner
      .write()
      .map_err(|_| Error::Internal("event store lock poisoned".into()))
  }

  fn append(inner: &mut Inner, mut event: Event) -> EventId {
    inner.last_id += 1;
    event.id = inner.last_id;
    inner.events.insert(event.id, event);
    inner.last_id
  }
}

impl EventLog for MemoryStore {
  type Error = Error;

  async fn insert(&self, event: Event) -> Result<EventId> {
    let mut inner = self.write()?;
    Ok(Self::append(&mut inner, event))
  }

  async fn insert_many(&self, events: Vec<Event>) -> Result<Vec<EventId>> {
    let mut inner = self.write()?;
    Ok(
      events
        .into_iter()
        .map(|event| Self::append(&mut inner, event))
        .collect(),
    )
  }

  async fn get_by_ids(&self, ids: &[EventId]) -> Result<Vec<Option<Event>>> {
    let inner = self.read()?;
    Ok(ids.iter().map(|id| inner.events.get(id).cloned()).collect())
  }

  async fn find(&self, query: &EventQuery) -> Result<Vec<Event>> {
    // Validate before touching the store: a malformed window must not
    // yield partial results.
    if let Some(range) = &query.time_range {
      range.validate()?;
    }

    let mut hits: Vec<Event> = {
      let inner = self.read()?;
      inner
        .events
        .values()
        .filter(|e| query.time_range.is_none_or(|r| r.contains(e.timestamp)))
        .filter(|e| Template::matches_any(&query.templates, e))
        .cloned()
        .collect()
    };

    match query.order {
      SortOrder::Ascending => {
        hits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
      }
      SortOrder::Descending => {
        hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(a.id.cmp(&b.id)));
      }
    }

    if let Some(limit) = query.limit {
      hits.truncate(limit);
    }
    Ok(hits)
  }

  async fn count(&self) -> Result<usize> {
    Ok(self.read()?.events.len())
  }
}
