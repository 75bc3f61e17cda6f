//! Handler for `POST /events/search`.
//!
//! The body is an [`EventQuery`]: a disjunction of templates, an
//! optional inclusive time range, a limit, and a sort order. Template
//! fields of the wrong JSON type are rejected by deserialisation at
//! the router boundary; the time range is validated here, before any
//! store work, so a malformed query never returns partial results.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use chronicle_core::{
  event::Event,
  store::{EventLog, EventQuery},
};

use crate::error::ApiError;

/// `POST /events/search` — body: an [`EventQuery`] in JSON.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Json(query): Json<EventQuery>,
) -> Result<Json<Vec<Event>>, ApiError>
where
  S: EventLog,
{
  if let Some(range) = &query.time_range {
    range
      .validate()
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  }

  let events = store
    .find(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(events))
}
