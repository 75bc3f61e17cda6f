//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events?ids=1,2,3` | Result mirrors the id list; misses are `null` |
//! | `POST` | `/events` | Body: JSON array in the interchange shape |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chronicle_core::{
  event::{Event, EventId},
  store::EventLog,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Insert ───────────────────────────────────────────────────────────────────

/// `POST /events` — body: `[{"timestamp": ..., "subjects": [...]}, ...]`
///
/// Insertion never fails for well-formed JSON: missing string fields
/// have already been defaulted during deserialisation.
pub async fn insert<S>(
  State(store): State<Arc<S>>,
  Json(events): Json<Vec<Event>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventLog,
{
  let ids = store
    .insert_many(events)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(ids)))
}

// ─── Get by ids ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GetParams {
  /// Comma-separated id list, e.g. `ids=1,2,3`. Duplicates are kept.
  pub ids: String,
}

/// `GET /events?ids=<id,...>`
pub async fn get_by_ids<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<GetParams>,
) -> Result<Json<Vec<Option<Event>>>, ApiError>
where
  S: EventLog,
{
  let ids = params
    .ids
    .split(',')
    .map(|s| s.trim().parse::<EventId>())
    .collect::<Result<Vec<_>, _>>()
    .map_err(|e| ApiError::BadRequest(format!("malformed id list: {e}")))?;

  let events = store
    .get_by_ids(&ids)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(events))
}
