//! Error types for `chronicle-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A query window whose start lies after its end.
  #[error("invalid time range: start {start} is after end {end}")]
  InvalidTimeRange { start: i64, end: i64 },

  #[error("invalid template: {0}")]
  InvalidTemplate(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Storage-layer integrity violation (e.g. a poisoned lock). Should
  /// not occur under the in-memory store's invariants.
  #[error("internal store fault: {0}")]
  Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
