//! JSON query façade for the Chronicle event log.
//!
//! Exposes an axum [`Router`] backed by any
//! [`chronicle_core::store::EventLog`]. Transport concerns (TLS,
//! tracing layers, lifecycle) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", chronicle_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chronicle_core::store::EventLog;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EventLog + 'static,
{
  Router::new()
    .route("/events", get(events::get_by_ids::<S>).post(events::insert::<S>))
    .route("/events/search", post(search::handler::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chronicle_store_mem::MemoryStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use crate::api_router;

  fn router() -> Router {
    api_router(Arc::new(MemoryStore::new()))
  }

  fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
  }

  fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn two_events() -> Value {
    json!([
      {
        "timestamp": 123,
        "interpretation": "stfu:OpenEvent",
        "manifestation": "stfu:UserActivity",
        "actor": "firefox",
        "subjects": [{ "uri": "file:///tmp/foo.txt" }]
      },
      {
        "timestamp": 133,
        "interpretation": "stfu:CloseEvent",
        "manifestation": "stfu:UserActivity",
        "actor": "gedit",
        "subjects": [{ "uri": "file:///tmp/bar.txt" }]
      }
    ])
  }

  #[tokio::test]
  async fn insert_returns_created_with_assigned_ids() {
    let app = router();

    let resp = app.oneshot(post_json("/events", two_events())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await, json!([1, 2]));
  }

  #[tokio::test]
  async fn get_by_ids_mirrors_input_with_null_markers() {
    let app = router();
    app
      .clone()
      .oneshot(post_json("/events", two_events()))
      .await
      .unwrap();

    let resp = app.oneshot(get_req("/events?ids=2,99,1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["actor"], "gedit");
    assert!(body[1].is_null());
    assert_eq!(body[2]["actor"], "firefox");
  }

  #[tokio::test]
  async fn malformed_id_list_is_rejected() {
    let resp = router()
      .oneshot(get_req("/events?ids=1,banana"))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn search_filters_by_template_and_range() {
    let app = router();
    app
      .clone()
      .oneshot(post_json("/events", two_events()))
      .await
      .unwrap();

    let resp = app
      .oneshot(post_json(
        "/events/search",
        json!({
          "templates": [{ "actor": "gedit" }],
          "time_range": { "start": 100, "end": 200 }
        }),
      ))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["timestamp"], 133);
  }

  #[tokio::test]
  async fn search_with_inverted_range_is_rejected() {
    let app = router();
    app
      .clone()
      .oneshot(post_json("/events", two_events()))
      .await
      .unwrap();

    let resp = app
      .oneshot(post_json(
        "/events/search",
        json!({ "time_range": { "start": 600, "end": 100 } }),
      ))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("invalid time range"));
  }

  #[tokio::test]
  async fn search_with_mistyped_template_is_rejected() {
    // `actor` must be a string; a number is the malformed-template
    // condition and is refused at the router boundary.
    let resp = router()
      .oneshot(post_json(
        "/events/search",
        json!({ "templates": [{ "actor": 42 }] }),
      ))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }
}
