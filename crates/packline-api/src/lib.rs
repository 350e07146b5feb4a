//! JSON HTTP API for Packline.
//!
//! Exposes an axum [`Router`] backed by a [`RecordService`] over any
//! [`packline_core::store::RecordStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", packline_api::api_router(service.clone()))
//! ```

pub mod envelope;
pub mod error;
pub mod packing;
pub mod pic;
pub mod reports;

use axum::{
  Router,
  routing::{delete, get, post},
};
use packline_core::{RecordService, store::RecordStore};
use tower_http::trace::TraceLayer;

pub use envelope::Envelope;
pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: RecordService<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Packing runs
    .route("/packing", post(packing::create::<S>))
    // Operators
    .route("/pic", get(pic::list::<S>).post(pic::create::<S>))
    .route("/pic/{id}", delete(pic::delete_one::<S>))
    // Reports
    .route("/reports", get(reports::list::<S>).put(reports::update_bulk::<S>))
    .route(
      "/reports/{id}",
      get(reports::get_one::<S>)
        .put(reports::update_one::<S>)
        .delete(reports::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use packline_core::{
    operator::Operator,
    packing::{PackingFields, PackingRecord},
  };
  use packline_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  /// Store whose every call fails with an error clients must never see.
  struct BrokenStore;

  #[derive(Debug, thiserror::Error)]
  #[error("disk I/O exploded at /var/lib/packline.db")]
  struct DiskFailure;

  impl RecordStore for BrokenStore {
    type Error = DiskFailure;

    async fn add_operator(&self, _name: String) -> Result<Operator, DiskFailure> {
      Err(DiskFailure)
    }

    async fn list_operators(&self) -> Result<Vec<Operator>, DiskFailure> {
      Err(DiskFailure)
    }

    async fn delete_operator(&self, _id: Uuid) -> Result<bool, DiskFailure> {
      Err(DiskFailure)
    }

    async fn add_packing_record(
      &self,
      _fields: PackingFields,
    ) -> Result<PackingRecord, DiskFailure> {
      Err(DiskFailure)
    }

    async fn list_packing_records(&self) -> Result<Vec<PackingRecord>, DiskFailure> {
      Err(DiskFailure)
    }

    async fn get_packing_record(&self, _id: Uuid) -> Result<Option<PackingRecord>, DiskFailure> {
      Err(DiskFailure)
    }

    async fn replace_packing_record(
      &self,
      _id:     Uuid,
      _fields: PackingFields,
    ) -> Result<Option<PackingRecord>, DiskFailure> {
      Err(DiskFailure)
    }

    async fn delete_packing_record(&self, _id: Uuid) -> Result<bool, DiskFailure> {
      Err(DiskFailure)
    }
  }

  async fn make_service() -> RecordService<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    RecordService::new(Arc::new(store))
  }

  async fn oneshot<S: RecordStore + 'static>(
    service: RecordService<S>,
    method:  &str,
    uri:     &str,
    body:    Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp  = api_router(service).oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn alice_run() -> Value {
    json!({
      "datetime": "2024-01-01T00:00:00Z",
      "pic":      "Alice",
      "weight":   12.5,
      "qtyA":     10,
      "qtyB":     5,
      "qtyC":     0,
      "reject":   0.2,
    })
  }

  fn bob_run() -> Value {
    json!({
      "datetime": "2024-02-02T06:15:00Z",
      "pic":      "Bob",
      "weight":   "3.5",
      "qtyA":     "1",
      "qtyB":     "2",
      "qtyC":     "3",
      "reject":   "0.25",
    })
  }

  async fn create_alice_run(service: &RecordService<SqliteStore>) -> String {
    let (status, body) = oneshot(service.clone(), "POST", "/packing", Some(alice_run())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_owned()
  }

  // ── Packing scenario ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn packing_create_get_delete_scenario() {
    let service = make_service().await;

    let (status, created) =
      oneshot(service.clone(), "POST", "/packing", Some(alice_run())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    let data = &created["data"];
    let id   = data["id"].as_str().unwrap().to_owned();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(data["datetime"], json!("2024-01-01T00:00:00Z"));
    assert_eq!(data["pic"], json!("Alice"));
    assert_eq!(data["weight"], json!(12.5));
    assert_eq!(data["qtyA"], json!(10));
    assert_eq!(data["qtyB"], json!(5));
    assert_eq!(data["qtyC"], json!(0));
    assert_eq!(data["reject"], json!(0.2));

    let (status, fetched) =
      oneshot(service.clone(), "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched, data, "GET /reports/:id returns the bare record");

    let (status, deleted) =
      oneshot(service.clone(), "DELETE", &format!("/reports/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "success": true }));

    let (status, body) = oneshot(service, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn packing_rejects_non_numeric_weight() {
    let service = make_service().await;
    let mut body = alice_run();
    body["weight"] = json!("abc");

    let (status, resp) = oneshot(service.clone(), "POST", "/packing", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["success"], json!(false));

    let (_, list) = oneshot(service, "GET", "/reports", None).await;
    assert_eq!(list["data"], json!([]));
  }

  #[tokio::test]
  async fn packing_rejects_malformed_json() {
    let service = make_service().await;
    let req = Request::builder()
      .method("POST")
      .uri("/packing")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = api_router(service).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Reports ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reports_list_is_enveloped() {
    let service = make_service().await;
    let first  = create_alice_run(&service).await;
    let second = create_alice_run(&service).await;

    let (status, body) = oneshot(service, "GET", "/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let ids: Vec<&str> = body["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["id"].as_str().unwrap())
      .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
  }

  #[tokio::test]
  async fn update_by_id_replaces_all_fields_and_returns_bare_record() {
    let service = make_service().await;
    let id = create_alice_run(&service).await;

    let (status, updated) =
      oneshot(service.clone(), "PUT", &format!("/reports/{id}"), Some(bob_run())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      updated,
      json!({
        "id":       id,
        "datetime": "2024-02-02T06:15:00Z",
        "pic":      "Bob",
        "weight":   3.5,
        "qtyA":     1,
        "qtyB":     2,
        "qtyC":     3,
        "reject":   0.25,
      }),
    );

    let (_, fetched) = oneshot(service, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(fetched, updated);
  }

  #[tokio::test]
  async fn update_by_id_with_missing_field_is_400_and_changes_nothing() {
    let service = make_service().await;
    let id = create_alice_run(&service).await;
    let (_, before) = oneshot(service.clone(), "GET", &format!("/reports/{id}"), None).await;

    let mut partial = bob_run();
    partial.as_object_mut().unwrap().remove("qtyC");

    let (status, body) =
      oneshot(service.clone(), "PUT", &format!("/reports/{id}"), Some(partial)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required fields: qtyC."));

    let (_, after) = oneshot(service, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(after, before);
  }

  #[tokio::test]
  async fn unknown_report_id_is_404() {
    let service = make_service().await;
    let unknown = Uuid::new_v4();

    let (status, _) =
      oneshot(service.clone(), "PUT", &format!("/reports/{unknown}"), Some(bob_run())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
      oneshot(service.clone(), "DELETE", &format!("/reports/{unknown}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = oneshot(service, "GET", "/reports/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn blank_report_id_is_400() {
    let service = make_service().await;
    let (status, body) = oneshot(service, "GET", "/reports/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Report ID is required."));
  }

  #[tokio::test]
  async fn bulk_update_is_enveloped() {
    let service = make_service().await;
    let id = create_alice_run(&service).await;

    let mut body = bob_run();
    body["id"] = json!(id);
    let (status, resp) = oneshot(service.clone(), "PUT", "/reports", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], json!(true));
    assert_eq!(resp["data"]["pic"], json!("Bob"));
    assert_eq!(resp["data"]["id"], json!(id));
  }

  #[tokio::test]
  async fn bulk_update_failures_are_flag_only() {
    let service = make_service().await;

    // Unknown id.
    let mut body = bob_run();
    body["id"] = json!(Uuid::new_v4().to_string());
    let (status, resp) = oneshot(service.clone(), "PUT", "/reports", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], json!(false));
    assert!(resp["error"].is_string());
    assert!(resp.get("data").is_none());

    // Missing id.
    let (status, resp) = oneshot(service.clone(), "PUT", "/reports", Some(bob_run())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["success"], json!(false));
    assert_eq!(resp["error"], json!("Report ID is required."));

    // Not JSON at all.
    let req = Request::builder()
      .method("PUT")
      .uri("/reports")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("[1, 2"))
      .unwrap();
    let resp = api_router(service).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── Operators ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn operator_scenario() {
    let service = make_service().await;

    let (status, created) =
      oneshot(service.clone(), "POST", "/pic", Some(json!({ "name": "Bob" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["data"]["name"], json!("Bob"));
    let id = created["data"]["id"].as_str().unwrap().to_owned();

    let (status, list) = oneshot(service.clone(), "GET", "/pic", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!({ "success": true, "data": [{ "id": id, "name": "Bob" }] }));

    let bad_id = Uuid::new_v4();
    let (status, body) =
      oneshot(service.clone(), "DELETE", &format!("/pic/{bad_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Operator not found." }));

    let (status, body) = oneshot(service.clone(), "DELETE", &format!("/pic/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, list) = oneshot(service, "GET", "/pic", None).await;
    assert_eq!(list["data"], json!([]));
  }

  #[tokio::test]
  async fn operator_without_name_is_400() {
    let service = make_service().await;
    let (status, body) = oneshot(service, "POST", "/pic", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
  }

  // ── Input bounds ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn far_future_datetime_is_400_and_list_still_works() {
    let service = make_service().await;
    let id = create_alice_run(&service).await;

    for datetime in [json!(253_402_300_800_000i64), json!("+10000-01-01T00:00:00Z")] {
      let mut run = alice_run();
      run["datetime"] = datetime;
      let (status, body) = oneshot(service.clone(), "POST", "/packing", Some(run.clone())).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
      assert_eq!(body["success"], json!(false));

      let (status, _) =
        oneshot(service.clone(), "PUT", &format!("/reports/{id}"), Some(run)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, list) = oneshot(service.clone(), "GET", "/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, record) = oneshot(service, "GET", &format!("/reports/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["datetime"], json!("2024-01-01T00:00:00Z"));
  }

  // ── Storage failures ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn storage_failure_is_generic_500() {
    let service = RecordService::new(Arc::new(BrokenStore));
    let id = Uuid::new_v4();

    let cases = [
      ("GET", "/reports".to_owned(), None, "Failed to list reports."),
      ("GET", format!("/reports/{id}"), None, "Failed to fetch report."),
      ("PUT", format!("/reports/{id}"), Some(alice_run()), "Failed to update report."),
      ("DELETE", format!("/reports/{id}"), None, "Failed to delete report."),
      ("POST", "/packing".to_owned(), Some(alice_run()), "Failed to create packing record."),
      ("GET", "/pic".to_owned(), None, "Failed to list operators."),
      ("POST", "/pic".to_owned(), Some(json!({ "name": "Bob" })), "Failed to create operator."),
      ("DELETE", format!("/pic/{id}"), None, "Failed to delete operator."),
    ];

    for (method, uri, body, message) in cases {
      let (status, resp) = oneshot(service.clone(), method, &uri, body).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(resp, json!({ "success": false, "error": message }), "{method} {uri}");
      assert!(!resp.to_string().contains("disk I/O"), "{method} {uri} leaked {resp}");
    }
  }

  #[tokio::test]
  async fn bulk_update_storage_failure_stays_200() {
    let service = RecordService::new(Arc::new(BrokenStore));
    let mut body = alice_run();
    body["id"] = json!(Uuid::new_v4().to_string());

    let (status, resp) = oneshot(service, "PUT", "/reports", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "success": false, "error": "Failed to update report." }));
  }

  #[tokio::test]
  async fn bad_input_is_rejected_before_storage() {
    let service = RecordService::new(Arc::new(BrokenStore));
    let (status, resp) =
      oneshot(service, "POST", "/pic", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["success"], json!(false));
  }
}
