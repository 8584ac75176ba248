//! Comprehensive integration tests for the evaluation engine.
//!
//! This test suite covers:
//! - The full workflow happy path (self → manager → final)
//! - Role and access failures
//! - Rejection and resubmission
//! - Score aggregation totals on the wire
//! - Evidence journal and prefill
//! - Catalog CRUD and CSV import/export
//! - Error cases (malformed JSON, invalid transitions, unknown ids)

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use evaluation_engine::api::{AppState, create_router};
use evaluation_engine::config::CatalogLoader;
use evaluation_engine::store::Store;

// =============================================================================
// Test Helpers
// =============================================================================

const ADMIN: &str = "emp_hr";
const MANAGER: &str = "emp_mgr";
const SUBJECT: &str = "emp_001";
const PEER: &str = "emp_002";

fn create_test_router() -> Router {
    let loader = CatalogLoader::load("./config/hr").expect("Failed to load config");
    create_router(AppState::new(Store::from_catalog(&loader)))
}

/// Asserts a JSON string field holds the expected decimal value,
/// ignoring trailing zeros.
fn assert_decimal_eq(value: &Value, expected: &str) {
    let actual = Decimal::from_str(value.as_str().expect("expected a decimal string")).unwrap();
    assert_eq!(actual, Decimal::from_str(expected).unwrap());
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-actor-id", actor);
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    actor: &str,
    content_type: &str,
    body: String,
) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-actor-id", actor)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Every line item of the software_engineer template rated uniformly.
fn engineer_ratings(rating: &str) -> Value {
    json!({
        "ratings": [
            { "section": "kpis", "item_id": "delivery_throughput", "rating": rating },
            { "section": "kpis", "item_id": "defect_rate", "rating": rating },
            { "section": "competencies", "item_id": "communication", "rating": rating },
            { "section": "competencies", "item_id": "technical_depth", "rating": rating },
            { "section": "responsibilities", "item_id": "code_review", "rating": rating },
            { "section": "responsibilities", "item_id": "on_call", "rating": rating },
            { "section": "values", "item_id": "customer_first", "rating": rating }
        ],
        "overall_comment": "uniform test ratings"
    })
}

/// Starts a cycle for SUBJECT in 2026_h1 and returns its id.
async fn start_cycle(router: &Router) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/cycles",
        Some(SUBJECT),
        Some(json!({ "employee_id": SUBJECT, "period_id": "2026_h1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "start_cycle failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

/// Walks a cycle to manager_submitted with the given uniform ratings.
async fn walk_to_manager_submitted(
    router: &Router,
    cycle_id: &str,
    self_rating: &str,
    manager_rating: &str,
) {
    let (status, _) = send(
        router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(engineer_ratings(self_rating)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router,
        "POST",
        &format!("/api/cycles/{cycle_id}/review/begin"),
        Some(MANAGER),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/review"),
        Some(MANAGER),
        Some(engineer_ratings(manager_rating)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router,
        "POST",
        &format!("/api/cycles/{cycle_id}/review/submit"),
        Some(MANAGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Workflow
// =============================================================================

#[tokio::test]
async fn test_full_workflow_happy_path() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    walk_to_manager_submitted(&router, &cycle_id, "4", "3").await;

    let (status, cycle) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cycle["workflow_state"], "manager_submitted");

    let (status, summary) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/deliver"),
        Some(MANAGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // self 4, manager 3: final = 4 * 0.30 + 3 * 0.70 = 3.3
    assert_decimal_eq(&summary["totals"]["self_overall"], "4");
    assert_decimal_eq(&summary["totals"]["manager_overall"], "3");
    assert_decimal_eq(&summary["totals"]["final_score"], "3.3");
    assert_eq!(summary["employee_id"], SUBJECT);
    assert!(!summary["trace"]["steps"].as_array().unwrap().is_empty());

    let (status, cycle) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cycle["workflow_state"], "final_delivered");

    // the delivered summary is served back unchanged
    let (status, stored) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}/summary"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["summary_id"], summary["summary_id"]);
}

#[tokio::test]
async fn test_workflow_states_walk_in_order() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (_, cycle) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(cycle["workflow_state"], "pending_self");

    walk_to_manager_submitted(&router, &cycle_id, "4", "4").await;
    send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/deliver"),
        Some(MANAGER),
        None,
    )
    .await;

    let (_, cycle) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}"),
        Some(SUBJECT),
        None,
    )
    .await;
    let walked: Vec<&str> = cycle["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["new_state"].as_str().unwrap())
        .collect();
    assert_eq!(
        walked,
        vec![
            "self_submitted",
            "pending_manager",
            "manager_submitted",
            "final_delivered"
        ]
    );
}

#[tokio::test]
async fn test_incomplete_self_submit_is_rejected() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_RATING");
}

#[tokio::test]
async fn test_deliver_before_review_is_conflict() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/deliver"),
        Some(MANAGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("pending_self")
    );
}

#[tokio::test]
async fn test_summary_before_manager_submit_is_conflict() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}/summary"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_reject_reopens_self_evaluation() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(engineer_ratings("5")),
    )
    .await;
    send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;

    let (status, cycle) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/review/reject"),
        Some(MANAGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cycle["workflow_state"], "pending_self");

    let (_, evaluation) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(evaluation["status"], "rejected");

    // the subject revises and resubmits
    let (status, _) = send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(engineer_ratings("4")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, cycle) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cycle["workflow_state"], "self_submitted");
}

#[tokio::test]
async fn test_duplicate_cycle_for_period_is_conflict() {
    let router = create_test_router();
    start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "POST",
        "/api/cycles",
        Some(SUBJECT),
        Some(json!({ "employee_id": SUBJECT, "period_id": "2026_h1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_ID");
}

#[tokio::test]
async fn test_out_of_scale_rating_is_rejected() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(json!({
            "ratings": [
                { "section": "kpis", "item_id": "delivery_throughput", "rating": "6" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RATING");
}

#[tokio::test]
async fn test_rating_unknown_item_is_rejected() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(json!({
            "ratings": [
                { "section": "kpis", "item_id": "not_a_kpi", "rating": "3" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Access control
// =============================================================================

#[tokio::test]
async fn test_peer_cannot_read_cycle() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}"),
        Some(PEER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_manager_cannot_edit_self_evaluation() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    let (status, error) = send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(MANAGER),
        Some(engineer_ratings("5")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_subject_cannot_submit_manager_review() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(engineer_ratings("4")),
    )
    .await;
    send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;

    let (status, error) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/review/begin"),
        Some(SUBJECT),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_staff_cannot_write_catalogs() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        "/api/kpis",
        Some(SUBJECT),
        Some(json!({
            "id": "sneaky_kpi",
            "name": "Sneaky",
            "description": "Should not land"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_cycle_listing_is_scoped_to_actor() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    // the subject sees their own cycle
    let (_, visible) = send(&router, "GET", "/api/cycles", Some(SUBJECT), None).await;
    assert_eq!(visible.as_array().unwrap().len(), 1);
    assert_eq!(visible[0]["id"].as_str().unwrap(), cycle_id);

    // an unrelated peer sees nothing
    let (_, visible) = send(&router, "GET", "/api/cycles", Some(PEER), None).await;
    assert!(visible.as_array().unwrap().is_empty());

    // the admin sees everything
    let (_, visible) = send(&router, "GET", "/api/cycles", Some(ADMIN), None).await;
    assert_eq!(visible.as_array().unwrap().len(), 1);
}

// =============================================================================
// Evidence journal and prefill
// =============================================================================

#[tokio::test]
async fn test_evidence_prefill_populates_manager_review() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;

    // the manager journals two observations inside the period
    for (stars, date) in [(4, "2026-02-10"), (5, "2026-03-01")] {
        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/employees/{SUBJECT}/evidence"),
            Some(MANAGER),
            Some(json!({
                "section": "competencies",
                "item_id": "communication",
                "stars": stars,
                "note": "observed in sprint review",
                "recorded_on": date
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    send(
        &router,
        "PUT",
        &format!("/api/cycles/{cycle_id}/self"),
        Some(SUBJECT),
        Some(engineer_ratings("4")),
    )
    .await;
    send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/self/submit"),
        Some(SUBJECT),
        None,
    )
    .await;

    // prefill suggestions are visible to the manager
    let (status, prefill) = send(
        &router,
        "GET",
        &format!("/api/cycles/{cycle_id}/prefill"),
        Some(MANAGER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = prefill["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["item_id"], "communication");
    assert_decimal_eq(&suggestions[0]["suggested_rating"], "4.5");
    assert_eq!(suggestions[0]["evidence_count"], 2);

    // beginning the review with prefill carries the suggestion over
    let (status, review) = send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/review/begin"),
        Some(MANAGER),
        Some(json!({ "prefill": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let ratings = review["ratings"].as_array().unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["item_id"], "communication");
    assert_decimal_eq(&ratings[0]["rating"], "4.5");
    assert!(
        ratings[0]["comment"]
            .as_str()
            .unwrap()
            .contains("2 evidence entries")
    );
}

#[tokio::test]
async fn test_evidence_requires_manager() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        &format!("/api/employees/{SUBJECT}/evidence"),
        Some(PEER),
        Some(json!({
            "section": "competencies",
            "item_id": "communication",
            "stars": 5,
            "note": "peers cannot journal",
            "recorded_on": "2026-02-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_evidence_for_unknown_item_is_rejected() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        &format!("/api/employees/{SUBJECT}/evidence"),
        Some(MANAGER),
        Some(json!({
            "section": "kpis",
            "item_id": "quota_attainment",
            "stars": 4,
            "note": "not on the engineer template",
            "recorded_on": "2026-02-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Catalogs and CSV
// =============================================================================

#[tokio::test]
async fn test_admin_catalog_crud_round_trip() {
    let router = create_test_router();

    let (status, created) = send(
        &router,
        "POST",
        "/api/competencies",
        Some(ADMIN),
        Some(json!({
            "id": "prioritization",
            "name": "Prioritization",
            "description": "Works on the right things first",
            "category_id": "core"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "prioritization");

    let (status, fetched) = send(
        &router,
        "GET",
        "/api/competencies/prioritization",
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Prioritization");

    let (status, _) = send(
        &router,
        "DELETE",
        "/api/competencies/prioritization",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &router,
        "GET",
        "/api/competencies/prioritization",
        Some(SUBJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_catalog_id_is_conflict() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        "/api/values",
        Some(ADMIN),
        Some(json!({
            "id": "customer_first",
            "name": "Customer First Again",
            "description": "duplicate"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "DUPLICATE_ID");
}

#[tokio::test]
async fn test_delete_referenced_kpi_is_conflict() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "DELETE",
        "/api/kpis/delivery_throughput",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "ITEM_IN_USE");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("software_engineer")
    );
}

#[tokio::test]
async fn test_kpi_csv_export_and_import_round_trip() {
    let router = create_test_router();

    let (status, exported) = send_raw(
        &router,
        "GET",
        "/api/kpis/export",
        SUBJECT,
        "text/plain",
        String::new(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(exported.starts_with("id,name,description,unit,target"));
    assert!(exported.contains("delivery_throughput"));

    // re-import the export plus one new row
    let with_new_row = format!("{exported}retention,Retention,Regrettable attrition,%,95\n");
    let (status, body) = send_raw(
        &router,
        "POST",
        "/api/kpis/import",
        ADMIN,
        "text/csv",
        with_new_row,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["inserted"], 1);
    assert_eq!(summary["updated"], 3);

    let (status, kpi) = send(&router, "GET", "/api/kpis/retention", Some(SUBJECT), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&kpi["target"], "95");
}

#[tokio::test]
async fn test_csv_import_requires_admin() {
    let router = create_test_router();

    let (status, body) = send_raw(
        &router,
        "POST",
        "/api/values/import",
        SUBJECT,
        "text/csv",
        "id,name,description\nnew_value,New,desc\n".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("ACCESS_DENIED"));
}

#[tokio::test]
async fn test_malformed_csv_import_is_rejected() {
    let router = create_test_router();

    let (status, body) = send_raw(
        &router,
        "POST",
        "/api/kpis/import",
        ADMIN,
        "text/csv",
        "id,name,description,unit,target\nbroken,row\n".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("CSV_ERROR"));
}

// =============================================================================
// Request parsing
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_test_router();

    let (status, body) = send_raw(
        &router,
        "POST",
        "/api/cycles",
        SUBJECT,
        "application/json",
        "{invalid json".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        "/api/cycles",
        Some(SUBJECT),
        Some(json!({ "employee_id": SUBJECT })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_period_returns_404() {
    let router = create_test_router();

    let (status, error) = send(
        &router,
        "POST",
        "/api/cycles",
        Some(SUBJECT),
        Some(json!({ "employee_id": SUBJECT, "period_id": "1999_h1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PERIOD_NOT_FOUND");
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_counts_cycles_by_state() {
    let router = create_test_router();
    let cycle_id = start_cycle(&router).await;
    walk_to_manager_submitted(&router, &cycle_id, "4", "4").await;
    send(
        &router,
        "POST",
        &format!("/api/cycles/{cycle_id}/deliver"),
        Some(MANAGER),
        None,
    )
    .await;

    // second cycle left in pending_self
    let (status, _) = send(
        &router,
        "POST",
        "/api/cycles",
        Some(ADMIN),
        Some(json!({ "employee_id": PEER, "period_id": "2026_h1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, dashboard) = send(&router, "GET", "/api/dashboard", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["total_cycles"], 2);
    assert_eq!(dashboard["by_state"]["final_delivered"], 1);
    assert_eq!(dashboard["by_state"]["pending_self"], 1);
    assert_eq!(dashboard["by_state"]["pending_manager"], 0);
    assert_eq!(dashboard["by_period"]["2026_h1"], 2);
    // one delivered cycle with uniform 4s on both sides
    assert_decimal_eq(&dashboard["average_final_score"], "4");
}
