//! HTTP request handlers for the evaluation engine API.

mod catalog;
mod cycles;
mod dashboard;
mod employees;
mod evidence;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;

use super::state::AppState;

pub use cycles::PrefillResponse;
pub use dashboard::DashboardResponse;

/// Simple liveness endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // employee directory
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        // evidence journal
        .route(
            "/api/employees/:id/evidence",
            get(evidence::list_evidence).post(evidence::add_evidence),
        )
        // catalogs
        .route(
            "/api/departments",
            get(catalog::list_departments).post(catalog::create_department),
        )
        .route(
            "/api/departments/:id",
            get(catalog::get_department)
                .put(catalog::update_department)
                .delete(catalog::delete_department),
        )
        .route(
            "/api/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/api/competencies",
            get(catalog::list_competencies).post(catalog::create_competency),
        )
        .route(
            "/api/competencies/:id",
            get(catalog::get_competency)
                .put(catalog::update_competency)
                .delete(catalog::delete_competency),
        )
        .route("/api/kpis", get(catalog::list_kpis).post(catalog::create_kpi))
        .route("/api/kpis/export", get(catalog::export_kpis))
        .route("/api/kpis/import", post(catalog::import_kpis))
        .route(
            "/api/kpis/:id",
            get(catalog::get_kpi)
                .put(catalog::update_kpi)
                .delete(catalog::delete_kpi),
        )
        .route(
            "/api/values",
            get(catalog::list_values).post(catalog::create_value),
        )
        .route("/api/values/export", get(catalog::export_values))
        .route("/api/values/import", post(catalog::import_values))
        .route(
            "/api/values/:id",
            get(catalog::get_value)
                .put(catalog::update_value)
                .delete(catalog::delete_value),
        )
        .route(
            "/api/templates",
            get(catalog::list_templates).post(catalog::create_template),
        )
        .route(
            "/api/templates/:id",
            get(catalog::get_template)
                .put(catalog::update_template)
                .delete(catalog::delete_template),
        )
        .route(
            "/api/periods",
            get(catalog::list_periods).post(catalog::create_period),
        )
        .route("/api/periods/:id", get(catalog::get_period))
        // review cycles and workflow
        .route(
            "/api/cycles",
            get(cycles::list_cycles).post(cycles::start_cycle),
        )
        .route("/api/cycles/:id", get(cycles::get_cycle))
        .route(
            "/api/cycles/:id/self",
            get(cycles::get_self_evaluation).put(cycles::update_self_ratings),
        )
        .route(
            "/api/cycles/:id/self/submit",
            post(cycles::submit_self_evaluation),
        )
        .route("/api/cycles/:id/review/begin", post(cycles::begin_review))
        .route(
            "/api/cycles/:id/review",
            get(cycles::get_review).put(cycles::update_review_ratings),
        )
        .route("/api/cycles/:id/review/submit", post(cycles::submit_review))
        .route("/api/cycles/:id/review/reject", post(cycles::reject_review))
        .route("/api/cycles/:id/deliver", post(cycles::deliver_final))
        .route("/api/cycles/:id/summary", get(cycles::get_summary))
        .route("/api/cycles/:id/prefill", get(cycles::get_prefill))
        // dashboard
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogLoader;
    use crate::store::Store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let loader = CatalogLoader::load("./config/hr").expect("Failed to load config");
        AppState::new(Store::from_catalog(&loader))
    }

    #[tokio::test]
    async fn test_health_endpoint_needs_no_actor() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_actor_header_is_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/kpis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_actor_header_is_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/kpis")
                    .header("x-actor-id", "emp_ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
