use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ApplicationId, LoanRequest};
use super::repository::{ApplicationView, LoanRepository, RepositoryError};
use super::service::{LendingService, LendingServiceError};

/// Router exposing loan intake, lookup and portfolio statistics.
pub fn lending_router<R>(service: Arc<LendingService<R>>) -> Router
where
    R: LoanRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/loans",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/loans/:application_id", get(fetch_handler::<R>))
        .route("/api/v1/statistics", get(statistics_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    R: LoanRepository + 'static,
{
    match service.submit(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<LendingService<R>>>) -> Response
where
    R: LoanRepository + 'static,
{
    match service.applications() {
        Ok(records) => {
            let views: Vec<ApplicationView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: LoanRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(LendingServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "application_id": id.0,
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn statistics_handler<R>(
    State(service): State<Arc<LendingService<R>>>,
) -> Response
where
    R: LoanRepository + 'static,
{
    match service.statistics() {
        Ok(statistics) => (StatusCode::OK, axum::Json(statistics)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LendingServiceError) -> Response {
    let status = match &err {
        LendingServiceError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LendingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LendingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LendingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
