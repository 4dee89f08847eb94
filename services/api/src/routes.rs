use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use lending_platform::lending::{lending_router, LendingService, LoanRepository};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_lending_routes<R>(service: Arc<LendingService<R>>) -> axum::Router
where
    R: LoanRepository + 'static,
{
    lending_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "lending-platform",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the listener is bound and a non-empty lending policy is loaded.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let accepting = listening && !state.policy_rules.is_empty();

    let (status, label) = if accepting {
        (StatusCode::OK, "accepting_applications")
    } else if listening {
        (StatusCode::SERVICE_UNAVAILABLE, "policy_missing")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "starting")
    };

    let payload = json!({
        "status": label,
        "policy_rules": state.policy_rules.as_slice(),
    });

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
