use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lending_platform::config::AppConfig;
use lending_platform::error::AppError;
use lending_platform::lending::{InMemoryLoanRepository, LendingService};
use lending_platform::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState::new(readiness_flag.clone(), prometheus_handle);

    let repository = Arc::new(InMemoryLoanRepository::default());
    let lending_service = Arc::new(LendingService::new(repository));

    let policy_rule_count = app_state.policy_rules.len();
    let app = with_lending_routes(lending_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy_rules = policy_rule_count,
        "lending platform accepting applications"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
