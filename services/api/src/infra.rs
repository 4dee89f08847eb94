use lending_platform::config::AppConfig;
use lending_platform::error::AppError;
use lending_platform::lending::standard_rule_engine;
use lending_platform::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Rule names of the lending policy applications are decided against.
    pub(crate) policy_rules: Arc<Vec<&'static str>>,
}

impl AppState {
    pub(crate) fn new(readiness: Arc<AtomicBool>, metrics: PrometheusHandle) -> Self {
        Self {
            readiness,
            metrics: Arc::new(metrics),
            policy_rules: Arc::new(standard_rule_engine().rule_names()),
        }
    }
}

/// Loads configuration and starts logging for the offline commands.
pub(crate) fn init_offline() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Accepts a strictly positive monetary amount. Thousands separators are
/// ignored.
pub(crate) fn parse_positive_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let amount = Decimal::from_str(&cleaned)
        .map_err(|err| format!("failed to parse '{}' as an amount ({err})", raw.trim()))?;
    if amount <= Decimal::ZERO {
        return Err(format!("amount must be greater than zero (got {amount})"));
    }
    Ok(amount)
}

/// Accepts any whole number. Range checks belong to the lending rules.
pub(crate) fn parse_credit_score(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|err| format!("failed to parse '{}' as a credit score ({err})", raw.trim()))
}
