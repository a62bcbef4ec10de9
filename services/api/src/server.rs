use crate::cli::ServeArgs;
use crate::infra::{AppState, LogMailer};
use crate::routes::with_app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use shaftfit::config::AppConfig;
use shaftfit::error::AppError;
use shaftfit::leads::{LeadService, MemoryLeadRepository};
use shaftfit::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let missing = config.leads.missing_settings();
    if !missing.is_empty() {
        warn!(?missing, "lead capture disabled until settings are provided");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let lead_service = Arc::new(LeadService::new(
        Arc::new(MemoryLeadRepository::default()),
        Arc::new(LogMailer::default()),
        config.leads.clone(),
    ));

    let app = with_app_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "shaft fitting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
