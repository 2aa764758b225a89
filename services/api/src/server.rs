use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use property_insight::advisor::{AdvisorAgent, OpenAiCompletionClient};
use property_insight::config::AppConfig;
use property_insight::error::AppError;
use property_insight::insight::{PropertyInsightService, StubPropertyDataProvider};
use property_insight::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let insight_service = Arc::new(PropertyInsightService::new(
        Arc::new(StubPropertyDataProvider),
        config.valuation.rates,
    ));

    if config.advisor.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; contract reviews will report a configuration error");
    }
    let completion_client = Arc::new(OpenAiCompletionClient::new(config.advisor.clone())?);
    let advisor = Arc::new(AdvisorAgent::with_default_tools(completion_client));

    let app = with_service_routes(insight_service, advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property insight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
