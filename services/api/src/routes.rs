use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use property_insight::advisor::{advisor_router, AdvisorAgent, CompletionClient};
use property_insight::insight::{insight_router, PropertyDataProvider, PropertyInsightService};
use property_insight::valuation::{calculate_property_metrics, MetricsInput, MetricsResult};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn with_service_routes<P, C>(
    insight: Arc<PropertyInsightService<P>>,
    advisor: Arc<AdvisorAgent<C>>,
) -> axum::Router
where
    P: PropertyDataProvider + 'static,
    C: CompletionClient + 'static,
{
    insight_router(insight)
        .merge(advisor_router(advisor))
        .route("/health", axum::routing::get(healthcheck))
        .route("/healthcheck", axum::routing::get(legacy_healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/metrics/calculate",
            axum::routing::post(calculate_metrics_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn legacy_healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn calculate_metrics_endpoint(
    Json(input): Json<MetricsInput>,
) -> Json<MetricsResult> {
    let result = calculate_property_metrics(&input);
    debug!(
        purchase_price = input.purchase_price,
        cap_rate = result.cap_rate,
        "property metrics calculated"
    );
    Json(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use property_insight::advisor::OpenAiCompletionClient;
    use property_insight::config::AdvisorConfig;
    use property_insight::insight::StubPropertyDataProvider;
    use property_insight::valuation::EstimationRates;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let insight = Arc::new(PropertyInsightService::new(
            Arc::new(StubPropertyDataProvider),
            EstimationRates::default(),
        ));
        let client = OpenAiCompletionClient::new(AdvisorConfig::default()).expect("client builds");
        let advisor = Arc::new(AdvisorAgent::with_default_tools(Arc::new(client)));

        with_service_routes(insight, advisor).layer(Extension(state))
    }

    async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn health_endpoints_report_status() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");

        let (status, body) = send(
            app(true),
            Request::get("/healthcheck")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let request = || {
            Request::get("/ready")
                .body(Body::empty())
                .expect("request builds")
        };

        let (status, body) = send(app(false), request()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = send(app(true), request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn calculate_endpoint_applies_defaults() {
        let (status, body) = send(
            app(true),
            post_json(
                "/api/v1/metrics/calculate",
                r#"{"purchase_price":450000,"annual_rental_income":30000,"other_income":1200,"utilities":600}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gross_income"], 31_200.0);
        assert_eq!(body["effective_gross_income"], 29_640.0);
        assert_eq!(body["total_expenses"], 14_035.2);
        assert_eq!(body["noi"], 15_604.8);
        assert_eq!(body["cap_rate"], 3.47);
        assert_eq!(body["expense_breakdown"]["property_taxes"], 6_750.0);
    }

    #[tokio::test]
    async fn calculate_endpoint_honours_explicit_zero() {
        let Json(result) = calculate_metrics_endpoint(Json(MetricsInput {
            property_management: Some(0.0),
            ..MetricsInput::new(300_000.0, 24_000.0)
        }))
        .await;

        assert_eq!(result.expense_breakdown.property_management, 0.0);
        assert_eq!(result.expense_breakdown.maintenance_repairs, 2_280.0);
    }

    #[tokio::test]
    async fn insight_route_is_mounted() {
        let (status, body) = send(
            app(true),
            post_json(
                "/api/get_property_insight",
                r#"{"address":"123 Main St, Anytown, CA 12345"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["proper_address"], "123 Main St, Anytown, CA 12345");
        assert_eq!(body["cap_rate"], 3.42);
        assert_eq!(body["similar_properties"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn contract_review_without_api_key_reports_failure() {
        let (status, body) = send(
            app(true),
            post_json(
                "/api/ai_contract_review",
                r#"{"file_content":"Rent is due on the first of each month."}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let summary = body["summary"].as_str().expect("summary string");
        assert!(summary.starts_with("Error analyzing contract:"));
        assert_eq!(body["warnings"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_prometheus_text() {
        let response = app(true)
            .oneshot(
                Request::get("/metrics")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
