use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::provider::PropertyDataProvider;
use super::service::{PropertyInsight, PropertyInsightService};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInsightRequest {
    pub address: String,
}

/// Router exposing the property insight lookup.
pub fn insight_router<P>(service: Arc<PropertyInsightService<P>>) -> Router
where
    P: PropertyDataProvider + 'static,
{
    Router::new()
        .route("/api/get_property_insight", post(insight_handler::<P>))
        .with_state(service)
}

pub(crate) async fn insight_handler<P>(
    State(service): State<Arc<PropertyInsightService<P>>>,
    Json(request): Json<PropertyInsightRequest>,
) -> Result<Json<PropertyInsight>, AppError>
where
    P: PropertyDataProvider + 'static,
{
    let insight = service.insight(&request.address)?;
    Ok(Json(insight))
}
