use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::mapping::metrics_input_from_property;
use super::provider::{PropertyDataProvider, ProviderError, SimilarProperty};
use crate::valuation::{calculate_property_metrics, EstimationRates, MetricsResult};

/// Address summary, rent estimate and valuation metrics for one property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInsight {
    pub proper_address: String,
    pub county: String,
    pub zip_code: String,
    pub state: String,
    pub estimate_monthly_rent: f64,
    pub similar_properties: Vec<SimilarProperty>,
    #[serde(flatten)]
    pub metrics: MetricsResult,
}

/// Service composing a data provider with the valuation engine.
pub struct PropertyInsightService<P> {
    provider: Arc<P>,
    rates: EstimationRates,
}

impl<P> PropertyInsightService<P>
where
    P: PropertyDataProvider + 'static,
{
    pub fn new(provider: Arc<P>, rates: EstimationRates) -> Self {
        Self { provider, rates }
    }

    pub fn insight(&self, address: &str) -> Result<PropertyInsight, ProviderError> {
        let data = self.provider.property_data(address)?;
        let input = metrics_input_from_property(&data, self.rates);
        let metrics = calculate_property_metrics(&input);

        info!(
            full_address = %data.address.full_address,
            cap_rate = metrics.cap_rate,
            noi = metrics.noi,
            "property insight computed"
        );

        Ok(PropertyInsight {
            proper_address: data.address.full_address,
            county: data.address.county,
            zip_code: data.address.zip_code,
            state: data.address.state,
            estimate_monthly_rent: data.financial.monthly_rent,
            similar_properties: data.similar_properties,
            metrics,
        })
    }
}
