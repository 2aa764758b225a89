//! Property lookups feeding the valuation engine.

mod address;
mod mapping;
pub mod provider;
pub mod router;
mod service;

pub use address::{parse_address, PropertyAddress};
pub use mapping::metrics_input_from_property;
pub use provider::{
    FinancialData, MarketData, PropertyData, PropertyDataProvider, PropertyDetails,
    ProviderError, SimilarProperty, StubPropertyDataProvider,
};
pub use router::{insight_router, PropertyInsightRequest};
pub use service::{PropertyInsight, PropertyInsightService};
