//! Income-property valuation metrics.
//!
//! The engine in [`metrics`] is a pure function: it maps a set of income and
//! expense figures to cap rate, net operating income and the resolved expense
//! breakdown. Estimable expenses fall back to the rates in [`EstimationRates`]
//! when the caller leaves them unset.

mod metrics;
mod rates;
mod rounding;

pub use metrics::{
    calculate_property_metrics, ExpenseBreakdown, ExpenseCategory, MetricsInput, MetricsResult,
};
pub use rates::{EstimationRates, DEFAULT_VACANCY_RATE};
pub use rounding::round_to_cents;
