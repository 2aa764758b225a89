use super::provider::PropertyData;
use crate::valuation::{EstimationRates, MetricsInput};

const MONTHS_PER_YEAR: f64 = 12.0;

fn annualize(monthly: f64) -> f64 {
    monthly * MONTHS_PER_YEAR
}

/// Build valuation input from provider data.
///
/// Monthly figures are annualized. A missing monthly expense stays unset so
/// the engine estimates it; an explicit zero stays zero. The cap rate is
/// measured against the current market value, and HOA dues are carried as
/// other expenses.
pub fn metrics_input_from_property(data: &PropertyData, rates: EstimationRates) -> MetricsInput {
    let financial = &data.financial;

    MetricsInput {
        purchase_price: financial.current_market_value,
        annual_rental_income: financial.annual_rental_income,
        other_income: annualize(financial.other_monthly_income),
        property_taxes: financial.monthly_property_taxes.map(annualize),
        insurance: financial.monthly_insurance.map(annualize),
        property_management: financial.monthly_property_management.map(annualize),
        maintenance_repairs: financial.monthly_maintenance.map(annualize),
        utilities: annualize(financial.monthly_utilities),
        other_expenses: annualize(financial.monthly_hoa_fees),
        vacancy_rate: data.market.vacancy_rate,
        rates,
        ..MetricsInput::default()
    }
}
