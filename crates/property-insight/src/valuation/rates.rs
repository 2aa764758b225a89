use serde::{Deserialize, Serialize};

/// Expected share of gross income lost to vacancy and collection.
pub const DEFAULT_VACANCY_RATE: f64 = 0.05;

/// Rates used to estimate expense categories the caller did not supply.
///
/// Property taxes and insurance are estimated from the purchase price;
/// management and maintenance are estimated from effective gross income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationRates {
    /// Share of the purchase price charged as annual property tax.
    #[serde(rename = "default_property_tax_rate")]
    pub property_tax_rate: f64,
    /// Share of the purchase price paid as annual insurance premium.
    #[serde(rename = "default_insurance_rate")]
    pub insurance_rate: f64,
    /// Share of effective gross income paid to a management company.
    #[serde(rename = "default_management_rate")]
    pub management_rate: f64,
    /// Share of effective gross income reserved for maintenance and repairs.
    #[serde(rename = "default_maintenance_rate")]
    pub maintenance_rate: f64,
}

impl Default for EstimationRates {
    fn default() -> Self {
        Self {
            property_tax_rate: 0.015,
            insurance_rate: 0.003,
            management_rate: 0.08,
            maintenance_rate: 0.10,
        }
    }
}
