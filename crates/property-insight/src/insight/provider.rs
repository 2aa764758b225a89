use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::address::{parse_address, PropertyAddress};

/// Physical characteristics of the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    /// `single_family`, `condo`, `multi_family`, ...
    pub property_type: String,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub square_feet: u32,
    pub lot_size: Option<f64>,
    pub year_built: Option<u16>,
    pub parking_spaces: Option<u8>,
}

/// Market value, income and expense figures as reported by data providers.
///
/// Expense figures are monthly. `None` means the provider had no figure and
/// the valuation engine should estimate the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub current_market_value: f64,
    pub purchase_price: Option<f64>,

    pub monthly_rent: f64,
    pub annual_rental_income: f64,
    #[serde(default)]
    pub other_monthly_income: f64,

    pub monthly_property_taxes: Option<f64>,
    pub monthly_insurance: Option<f64>,
    #[serde(default)]
    pub monthly_hoa_fees: f64,
    pub monthly_property_management: Option<f64>,
    pub monthly_maintenance: Option<f64>,
    #[serde(default)]
    pub monthly_utilities: f64,

    pub property_tax_rate: Option<f64>,
    pub cap_rate: Option<f64>,
    pub cash_flow: Option<f64>,
}

/// Neighbourhood rental market indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub median_rent_per_sqft: Option<f64>,
    pub average_rent_nearby: Option<f64>,
    pub vacancy_rate: f64,
    pub rent_growth_rate: Option<f64>,
    pub market_appreciation_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarProperty {
    pub address: String,
}

/// Everything known about a property at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyData {
    pub address: PropertyAddress,
    pub details: PropertyDetails,
    pub financial: FinancialData,
    pub market: MarketData,
    pub similar_properties: Vec<SimilarProperty>,
    pub last_updated: DateTime<Utc>,
    pub data_sources: Vec<String>,
}

/// Lookup boundary for MLS, public-record and rental-listing sources.
pub trait PropertyDataProvider: Send + Sync {
    fn property_data(&self, address: &str) -> Result<PropertyData, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("address must not be empty")]
    InvalidAddress,
    #[error("property data unavailable: {0}")]
    Unavailable(String),
}

/// Placeholder provider returning fixed figures for any address.
///
/// The address is parsed so the response echoes the caller's street, city,
/// state and zip; financial and market figures never change.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubPropertyDataProvider;

impl PropertyDataProvider for StubPropertyDataProvider {
    fn property_data(&self, address: &str) -> Result<PropertyData, ProviderError> {
        if address.trim().is_empty() {
            return Err(ProviderError::InvalidAddress);
        }

        let address = parse_address(address);
        debug!(full_address = %address.full_address, "serving placeholder property data");

        let similar_properties = neighbouring_addresses(&address);

        Ok(PropertyData {
            address,
            details: PropertyDetails {
                property_type: "single_family".to_string(),
                bedrooms: 3,
                bathrooms: 2.0,
                square_feet: 1500,
                lot_size: Some(0.25),
                year_built: Some(1995),
                parking_spaces: Some(2),
            },
            financial: FinancialData {
                current_market_value: 450_000.0,
                purchase_price: Some(430_000.0),
                monthly_rent: 2_500.0,
                annual_rental_income: 30_000.0,
                other_monthly_income: 100.0,
                monthly_property_taxes: Some(562.50),
                monthly_insurance: Some(125.0),
                monthly_hoa_fees: 0.0,
                monthly_property_management: Some(200.0),
                monthly_maintenance: Some(250.0),
                monthly_utilities: 50.0,
                property_tax_rate: Some(0.015),
                cap_rate: Some(6.2),
                cash_flow: Some(1_312.50),
            },
            market: MarketData {
                median_rent_per_sqft: Some(1.67),
                average_rent_nearby: Some(2_400.0),
                vacancy_rate: 0.05,
                rent_growth_rate: Some(0.03),
                market_appreciation_rate: Some(0.04),
            },
            similar_properties,
            last_updated: Utc::now(),
            data_sources: vec!["dummy_data".to_string(), "placeholder".to_string()],
        })
    }
}

/// The next three house numbers on the same street.
fn neighbouring_addresses(address: &PropertyAddress) -> Vec<SimilarProperty> {
    let (number, street_name) = match address.street.split_once(' ') {
        Some((number, rest)) => match number.parse::<u32>() {
            Ok(number) => (number, rest),
            Err(_) => (0, address.street.as_str()),
        },
        None => (0, address.street.as_str()),
    };

    // house numbers past u32::MAX have no neighbours
    (1..=3)
        .filter_map(|offset| number.checked_add(offset))
        .map(|neighbour| SimilarProperty {
            address: format!(
                "{} {}, {}, {} {}",
                neighbour, street_name, address.city, address.state, address.zip_code
            ),
        })
        .collect()
}
