use serde::{Deserialize, Serialize};

const DEFAULT_STREET: &str = "123 Main St";
const DEFAULT_CITY: &str = "Anytown";
const DEFAULT_STATE: &str = "CA";
const DEFAULT_ZIP: &str = "12345";
const DEFAULT_COUNTY: &str = "Sample County";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub county: String,
    pub full_address: String,
}

impl PropertyAddress {
    pub fn new(street: &str, city: &str, state: &str, zip_code: &str, county: &str) -> Self {
        Self {
            full_address: format!("{street}, {city}, {state} {zip_code}"),
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
            county: county.to_string(),
        }
    }
}

/// Parse `"street, city, ST 12345"` into address components.
///
/// Parts that are missing fall back to placeholder values; county cannot be
/// derived from a postal address and is always the placeholder.
pub fn parse_address(raw: &str) -> PropertyAddress {
    let mut parts = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty());

    let street = parts.next().unwrap_or(DEFAULT_STREET);
    let city = parts.next().unwrap_or(DEFAULT_CITY);
    let (state, zip_code) = match parts.next() {
        Some(region) => split_region(region),
        None => (DEFAULT_STATE, DEFAULT_ZIP),
    };

    PropertyAddress::new(street, city, state, zip_code, DEFAULT_COUNTY)
}

fn split_region(region: &str) -> (&str, &str) {
    let mut tokens = region.split_whitespace();
    let state = tokens.next().unwrap_or(DEFAULT_STATE);
    let zip_code = tokens
        .next()
        .filter(|zip| zip.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .unwrap_or(DEFAULT_ZIP);
    (state, zip_code)
}
