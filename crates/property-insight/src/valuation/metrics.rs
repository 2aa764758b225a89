use serde::{Deserialize, Serialize};

use super::rates::{EstimationRates, DEFAULT_VACANCY_RATE};
use super::rounding::round_to_cents;

/// Annual income and expense figures for a single property.
///
/// The four estimable expenses are `Option`s: `None` asks the engine to
/// estimate the category from [`EstimationRates`], while `Some(0.0)` records a
/// genuine zero expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsInput {
    pub purchase_price: f64,
    pub annual_rental_income: f64,
    /// Parking, laundry, storage and other non-rent income.
    #[serde(default)]
    pub other_income: f64,

    #[serde(default)]
    pub property_taxes: Option<f64>,
    #[serde(default)]
    pub insurance: Option<f64>,
    #[serde(default)]
    pub property_management: Option<f64>,
    #[serde(default)]
    pub maintenance_repairs: Option<f64>,

    #[serde(default)]
    pub utilities: f64,
    #[serde(default)]
    pub advertising_marketing: f64,
    #[serde(default)]
    pub legal_accounting: f64,
    #[serde(default)]
    pub landscaping: f64,
    #[serde(default)]
    pub pest_control: f64,
    #[serde(default)]
    pub other_expenses: f64,

    #[serde(default = "default_vacancy_rate")]
    pub vacancy_rate: f64,

    #[serde(flatten)]
    pub rates: EstimationRates,
}

fn default_vacancy_rate() -> f64 {
    DEFAULT_VACANCY_RATE
}

impl MetricsInput {
    /// Input with the given price and rent and every other field at its default.
    pub fn new(purchase_price: f64, annual_rental_income: f64) -> Self {
        Self {
            purchase_price,
            annual_rental_income,
            ..Self::default()
        }
    }
}

impl Default for MetricsInput {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            annual_rental_income: 0.0,
            other_income: 0.0,
            property_taxes: None,
            insurance: None,
            property_management: None,
            maintenance_repairs: None,
            utilities: 0.0,
            advertising_marketing: 0.0,
            legal_accounting: 0.0,
            landscaping: 0.0,
            pest_control: 0.0,
            other_expenses: 0.0,
            vacancy_rate: DEFAULT_VACANCY_RATE,
            rates: EstimationRates::default(),
        }
    }
}

/// The ten operating-expense categories reported in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    PropertyTaxes,
    Insurance,
    PropertyManagement,
    MaintenanceRepairs,
    Utilities,
    AdvertisingMarketing,
    LegalAccounting,
    Landscaping,
    PestControl,
    OtherExpenses,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::PropertyTaxes,
        ExpenseCategory::Insurance,
        ExpenseCategory::PropertyManagement,
        ExpenseCategory::MaintenanceRepairs,
        ExpenseCategory::Utilities,
        ExpenseCategory::AdvertisingMarketing,
        ExpenseCategory::LegalAccounting,
        ExpenseCategory::Landscaping,
        ExpenseCategory::PestControl,
        ExpenseCategory::OtherExpenses,
    ];

    /// Field name used for the category in serialized breakdowns.
    pub fn key(self) -> &'static str {
        match self {
            ExpenseCategory::PropertyTaxes => "property_taxes",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::PropertyManagement => "property_management",
            ExpenseCategory::MaintenanceRepairs => "maintenance_repairs",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::AdvertisingMarketing => "advertising_marketing",
            ExpenseCategory::LegalAccounting => "legal_accounting",
            ExpenseCategory::Landscaping => "landscaping",
            ExpenseCategory::PestControl => "pest_control",
            ExpenseCategory::OtherExpenses => "other_expenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::PropertyTaxes => "Property taxes",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::PropertyManagement => "Property management",
            ExpenseCategory::MaintenanceRepairs => "Maintenance & repairs",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::AdvertisingMarketing => "Advertising & marketing",
            ExpenseCategory::LegalAccounting => "Legal & accounting",
            ExpenseCategory::Landscaping => "Landscaping",
            ExpenseCategory::PestControl => "Pest control",
            ExpenseCategory::OtherExpenses => "Other expenses",
        }
    }

    /// Whether the engine estimates the category from a rate when it is unset.
    pub fn is_estimable(self) -> bool {
        matches!(
            self,
            ExpenseCategory::PropertyTaxes
                | ExpenseCategory::Insurance
                | ExpenseCategory::PropertyManagement
                | ExpenseCategory::MaintenanceRepairs
        )
    }
}

/// Resolved annual value of every expense category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub property_taxes: f64,
    pub insurance: f64,
    pub property_management: f64,
    pub maintenance_repairs: f64,
    pub utilities: f64,
    pub advertising_marketing: f64,
    pub legal_accounting: f64,
    pub landscaping: f64,
    pub pest_control: f64,
    pub other_expenses: f64,
}

impl ExpenseBreakdown {
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::PropertyTaxes => self.property_taxes,
            ExpenseCategory::Insurance => self.insurance,
            ExpenseCategory::PropertyManagement => self.property_management,
            ExpenseCategory::MaintenanceRepairs => self.maintenance_repairs,
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::AdvertisingMarketing => self.advertising_marketing,
            ExpenseCategory::LegalAccounting => self.legal_accounting,
            ExpenseCategory::Landscaping => self.landscaping,
            ExpenseCategory::PestControl => self.pest_control,
            ExpenseCategory::OtherExpenses => self.other_expenses,
        }
    }

    /// Categories paired with their values, in reporting order.
    pub fn entries(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Sum of all ten categories, accumulated in reporting order.
    pub fn total(&self) -> f64 {
        self.entries().map(|(_, value)| value).sum()
    }

    fn rounded(&self) -> Self {
        Self {
            property_taxes: round_to_cents(self.property_taxes),
            insurance: round_to_cents(self.insurance),
            property_management: round_to_cents(self.property_management),
            maintenance_repairs: round_to_cents(self.maintenance_repairs),
            utilities: round_to_cents(self.utilities),
            advertising_marketing: round_to_cents(self.advertising_marketing),
            legal_accounting: round_to_cents(self.legal_accounting),
            landscaping: round_to_cents(self.landscaping),
            pest_control: round_to_cents(self.pest_control),
            other_expenses: round_to_cents(self.other_expenses),
        }
    }
}

/// Investment metrics for a property, every field rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Cap rate as a percentage (`6.2` means 6.2%).
    pub cap_rate: f64,
    pub noi: f64,
    pub gross_income: f64,
    pub effective_gross_income: f64,
    pub vacancy_loss: f64,
    pub total_expenses: f64,
    pub expense_breakdown: ExpenseBreakdown,
}

/// Compute cap rate, NOI and the resolved expense breakdown.
///
/// Unset property taxes and insurance are estimated from the purchase price;
/// unset management and maintenance from effective gross income. A purchase
/// price at or below zero yields a cap rate of `0` instead of a division.
/// No input is rejected: negative rates or prices flow through arithmetically.
pub fn calculate_property_metrics(input: &MetricsInput) -> MetricsResult {
    let rates = &input.rates;

    let gross_income = input.annual_rental_income + input.other_income;
    let vacancy_loss = gross_income * input.vacancy_rate;
    let effective_gross_income = gross_income - vacancy_loss;

    let breakdown = ExpenseBreakdown {
        property_taxes: input
            .property_taxes
            .unwrap_or(input.purchase_price * rates.property_tax_rate),
        insurance: input
            .insurance
            .unwrap_or(input.purchase_price * rates.insurance_rate),
        property_management: input
            .property_management
            .unwrap_or(effective_gross_income * rates.management_rate),
        maintenance_repairs: input
            .maintenance_repairs
            .unwrap_or(effective_gross_income * rates.maintenance_rate),
        utilities: input.utilities,
        advertising_marketing: input.advertising_marketing,
        legal_accounting: input.legal_accounting,
        landscaping: input.landscaping,
        pest_control: input.pest_control,
        other_expenses: input.other_expenses,
    };

    let total_expenses = breakdown.total();
    let noi = effective_gross_income - total_expenses;

    let cap_rate = if input.purchase_price > 0.0 {
        (noi / input.purchase_price) * 100.0
    } else {
        0.0
    };

    MetricsResult {
        cap_rate: round_to_cents(cap_rate),
        noi: round_to_cents(noi),
        gross_income: round_to_cents(gross_income),
        effective_gross_income: round_to_cents(effective_gross_income),
        vacancy_loss: round_to_cents(vacancy_loss),
        total_expenses: round_to_cents(total_expenses),
        expense_breakdown: breakdown.rounded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_input() -> MetricsInput {
        MetricsInput {
            other_income: 1200.0,
            utilities: 600.0,
            vacancy_rate: 0.05,
            ..MetricsInput::new(450_000.0, 30_000.0)
        }
    }

    #[test]
    fn computes_sample_property_metrics() {
        let result = calculate_property_metrics(&sample_input());

        assert_close(result.gross_income, 31_200.0);
        assert_close(result.vacancy_loss, 1_560.0);
        assert_close(result.effective_gross_income, 29_640.0);
        assert_close(result.expense_breakdown.property_taxes, 6_750.0);
        assert_close(result.expense_breakdown.insurance, 1_350.0);
        assert_close(result.expense_breakdown.property_management, 2_371.2);
        assert_close(result.expense_breakdown.maintenance_repairs, 2_964.0);
        assert_close(result.expense_breakdown.utilities, 600.0);
        assert_close(result.total_expenses, 14_035.2);
        assert_close(result.noi, 15_604.8);
        assert_close(result.cap_rate, 3.47);
    }

    #[test]
    fn non_positive_purchase_price_forces_zero_cap_rate() {
        for price in [0.0, -250_000.0] {
            let result = calculate_property_metrics(&MetricsInput::new(price, 24_000.0));
            assert_eq!(result.cap_rate, 0.0);
        }
    }

    #[test]
    fn negative_purchase_price_yields_negative_estimates() {
        let result = calculate_property_metrics(&MetricsInput::new(-100_000.0, 12_000.0));

        assert_close(result.expense_breakdown.property_taxes, -1_500.0);
        assert_close(result.expense_breakdown.insurance, -300.0);
        assert_eq!(result.cap_rate, 0.0);
    }

    #[test]
    fn explicit_zero_is_not_estimated() {
        let input = MetricsInput {
            property_taxes: Some(0.0),
            insurance: Some(0.0),
            property_management: Some(0.0),
            maintenance_repairs: Some(0.0),
            ..sample_input()
        };
        let result = calculate_property_metrics(&input);

        for category in ExpenseCategory::ALL
            .into_iter()
            .filter(|category| category.is_estimable())
        {
            assert_eq!(result.expense_breakdown.get(category), 0.0, "{category:?}");
        }
        assert_close(result.total_expenses, 600.0);
    }

    #[test]
    fn supplied_expenses_round_half_to_even_on_stored_value() {
        let result = calculate_property_metrics(&MetricsInput {
            property_taxes: Some(79_740.425),
            insurance: Some(2.675),
            ..sample_input()
        });

        assert_eq!(result.expense_breakdown.property_taxes, 79_740.43);
        assert_eq!(result.expense_breakdown.insurance, 2.67);
    }

    #[test]
    fn management_estimate_uses_effective_gross_income() {
        let input = MetricsInput {
            vacancy_rate: 0.10,
            ..MetricsInput::new(1_000_000.0, 50_000.0)
        };
        let result = calculate_property_metrics(&input);

        // 50_000 * 0.9 = 45_000 effective gross income
        assert_close(result.expense_breakdown.property_management, 3_600.0);
        assert_close(result.expense_breakdown.maintenance_repairs, 4_500.0);
        assert_close(result.expense_breakdown.property_taxes, 15_000.0);
    }

    #[test]
    fn vacancy_rate_is_not_clamped() {
        let over = calculate_property_metrics(&MetricsInput {
            vacancy_rate: 1.5,
            ..MetricsInput::new(200_000.0, 10_000.0)
        });
        assert_close(over.vacancy_loss, 15_000.0);
        assert_close(over.effective_gross_income, -5_000.0);

        let negative = calculate_property_metrics(&MetricsInput {
            vacancy_rate: -0.1,
            ..MetricsInput::new(200_000.0, 10_000.0)
        });
        assert_close(negative.vacancy_loss, -1_000.0);
        assert_close(negative.effective_gross_income, 11_000.0);
    }

    #[test]
    fn breakdown_serializes_with_category_keys() {
        let result = calculate_property_metrics(&sample_input());
        let value = serde_json::to_value(result).expect("serializes");
        let breakdown = value["expense_breakdown"]
            .as_object()
            .expect("breakdown object");

        assert_eq!(breakdown.len(), 10);
        for category in ExpenseCategory::ALL {
            assert!(breakdown.contains_key(category.key()), "{}", category.key());
        }
    }

    #[test]
    fn input_deserializes_with_defaults() {
        let input: MetricsInput = serde_json::from_str(
            r#"{
                "purchase_price": 300000,
                "annual_rental_income": 24000,
                "property_taxes": 0,
                "default_insurance_rate": 0.004
            }"#,
        )
        .expect("valid input");

        assert_eq!(input.property_taxes, Some(0.0));
        assert_eq!(input.insurance, None);
        assert_eq!(input.vacancy_rate, DEFAULT_VACANCY_RATE);
        assert_eq!(input.rates.insurance_rate, 0.004);
        assert_eq!(input.rates.management_rate, 0.08);
    }
}
