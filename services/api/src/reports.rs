use chrono::Local;
use clap::Args;
use property_insight::advisor::{
    web_scraper::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT},
    AdvisorAgent, ContractReview, OpenAiCompletionClient, WebScraper,
};
use property_insight::config::AppConfig;
use property_insight::error::AppError;
use property_insight::insight::{PropertyInsight, PropertyInsightService, StubPropertyDataProvider};
use property_insight::valuation::{
    calculate_property_metrics, EstimationRates, MetricsInput, MetricsResult, DEFAULT_VACANCY_RATE,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct MetricsArgs {
    /// Purchase price of the property
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) purchase_price: f64,
    /// Annual rent collected at full occupancy
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) annual_rental_income: f64,
    /// Annual non-rent income (parking, laundry, storage)
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) other_income: f64,
    /// Annual property taxes (estimated from price when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) property_taxes: Option<f64>,
    /// Annual insurance premium (estimated from price when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) insurance: Option<f64>,
    /// Annual management fees (estimated from effective income when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) property_management: Option<f64>,
    /// Annual maintenance and repairs (estimated from effective income when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) maintenance_repairs: Option<f64>,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) utilities: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) advertising_marketing: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) legal_accounting: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) landscaping: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) pest_control: f64,
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub(crate) other_expenses: f64,
    /// Fraction of gross income lost to vacancy
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_VACANCY_RATE)]
    pub(crate) vacancy_rate: f64,
    /// Override the property tax estimation rate
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) property_tax_rate: Option<f64>,
    /// Override the insurance estimation rate
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) insurance_rate: Option<f64>,
    /// Override the management estimation rate
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) management_rate: Option<f64>,
    /// Override the maintenance estimation rate
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) maintenance_rate: Option<f64>,
    /// Print the result as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl MetricsArgs {
    pub(crate) fn to_input(&self) -> MetricsInput {
        let defaults = EstimationRates::default();
        MetricsInput {
            purchase_price: self.purchase_price,
            annual_rental_income: self.annual_rental_income,
            other_income: self.other_income,
            property_taxes: self.property_taxes,
            insurance: self.insurance,
            property_management: self.property_management,
            maintenance_repairs: self.maintenance_repairs,
            utilities: self.utilities,
            advertising_marketing: self.advertising_marketing,
            legal_accounting: self.legal_accounting,
            landscaping: self.landscaping,
            pest_control: self.pest_control,
            other_expenses: self.other_expenses,
            vacancy_rate: self.vacancy_rate,
            rates: EstimationRates {
                property_tax_rate: self.property_tax_rate.unwrap_or(defaults.property_tax_rate),
                insurance_rate: self.insurance_rate.unwrap_or(defaults.insurance_rate),
                management_rate: self.management_rate.unwrap_or(defaults.management_rate),
                maintenance_rate: self.maintenance_rate.unwrap_or(defaults.maintenance_rate),
            },
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct InsightArgs {
    /// Property address, e.g. "123 Main St, Anytown, CA 12345"
    #[arg(long)]
    pub(crate) address: String,
    /// Print the insight as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReviewArgs {
    /// Path to a plain-text contract
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ScrapeArgs {
    /// Page to fetch
    #[arg(long)]
    pub(crate) url: String,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub(crate) timeout_secs: u64,
    /// Override the browser user agent sent with the request
    #[arg(long)]
    pub(crate) user_agent: Option<String>,
}

pub(crate) fn run_metrics_report(args: MetricsArgs) -> Result<(), AppError> {
    let input = args.to_input();
    let result = calculate_property_metrics(&input);

    if args.json {
        return print_json(&result);
    }

    println!("Property metrics ({})", Local::now().format("%Y-%m-%d %H:%M"));
    println!("Purchase price: {}", currency(input.purchase_price));
    render_metrics(&result);
    Ok(())
}

pub(crate) fn run_insight_report(args: InsightArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = PropertyInsightService::new(
        Arc::new(StubPropertyDataProvider),
        config.valuation.rates,
    );
    let insight = service.insight(&args.address)?;

    if args.json {
        return print_json(&insight);
    }

    render_insight(&insight);
    Ok(())
}

pub(crate) async fn run_contract_review(args: ReviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let contract = std::fs::read_to_string(&args.file)?;
    let agent =
        AdvisorAgent::with_default_tools(Arc::new(OpenAiCompletionClient::new(config.advisor)?));

    let review = agent.analyze_contract(&contract).await;
    println!("Contract review: {}", args.file.display());
    render_review(&review);
    Ok(())
}

pub(crate) async fn run_scrape(args: ScrapeArgs) -> Result<(), AppError> {
    let user_agent = args.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let scraper = WebScraper::new(Duration::from_secs(args.timeout_secs), Some(user_agent))?;
    let text = scraper.fetch_text(&args.url).await?;
    println!("{text}");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_metrics(result: &MetricsResult) {
    println!("Gross income: {}", currency(result.gross_income));
    println!("Vacancy loss: {}", currency(result.vacancy_loss));
    println!(
        "Effective gross income: {}",
        currency(result.effective_gross_income)
    );
    println!("Operating expenses:");
    for (category, value) in result.expense_breakdown.entries() {
        println!("  - {}: {}", category.label(), currency(value));
    }
    println!("Total expenses: {}", currency(result.total_expenses));
    println!("Net operating income: {}", currency(result.noi));
    println!("Cap rate: {:.2}%", result.cap_rate);
}

fn render_insight(insight: &PropertyInsight) {
    println!("Property insight for {}", insight.proper_address);
    println!(
        "{} | {} {}",
        insight.county, insight.state, insight.zip_code
    );
    println!(
        "Estimated monthly rent: {}",
        currency(insight.estimate_monthly_rent)
    );
    render_metrics(&insight.metrics);

    if !insight.similar_properties.is_empty() {
        println!("Similar properties:");
        for property in &insight.similar_properties {
            println!("  - {}", property.address);
        }
    }
}

fn render_review(review: &ContractReview) {
    println!("Summary: {}", review.summary);
    render_section("Highlights", &review.highlights);
    render_section("Warnings", &review.warnings);
    render_section("Suggestions", &review.suggestions);
    if let Some(raw) = &review.raw_response {
        println!("\nModel response could not be parsed:\n{raw}");
    }
}

fn render_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}

/// Dollar amount with thousands separators, e.g. `$31,200.00`.
pub(crate) fn currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}
