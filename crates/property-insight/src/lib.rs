pub mod advisor;
pub mod config;
pub mod error;
pub mod insight;
pub mod telemetry;
pub mod valuation;
