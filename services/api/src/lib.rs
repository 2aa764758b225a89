mod cli;
mod infra;
mod reports;
mod routes;
mod server;

use property_insight::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
