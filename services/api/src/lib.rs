mod cli;
mod console;
mod import;
mod infra;
mod routes;
mod server;

use lending_platform::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
