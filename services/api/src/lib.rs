mod cli;
mod extract;
mod infra;
mod routes;
mod server;

use student_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
