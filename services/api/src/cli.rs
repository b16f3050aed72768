use crate::extract::{run_extract, ExtractArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use student_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Intake",
    about = "Pre-fill student records from admissions application forms",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Extract a pre-fill record from an application form and print it as JSON
    Extract(ExtractArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Extract(args) => run_extract(args),
    }
}
