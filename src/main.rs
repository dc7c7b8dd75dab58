use clap::Parser;
use conductdoc::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; settings can come from the environment or config file.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        }
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    match Cli::parse().run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ conductdoc error: {}", e);
            ExitCode::FAILURE
        }
    }
}
