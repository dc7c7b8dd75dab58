// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::backend::{DocsBackend, HttpBackend};
use crate::banner;
use crate::config::{AppConfig, ConfigLayer};
use crate::errors::Result;
use crate::form::{SubmissionController, validate_repo_url};
use crate::repl;
use crate::view::FormView;

/// Command-line client for the ConductDoc documentation API.
#[derive(Debug, Parser)]
#[command(name = "conductdoc", version)]
#[command(about = "Generate documentation for a GitHub repository", long_about = None)]
pub struct Cli {
    /// TOML config file (default: <config dir>/conductdoc/config.toml if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the documentation API.
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Origin that generated documentation links are resolved against.
    #[arg(long, global = true, value_name = "URL")]
    pub doc_origin: Option<String>,

    /// Give up on a generation request after this many seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate documentation for one repository and print the link.
    Generate {
        /// GitHub repository URL, e.g. https://github.com/user/repo.
        url: String,
    },

    /// Check that the documentation API is up.
    Health,

    /// Prompt for repository URLs until quit (the default).
    Interactive,
}

/// The "generating" notice for `generate`, withheld for input that will
/// fail validation before any request is made.
fn progress_line(url: &str) -> Option<String> {
    validate_repo_url(url)
        .ok()
        .map(|repo_url| format!("⏳ Generating documentation for {}", repo_url))
}

impl Cli {
    /// Settings given on the command line, the highest config layer.
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            api_base: self.api_base.clone(),
            doc_origin: self.doc_origin.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Runs the selected command. `Ok(false)` means the command itself
    /// failed (a rejected or failed generation, an unhealthy backend).
    pub async fn run(self) -> Result<bool> {
        let config = AppConfig::load(self.config.as_deref(), self.overrides())?;
        log::debug!("loaded config: {:?}", config);

        let backend = HttpBackend::from_config(&config);

        match self.command.unwrap_or(CliCommand::Interactive) {
            CliCommand::Generate { url } => {
                let form = SubmissionController::new(backend, config.timeout());
                if let Some(line) = progress_line(&url) {
                    println!("{}", line);
                }
                let outcome = form.submit(&url).await;
                let state = form.snapshot().await;
                print!("{}", FormView::from_state(&state, &config.doc_origin));
                Ok(outcome.is_success())
            }
            CliCommand::Health => match backend.health().await {
                Ok(report) => {
                    repl::print_health(&report);
                    Ok(true)
                }
                Err(e) => {
                    println!("❌ Health check failed: {}", e);
                    Ok(false)
                }
            },
            CliCommand::Interactive => {
                banner::print_banner();
                println!("📡 Documentation API: {}", config.api_base);
                let form = SubmissionController::new(backend, config.timeout());
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                repl::run_interactive(&form, &config.doc_origin, stdin).await?;
                Ok(true)
            }
        }
    }
}
