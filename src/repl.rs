// src/repl.rs
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::backend::DocsBackend;
use crate::errors::Result;
use crate::form::{SubmissionController, validate_repo_url};
use crate::models::HealthReport;
use crate::view::FormView;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Reset,
    Show,
    Health,
    Help,
    Quit,
}

/// Anything that is not a known keyword is taken as a URL, so a bare Enter
/// submits an empty input just like pressing the button on an empty form.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "reset" | "clear" => Command::Reset,
        "show" | "status" => Command::Show,
        "health" => Command::Health,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => match trimmed.strip_prefix("submit") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                Command::Submit(rest.to_string())
            }
            _ => Command::Submit(line.to_string()),
        },
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  <url> | submit <url>   generate documentation for a GitHub repository");
    println!("  reset                  clear the form");
    println!("  show                   show the current form state");
    println!("  health                 check that the documentation API is up");
    println!("  help                   this text");
    println!("  quit                   leave");
}

pub fn print_health(report: &HealthReport) {
    println!("✅ Backend status: {}", report.status);
    for (service, state) in &report.services {
        println!("   {}: {}", service, state);
    }
}

async fn show<B: DocsBackend + 'static>(form: &SubmissionController<B>, doc_origin: &str) {
    let state = form.snapshot().await;
    print!("{}", FormView::from_state(&state, doc_origin));
}

/// Runs the prompt until `quit` or end of input.
pub async fn run_interactive<B, R>(
    form: &SubmissionController<B>,
    doc_origin: &str,
    input: R,
) -> Result<()>
where
    B: DocsBackend + 'static,
    R: AsyncBufRead + Unpin,
{
    print_help();
    let mut lines = input.lines();

    loop {
        println!("\n🔗 GitHub Repository URL:");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Submit(url) => {
                if validate_repo_url(&url).is_ok() {
                    println!("⏳ Generating... (up to {}s)", form.timeout().as_secs());
                }
                form.submit(&url).await;
                show(form, doc_origin).await;
            }
            Command::Reset => {
                form.reset().await;
                println!("🧹 Form cleared");
            }
            Command::Show => show(form, doc_origin).await,
            Command::Health => match form.backend().health().await {
                Ok(report) => print_health(&report),
                Err(e) => println!("❌ Health check failed: {}", e),
            },
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }

    println!("👋 Bye");
    Ok(())
}
