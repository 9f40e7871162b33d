//! hc-migrate - add the agent_name column to every tenant schema

use anyhow::Result;
use clap::Parser;
use hc_core::RunSummary;

mod cli;
mod context;
mod migrate;
mod report;

use cli::Cli;
use context::RuntimeContext;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match RuntimeContext::new(&cli) {
        Ok(ctx) => migrate::execute(&ctx).await,
        Err(e) => Err(e),
    };

    match &outcome {
        Ok(summary) if summary.is_success() => {}
        Ok(summary) => log::error!(
            "{} schema(s) failed; re-run after fixing them, completed schemas will be skipped",
            summary.failed
        ),
        Err(e) => eprintln!("FATAL: {:#}", e),
    }

    std::process::exit(exit_code(&outcome));
}

/// 0 when every schema succeeded; 1 on any per-schema failure or fatal error
fn exit_code(outcome: &Result<RunSummary>) -> i32 {
    match outcome {
        Ok(summary) if summary.is_success() => 0,
        _ => 1,
    }
}
