//! Query the loyalty points of one account.
//!
//! Run with: `placetopay-points <id>`
//!
//! Credentials come from `PLACETOPAY_*` environment variables (a `.env` file
//! is honored) or from a config file; see `placetopay_infra::config`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use placetopay_infra::{config, init_tracing, PlaceToPayClient};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("placetopay-points: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// `Ok(false)` when the gateway call did not succeed
async fn run() -> anyhow::Result<bool> {
    let Some(id) = env::args().nth(1) else {
        print_help();
        anyhow::bail!("missing <id> argument");
    };

    // A missing .env file is fine; variables may come from the environment
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = config::load().context("failed to load configuration")?;
    let client = PlaceToPayClient::new(config).context("failed to build client")?;

    let response = client.get_points(&id).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(response.is_successful())
}

fn print_help() {
    eprintln!("USAGE:");
    eprintln!("    placetopay-points <ID>");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    PLACETOPAY_CLIENT_ID, PLACETOPAY_CLIENT_SECRET,");
    eprintln!("    PLACETOPAY_REDIRECT_URL, PLACETOPAY_API_URL   (required)");
    eprintln!("    PLACETOPAY_TIMEOUT_SECONDS, PLACETOPAY_REFRESH_THRESHOLD_SECONDS");
    eprintln!("    PLACETOPAY_LOG_FORMAT=json, RUST_LOG");
}
