//! Workspace automation: `cargo xtask <task> [args]`
//!
//! Every task shells out to cargo; output goes straight to the terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::{bail, Context, Result};

mod features;

/// Tasks that map onto a single cargo invocation
const CARGO_TASKS: &[(&str, &[&str], &str)] = &[
    ("fmt", &["fmt", "--all", "--", "--check"], "Check formatting"),
    (
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"],
        "Lint every crate and test target",
    ),
    ("test", &["test", "--workspace", "--all-features"], "Run unit and integration tests"),
];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        None | Some("help") => {
            print_help();
            Ok(())
        }
        Some("ci") => run_ci(),
        Some("test-features") => features::test_feature_matrix(),
        Some("smoke") => run_smoke(&args[1..]),
        Some(task) => match CARGO_TASKS.iter().find(|(name, ..)| *name == task) {
            Some((_, cargo_args, _)) => cargo(cargo_args),
            None => {
                print_help();
                Err(anyhow::anyhow!("unknown task '{task}'"))
            }
        },
    };

    if let Err(e) = result {
        eprintln!("xtask: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_help() {
    println!("cargo xtask <TASK>\n");
    for (name, _, about) in CARGO_TASKS {
        println!("    {name:<14} {about}");
    }
    println!("    {:<14} Check each SDK crate with and without test-utils", "test-features");
    println!("    {:<14} fmt, clippy, test-features and test in sequence", "ci");
    println!("    {:<14} Query a live gateway: smoke <id> (reads PLACETOPAY_* / .env)", "smoke");
}

fn run_ci() -> Result<()> {
    for (name, cargo_args, _) in CARGO_TASKS.iter().take(2) {
        println!("==> {name}");
        cargo(cargo_args)?;
    }
    println!("==> test-features");
    features::test_feature_matrix()?;
    println!("==> test");
    cargo(CARGO_TASKS[2].1)
}

/// Run the points CLI against whatever gateway the environment points at
fn run_smoke(args: &[String]) -> Result<()> {
    let Some(id) = args.first() else {
        bail!("usage: cargo xtask smoke <id>");
    };
    cargo(&["run", "-p", "placetopay-infra", "--bin", "placetopay-points", "--", id.as_str()])
}

/// Run `cargo <args>` and fail unless it exits successfully
pub fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()))
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;

    if !status.success() {
        bail!("cargo {} exited with {status}", args.join(" "));
    }
    Ok(())
}
