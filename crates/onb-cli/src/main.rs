//! Onboarding prototype driver
//!
//! - `simulate` walks concurrent sessions through sign-in, team and
//!   configuration pages and prints each final session view
//! - `defaults` prints the seed document for one environment

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use onb_core::prelude::*;
use onb_core::fields::PRODUCTION_PREFIX;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

mod walkthrough;

use walkthrough::WalkthroughReport;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Command::new("onboard-sim")
        .version(onb_core::VERSION)
        .about("Session-scoped onboarding prototype")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Onboarding configuration (TOML)"),
        )
        .arg(
            Arg::new("defaults")
                .long("defaults")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Defaults seed (TOML); the built-in seed is used otherwise"),
        )
        .subcommand(
            Command::new("simulate")
                .about("Walk sessions through the onboarding pages")
                .arg(
                    Arg::new("sessions")
                        .long("sessions")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Number of concurrent sessions"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("defaults")
                .about("Print the defaults seed")
                .arg(
                    Arg::new("production")
                        .long("production")
                        .action(ArgAction::SetTrue)
                        .help("Show production values"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("simulate", args)) => {
            let sessions = args.get_one::<usize>("sessions").copied().unwrap_or(1);
            let service = Arc::new(build_service(args)?);
            let reports = simulate(service, sessions).await?;

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    print_report(report);
                }
            }
        }
        Some(("defaults", args)) => {
            let defaults = load_defaults(args)?;
            let env = if args.get_flag("production") {
                Environment::Production
            } else {
                Environment::Integration
            };
            println!("{}", serde_json::to_string_pretty(&seed_for(&defaults, env))?);
        }
        _ => {
            tracing::warn!("No subcommand given; try --help");
        }
    }

    Ok(())
}

fn load_defaults(args: &ArgMatches) -> Result<DefaultsProvider> {
    match args.get_one::<PathBuf>("defaults") {
        Some(path) => DefaultsProvider::load(path)
            .with_context(|| format!("loading defaults from {}", path.display())),
        None => Ok(DefaultsProvider::builtin()),
    }
}

fn build_service(args: &ArgMatches) -> Result<OnboardingService> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => OnboardingConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => OnboardingConfig::new(),
    };
    Ok(OnboardingService::new(config, load_defaults(args)?))
}

async fn simulate(service: Arc<OnboardingService>, sessions: usize) -> Result<Vec<WalkthroughReport>> {
    tracing::info!(sessions, "Starting walkthroughs");

    let mut tasks = JoinSet::new();
    for n in 0..sessions {
        let service = Arc::clone(&service);
        tasks.spawn_blocking(move || (n, walkthrough::run(&service, n)));
    }

    let mut reports = Vec::with_capacity(sessions);
    while let Some(joined) = tasks.join_next().await {
        let (n, report) = joined.context("walkthrough task panicked")?;
        reports.push((n, report.with_context(|| format!("walkthrough {n} failed"))?));
    }
    reports.sort_by_key(|(n, _)| *n);

    tracing::info!(sessions = service.store().len(), "Walkthroughs finished");
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

/// Seed fields as seen from `env`, keyed by unprefixed name
fn seed_for(defaults: &DefaultsProvider, env: Environment) -> BTreeMap<&str, &FieldValue> {
    defaults
        .fields()
        .filter(|(name, _)| !name.starts_with(PRODUCTION_PREFIX))
        .filter_map(|(name, _)| defaults.field_for(env, name).map(|value| (name, value)))
        .collect()
}

fn print_report(report: &WalkthroughReport) {
    let view = &report.view;
    println!("Session {}", view.identity);
    println!("  Actor: {}", view.actor.as_deref().unwrap_or("(anonymous)"));
    println!("  Requests:");
    for step in &report.steps {
        println!("    {} -> {}", step.request, step.outcome);
    }
    println!("  Team:");
    for member in &view.team_members {
        let marker = if member.is_self { " (you)" } else { "" };
        println!("    {} [{}]{}", member.email, member.role, marker);
    }
    println!("  Audit log:");
    for entry in &view.audit_log {
        println!(
            "    {} | {} | {}",
            entry.date,
            entry.actor.as_deref().unwrap_or("-"),
            entry.action
        );
    }
    println!();
}
