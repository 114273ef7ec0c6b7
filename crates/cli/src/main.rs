// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `tg`: decide whether the surrounding CI job may be skipped because the
//! watched tree already passed in an earlier job.

mod color;
mod env;
mod exit;

use clap::Parser;
use std::time::Instant;
use tg_adapters::{GitCliAdapter, GitlabArtifactFetcher, GitlabJobsClient};
use tg_core::{GateConfig, Strategy};
use tg_engine::{Gate, LocalLogStore, Outcome, RemoteJobScan};
use tg_history::HistoryLog;

const LONG_ABOUT: &str = "\
Fingerprints the paths named in SKIP_IF_TREE_OK_IN_PAST at HEAD and exits 0
when the same fingerprint already passed this job in the past.

Intended use in .gitlab-ci.yml:

    script:
      - tg && exit 0
      - make test

Exit codes: 0 skip, 1 fatal error, 2 no prior success, 3 recorded or forced
no-skip, 5 empty tree listing, 6 configuration error.";

#[derive(Parser)]
#[command(name = "tg", version, styles = color::styles(),
    about = "Skip a CI job when its tree already passed", long_about = LONG_ABOUT)]
struct Cli {
    /// History strategy (defaults to SKIP_CI_STRATEGY, then remote)
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Do not restore artifacts from the matched job
    #[arg(long)]
    no_artifact: bool,
    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StrategyArg {
    /// Scan the project's successful jobs via the CI API
    Remote,
    /// Search a bounded history log kept in the CI cache
    Local,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Remote => Strategy::Remote,
            StrategyArg::Local => Strategy::Local,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let overrides = env::Overrides {
        strategy: cli.strategy.map(Strategy::from),
        no_artifact: cli.no_artifact,
        verbose: cli.verbose,
    };
    let config = match env::from_env(&overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", color::failure(&format!("❌ {e}")));
            return exit::CONFIG_ERROR;
        }
    };
    init_tracing(config.verbose);

    let started = Instant::now();
    let result = decide(&config).await;
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "decision finished");

    match result {
        Ok(outcome) => {
            report(&outcome);
            exit::code(&outcome)
        }
        Err(e) => {
            eprintln!("{}", color::failure(&format!("❌ {e:#}")));
            exit::FATAL
        }
    }
}

/// Wire the gate for the configured strategy and run one decision cycle.
///
/// Remote credentials may legitimately be absent here: the gate validates
/// them itself, after the override and marker short-circuits.
async fn decide(config: &GateConfig) -> anyhow::Result<Outcome> {
    let tree = GitCliAdapter::new(&config.project_dir);
    let artifacts = GitlabArtifactFetcher::new(
        config.api_base_url.as_deref().unwrap_or_default(),
        &config.project_id,
        config.job_token.as_deref().unwrap_or_default(),
        &config.project_dir,
    )?;
    match config.strategy {
        Strategy::Local => {
            let store = LocalLogStore::new(HistoryLog::new(config.history_path()));
            Ok(Gate::new(tree, store, artifacts).decide(config).await?)
        }
        Strategy::Remote => {
            let api = GitlabJobsClient::new(
                config.jobs_api_url().unwrap_or_default(),
                config.read_token.clone().unwrap_or_default(),
            );
            let store = RemoteJobScan::new(
                api,
                tree.clone(),
                config.job_name.as_str(),
                config.ref_name.clone(),
                config.paths.clone(),
                config.limits,
            );
            Ok(Gate::new(tree, store, artifacts).decide(config).await?)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "tg=debug,tg_engine=debug,tg_adapters=debug,tg_history=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Skip { matched: Some(matched) } => {
            let job = matched.web_url.as_deref().unwrap_or(&matched.id);
            println!("{}", color::success(&format!("✅ Tree found in job {job}, skipping")));
        }
        Outcome::Skip { matched: None } => {
            println!("{}", color::success("✅ Skip already recorded for this job"));
        }
        Outcome::SkipArtifactFailed { matched } => {
            println!(
                "{}",
                color::success(&format!(
                    "✅ Tree found in job {}, skipping (artifact restore failed)",
                    matched.id
                ))
            );
        }
        Outcome::NoSkipCached => {
            println!("{}", color::failure("❌ No-skip already recorded for this job"));
        }
        Outcome::NotFound => {
            println!("{}", color::failure("❌ Tree not found in past successful jobs"));
        }
        Outcome::TreeEmpty => {
            println!("{}", color::failure("❌ Tree listing is empty for the configured paths"));
        }
        Outcome::ConfigError(e) => {
            eprintln!("{}", color::failure(&format!("❌ {e}")));
        }
    }
}
