// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`GateConfig`] from the CI environment.
//!
//! All environment reads happen here, once, at startup. Flags win over
//! environment variables for the knobs both can set.

use tg_core::{ConfigError, Decision, GateConfig, ScanLimits, Strategy};

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub strategy: Option<Strategy>,
    pub no_artifact: bool,
    pub verbose: bool,
}

pub fn from_env(overrides: &Overrides) -> Result<GateConfig, ConfigError> {
    from_lookup(|name| std::env::var(name).ok(), overrides)
}

/// Build the config from an arbitrary variable lookup. Test seam.
pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
    overrides: &Overrides,
) -> Result<GateConfig, ConfigError> {
    let required = |name: &'static str| {
        lookup(name).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing(name))
    };
    let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());
    let truthy = |name: &str| lookup(name).is_some_and(|v| v == "true");

    let strategy = overrides.strategy.unwrap_or(match lookup("SKIP_CI_STRATEGY").as_deref() {
        Some("local") => Strategy::Local,
        _ => Strategy::Remote,
    });

    // Any non-empty value forces a decision; only the literal "true" forces
    // a skip.
    let forced = optional("SKIP_CI_VALUE")
        .map(|v| if v == "true" { Decision::Skip } else { Decision::Run });

    let paths = lookup("SKIP_IF_TREE_OK_IN_PAST")
        .unwrap_or_default()
        .split_whitespace()
        .map(String::from)
        .collect();

    Ok(GateConfig {
        project_dir: required("CI_PROJECT_DIR")?.into(),
        project_id: required("CI_PROJECT_ID")?,
        job_id: required("CI_JOB_ID")?,
        job_name: required("CI_JOB_NAME")?,
        ref_name: optional("CI_COMMIT_REF_NAME"),
        paths,
        strategy,
        api_base_url: optional("CI_API_V4_URL"),
        read_token: optional("API_READ_TOKEN"),
        job_token: optional("CI_JOB_TOKEN"),
        forced,
        fetch_artifacts: !(overrides.no_artifact || truthy("SKIP_CI_NO_ARTIFACT")),
        verbose: overrides.verbose || truthy("SKIP_CI_VERBOSE"),
        limits: ScanLimits::default(),
    })
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
