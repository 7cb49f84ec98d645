use std::env;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use geosave_core::SyncSummary;

use crate::config_profiles::{normalize_path_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Environment override for the destination folder.
pub const DESTINATION_ENV: &str = "GEOSAVE_DESTINATION";

/// Loaded config with the profile selected for this invocation.
pub struct ResolvedProfile {
    pub config: CliProfilesConfig,
    pub name: String,
    pub profile: CliProfile,
}

pub fn load_profile(explicit: Option<&str>) -> Result<ResolvedProfile, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let name = config.resolve_profile_name(explicit);
    let profile = config.profile(&name).cloned().unwrap_or_default();
    Ok(ResolvedProfile {
        config,
        name,
        profile,
    })
}

/// Destination precedence: flag, then environment, then profile.
pub fn resolve_configured_destination(
    flag: Option<PathBuf>,
    env_value: Option<String>,
    profile: &CliProfile,
) -> Option<PathBuf> {
    normalize_path_option(flag)
        .or_else(|| {
            env_value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| profile.destination.clone())
}

pub fn destination_from_env() -> Option<String> {
    env::var(DESTINATION_ENV).ok()
}

pub fn format_summary(summary: &SyncSummary) -> String {
    format!(
        "{} discovered, {} saved, {} skipped, {} failed (latest: {})",
        summary.discovered,
        summary.saved,
        summary.skipped,
        summary.failed(),
        summary.checkpoint
    )
}

pub fn format_failure_lines(summary: &SyncSummary) -> Vec<String> {
    summary
        .failures
        .iter()
        .map(|failure| format!("  {}: {}", failure.id, failure.reason))
        .collect()
}

pub fn format_modified_time(modified: SystemTime) -> String {
    DateTime::<Utc>::from(modified)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}
