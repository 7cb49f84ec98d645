use std::path::PathBuf;

use geosave_core::api::GeoGuessrClient;
use geosave_core::{FileCheckpointStore, RunGuard, SyncConfig, SyncEngine};

use crate::auth::{resolve_session_cookie, CookieSource};
use crate::commands::common::{
    destination_from_env, format_failure_lines, format_summary, load_profile,
    resolve_configured_destination,
};
use crate::config_profiles::CliProfilesConfig;
use crate::destination::{acquire_destination, default_prompt};
use crate::error::CliError;
use crate::notify::ConsoleNotifier;

pub async fn run_sync(
    profile_name: Option<&str>,
    dir: Option<PathBuf>,
    max_pages: Option<u32>,
    no_delay: bool,
) -> Result<(), CliError> {
    let resolved = load_profile(profile_name)?;
    let Some((cookie, source)) = resolve_session_cookie(&resolved.name)? else {
        return Err(CliError::NotAuthenticated);
    };
    if source == CookieSource::Environment {
        tracing::debug!("Using session cookie from environment");
    }

    let endpoints = resolved.profile.endpoints().map_err(CliError::Config)?;
    let client = GeoGuessrClient::new(endpoints.clone(), &cookie)?;

    let from_flag = dir.is_some();
    let configured =
        resolve_configured_destination(dir, destination_from_env(), &resolved.profile);
    let destination = acquire_destination(configured, default_prompt().as_mut())?;
    if destination.reselected && !from_flag {
        remember_destination(
            resolved.config,
            &resolved.name,
            destination.store.root().to_path_buf(),
        );
    }

    let _guard = RunGuard::acquire(destination.store.root())?;
    let checkpoints = FileCheckpointStore::new(destination.store.root());
    let mut config = SyncConfig {
        endpoints,
        max_pages,
        ..SyncConfig::default()
    };
    if no_delay {
        config = config.without_delays();
    }

    let summary = SyncEngine::new(
        &client,
        &checkpoints,
        &destination.store,
        &ConsoleNotifier,
        config,
    )
    .run()
    .await?;

    println!("{}", format_summary(&summary));
    for line in format_failure_lines(&summary) {
        eprintln!("{line}");
    }
    Ok(())
}

fn remember_destination(
    mut config: CliProfilesConfig,
    profile_name: &str,
    destination: PathBuf,
) {
    config.profile_mut_or_default(profile_name).destination = Some(destination);
    match config.save() {
        Ok(path) => tracing::info!("Saved destination to {}", path.display()),
        Err(error) => tracing::warn!("Could not save destination to profile: {error}"),
    }
}
