use std::path::PathBuf;

use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_path_option, normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            destination,
            api_base_url,
            game_server_url,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            destination,
            api_base_url,
            game_server_url,
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    destination: Option<PathBuf>,
    api_base_url: Option<String>,
    game_server_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    apply_profile_updates(
        &mut config,
        &profile_name,
        destination,
        api_base_url,
        game_server_url,
        !no_activate,
    )?;

    let path = config.save().map_err(CliError::Config)?;
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}

/// Merge explicit values into a profile, validating the resulting endpoints.
pub fn apply_profile_updates(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    destination: Option<PathBuf>,
    api_base_url: Option<String>,
    game_server_url: Option<String>,
    activate: bool,
) -> Result<(), CliError> {
    let profile = config.profile_mut_or_default(profile_name);
    if let Some(destination) = normalize_path_option(destination) {
        let destination = if destination.is_absolute() {
            destination
        } else {
            std::env::current_dir()?.join(destination)
        };
        profile.destination = Some(destination);
    }
    if let Some(url) = normalize_text_option(api_base_url) {
        profile.api_base_url = Some(url);
    }
    if let Some(url) = normalize_text_option(game_server_url) {
        profile.game_server_base_url = Some(url);
    }
    profile.endpoints().map_err(CliError::Config)?;

    if activate {
        config.active_profile = Some(profile_name.to_string());
    }
    Ok(())
}

fn run_config_show(global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let endpoints = profile.endpoints().map_err(CliError::Config)?;

    println!("Profile: {profile_name}");
    println!(
        "Destination: {}",
        profile
            .destination
            .as_deref()
            .map_or_else(|| "(not set)".to_string(), |path| path.display().to_string())
    );
    println!("API: {}", endpoints.api_base_url);
    println!("Game server: {}", endpoints.game_server_base_url);
    Ok(())
}
