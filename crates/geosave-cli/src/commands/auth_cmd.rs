use crate::auth::{normalize_cookie, resolve_session_cookie, CookieSource, SessionCookieStore};
use crate::cli::AuthCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    match command {
        AuthCommands::Login { profile, cookie } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            let cookie = normalize_cookie(&cookie)?;
            SessionCookieStore::new(&profile_name).save(&cookie)?;
            println!("Stored session cookie for profile '{profile_name}'");
        }
        AuthCommands::Status { profile } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            let source = resolve_session_cookie(&profile_name)?.map(|(_, source)| source);
            println!("{}", auth_status_line(&profile_name, source));
        }
        AuthCommands::Logout { profile } => {
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            SessionCookieStore::new(&profile_name).clear()?;
            println!("Removed session cookie for profile '{profile_name}'");
        }
    }
    Ok(())
}

pub fn auth_status_line(profile_name: &str, source: Option<CookieSource>) -> String {
    match source {
        Some(CookieSource::Environment) => {
            format!("Profile '{profile_name}': using session cookie from environment")
        }
        Some(CookieSource::Keychain) => {
            format!("Profile '{profile_name}': session cookie stored in keychain")
        }
        None => format!("Profile '{profile_name}': not logged in"),
    }
}
