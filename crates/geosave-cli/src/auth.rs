//! Session cookie storage with secure keychain persistence.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use crate::config_profiles::normalize_text_option;
use crate::error::CliError;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "geosave-cli";

/// Environment override for the stored cookie.
pub const SESSION_COOKIE_ENV: &str = "GEOSAVE_NCFA";

/// Where the active session cookie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSource {
    Environment,
    Keychain,
}

#[derive(Clone)]
pub struct SessionCookieStore {
    username: String,
}

impl SessionCookieStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            username: format!("session_cookie:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry, CliError> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| CliError::Auth(error.to_string()))
    }

    #[cfg(not(test))]
    pub fn load(&self) -> Result<Option<String>, CliError> {
        match self.entry()?.get_password() {
            Ok(raw) => Ok(normalize_text_option(Some(raw))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(CliError::Auth(error.to_string())),
        }
    }

    #[cfg(test)]
    pub fn load(&self) -> Result<Option<String>, CliError> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::Auth(error.to_string()))?;
        Ok(normalize_text_option(guard.get(&self.username).cloned()))
    }

    #[cfg(not(test))]
    pub fn save(&self, cookie: &str) -> Result<(), CliError> {
        self.entry()?
            .set_password(cookie)
            .map_err(|error| CliError::Auth(error.to_string()))
    }

    #[cfg(test)]
    pub fn save(&self, cookie: &str) -> Result<(), CliError> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::Auth(error.to_string()))?;
        guard.insert(self.username.clone(), cookie.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    pub fn clear(&self) -> Result<(), CliError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(CliError::Auth(error.to_string())),
        }
    }

    #[cfg(test)]
    pub fn clear(&self) -> Result<(), CliError> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| CliError::Auth(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

/// Accept either the bare cookie value or a `_ncfa=<value>` pair.
pub fn normalize_cookie(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim();
    let value = trimmed
        .strip_prefix(geosave_core::api::SESSION_COOKIE_NAME)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or(trimmed)
        .trim()
        .trim_end_matches(';')
        .trim();
    if value.is_empty() {
        Err(CliError::EmptyCookie)
    } else {
        Ok(value.to_string())
    }
}

/// Resolve the cookie for a profile, preferring the environment override.
pub fn resolve_session_cookie(
    profile_name: &str,
) -> Result<Option<(String, CookieSource)>, CliError> {
    if let Some(cookie) = normalize_text_option(std::env::var(SESSION_COOKIE_ENV).ok()) {
        return Ok(Some((normalize_cookie(&cookie)?, CookieSource::Environment)));
    }

    Ok(SessionCookieStore::new(profile_name)
        .load()?
        .map(|cookie| (cookie, CookieSource::Keychain)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cookie_strips_name_and_separator() {
        assert_eq!(normalize_cookie(" abc123 ").unwrap(), "abc123");
        assert_eq!(normalize_cookie("_ncfa=abc123;").unwrap(), "abc123");
        assert!(matches!(normalize_cookie("_ncfa= "), Err(CliError::EmptyCookie)));
        assert!(matches!(normalize_cookie(""), Err(CliError::EmptyCookie)));
    }

    #[test]
    fn store_roundtrip_is_scoped_per_profile() {
        let work = SessionCookieStore::new("auth-test-work");
        let home = SessionCookieStore::new("auth-test-home");

        work.save("cookie-work").unwrap();
        assert_eq!(work.load().unwrap().as_deref(), Some("cookie-work"));
        assert_eq!(home.load().unwrap(), None);

        work.clear().unwrap();
        assert_eq!(work.load().unwrap(), None);
    }
}
