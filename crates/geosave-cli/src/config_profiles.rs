//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use geosave_core::config::SyncEndpoints;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub game_server_base_url: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("geosave").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    geosave_core::util::normalize_text_option(value)
}

pub fn normalize_profile_name(value: Option<&str>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn normalize_path_option(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !path.as_os_str().is_empty())
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        if let Some(profile) = normalize_profile_name(explicit) {
            return profile;
        }
        if let Some(profile) =
            normalize_profile_name(std::env::var("GEOSAVE_PROFILE").ok().as_deref())
        {
            return profile;
        }
        if let Some(profile) = normalize_profile_name(self.active_profile.as_deref()) {
            return profile;
        }
        "default".to_string()
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_profile_name(self.active_profile.as_deref());
        for profile in self.profiles.values_mut() {
            profile.normalize();
        }
    }
}

impl CliProfile {
    /// Remote endpoints for this profile, defaulting to the public APIs.
    pub fn endpoints(&self) -> Result<SyncEndpoints, String> {
        SyncEndpoints::from_overrides(
            self.api_base_url.clone(),
            self.game_server_base_url.clone(),
        )
        .map_err(|error| error.to_string())
    }

    fn normalize(&mut self) {
        self.destination = normalize_path_option(self.destination.take());
        self.api_base_url = normalize_text_option(self.api_base_url.take());
        self.game_server_base_url = normalize_text_option(self.game_server_base_url.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_profile_name_rejects_empty() {
        assert_eq!(normalize_profile_name(None), None);
        assert_eq!(normalize_profile_name(Some(" ")), None);
    }

    #[test]
    fn config_roundtrip_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = CliProfilesConfig {
            version: 1,
            active_profile: Some(" default ".to_string()),
            profiles: BTreeMap::new(),
        };
        config.profiles.insert(
            "default".to_string(),
            CliProfile {
                destination: Some(PathBuf::from("/data/geoguessr")),
                api_base_url: Some(" http://localhost:9000/api ".to_string()),
                game_server_base_url: Some("  ".to_string()),
            },
        );

        config.save_to_path(&path).unwrap();
        let loaded = CliProfilesConfig::load_from_path(&path).unwrap();
        let profile = loaded.profile("default").unwrap();
        assert_eq!(loaded.active_profile.as_deref(), Some("default"));
        assert_eq!(
            profile.destination.as_deref(),
            Some(Path::new("/data/geoguessr"))
        );
        assert_eq!(
            profile.api_base_url.as_deref(),
            Some("http://localhost:9000/api")
        );
        assert_eq!(profile.game_server_base_url, None);
    }

    #[test]
    fn missing_config_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CliProfilesConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, CliProfilesConfig::default());
    }

    #[test]
    fn resolve_profile_name_prefers_explicit_then_active() {
        let config = CliProfilesConfig {
            version: 1,
            active_profile: Some("work".to_string()),
            profiles: BTreeMap::new(),
        };
        assert_eq!(config.resolve_profile_name(Some("laptop")), "laptop");
        if std::env::var("GEOSAVE_PROFILE").is_err() {
            assert_eq!(config.resolve_profile_name(None), "work");
        }
    }

    #[test]
    fn profile_endpoints_validate_overrides() {
        let profile = CliProfile {
            api_base_url: Some("localhost".to_string()),
            ..CliProfile::default()
        };
        assert!(profile.endpoints().is_err());
        assert!(CliProfile::default().endpoints().is_ok());
    }
}
