use crate::AppError;
use crate::core::session::{ConnectionSettings, DEFAULT_API_VERSION, DEFAULT_PORT};
use crate::api::client::DEFAULT_QUERY_TIMEOUT_SECS;
use crate::error::{CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::utils::validation::{validate_api_version, validate_url};
use std::path::PathBuf;

pub const DEFAULT_PROFILE: &str = "default";

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub port: Option<u16>,
    pub api_version: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub project: Option<String>,
    pub branch: Option<String>,
    pub query_timeout_seconds: Option<u64>,
}

/// Configuration service for managing connection profiles
pub struct ConfigService {
    config: Config,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// `path` of None means the default config location
    pub fn new(config: Config, path: Option<PathBuf>) -> Self {
        Self { config, path }
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.config.get_profile(name)
    }

    /// Explicit name > configured default > "default"
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| self.config.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    pub fn get_default_profile(&self) -> String {
        self.active_profile_name(None)
    }

    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        self.config.profiles.iter().collect()
    }

    /// Set one profile field by its user-facing name
    pub fn set_profile_field(
        &mut self,
        profile: &str,
        field: &str,
        value: &str,
    ) -> Result<(), AppError> {
        let entry = self.config.profiles.entry(profile.to_string()).or_default();

        match field {
            "base_url" => {
                validate_url(value)?;
                entry.base_url = Some(value.to_string());
            }
            "port" => entry.port = Some(parse_field("port", value)?),
            "api_version" => {
                validate_api_version(value)?;
                entry.api_version = Some(value.to_string());
            }
            "client_id" => entry.client_id = Some(value.to_string()),
            "project" => entry.project = Some(value.to_string()),
            "branch" => entry.branch = Some(value.to_string()),
            "query_timeout" => {
                entry.query_timeout_seconds = Some(parse_field("query_timeout", value)?)
            }
            _ => {
                return Err(AppError::Cli(CliError::InvalidArguments(format!(
                    "Unknown field: {}. Use base_url, port, api_version, client_id, project, branch or query_timeout",
                    field
                ))));
            }
        }

        if self.config.default_profile.is_none() {
            self.config.default_profile = Some(profile.to_string());
        }

        Ok(())
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save(self.path.clone()).map_err(|e| e.into())
    }

    /// Merge overrides over the named profile and fill in defaults
    pub fn resolve_settings(
        &self,
        profile_name: Option<&str>,
        overrides: &SettingsOverrides,
    ) -> Result<ConnectionSettings, ConfigError> {
        let name = self.active_profile_name(profile_name);
        let empty = Profile::default();
        let profile = match self.config.get_profile(&name) {
            Some(profile) => profile,
            // Only an explicitly requested profile has to exist
            None if profile_name.is_some() => {
                return Err(ConfigError::InvalidValue {
                    field: "profile".to_string(),
                    value: name,
                    reason: "no such profile in the config file".to_string(),
                });
            }
            None => &empty,
        };

        let settings = ConnectionSettings {
            base_url: required(
                overrides.base_url.clone().or_else(|| profile.base_url.clone()),
                "base_url",
                "--base-url",
                "LOOKER_BASE_URL",
            )?,
            port: overrides.port.or(profile.port).unwrap_or(DEFAULT_PORT),
            api_version: overrides
                .api_version
                .clone()
                .or_else(|| profile.api_version.clone())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            client_id: required(
                overrides.client_id.clone().or_else(|| profile.client_id.clone()),
                "client_id",
                "--client-id",
                "LOOKER_CLIENT_ID",
            )?,
            client_secret: required(
                overrides.client_secret.clone(),
                "client_secret",
                "--client-secret",
                "LOOKER_CLIENT_SECRET",
            )?,
            project: required(
                overrides.project.clone().or_else(|| profile.project.clone()),
                "project",
                "--project",
                "LOOKER_PROJECT",
            )?,
            branch: required(
                overrides.branch.clone().or_else(|| profile.branch.clone()),
                "branch",
                "--branch",
                "LOOKER_BRANCH",
            )?,
            query_timeout_secs: overrides
                .query_timeout_seconds
                .or(profile.query_timeout_seconds)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
        };

        settings.validate()?;
        Ok(settings)
    }
}

fn required(
    value: Option<String>,
    field: &str,
    flag: &str,
    env: &str,
) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingField {
            field: field.to_string(),
            hint: format!(
                "Pass {} or set {} (or add it to the profile with 'fonz config set')",
                flag, env
            ),
        })
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
