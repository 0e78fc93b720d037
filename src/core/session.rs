use crate::api::client::{DEFAULT_QUERY_TIMEOUT_SECS, LookerClient};
use crate::api::models::SessionUpdate;
use crate::core::services::traits::LookerApi;
use crate::error::{AppError, ConfigError};
use crate::utils::url::build_api_root;
use crate::utils::validation::{validate_api_version, validate_non_empty, validate_url};
use std::fmt;

pub const DEFAULT_PORT: u16 = 19999;
pub const DEFAULT_API_VERSION: &str = "3.1";

/// Everything needed to open a dev-mode session on one branch
#[derive(Clone, PartialEq)]
pub struct ConnectionSettings {
    pub base_url: String,
    pub port: u16,
    pub api_version: String,
    pub client_id: String,
    pub client_secret: String,
    pub project: String,
    pub branch: String,
    pub query_timeout_secs: u64,
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("base_url", &self.base_url)
            .field("port", &self.port)
            .field("api_version", &self.api_version)
            .field("client_id", &self.client_id)
            .field("client_secret", &"*****")
            .field("project", &self.project)
            .field("branch", &self.branch)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .finish()
    }
}

impl ConnectionSettings {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        project: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            port: DEFAULT_PORT,
            api_version: DEFAULT_API_VERSION.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            project: project.into(),
            branch: branch.into(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.base_url)?;
        validate_api_version(&self.api_version)?;
        validate_non_empty("client_id", &self.client_id)?;
        validate_non_empty("client_secret", &self.client_secret)?;
        validate_non_empty("project", &self.project)?;
        validate_non_empty("branch", &self.branch)?;
        Ok(())
    }

    pub fn api_root(&self) -> Result<String, ConfigError> {
        build_api_root(&self.base_url, self.port, &self.api_version)
    }

    /// HTTP client pointed at this instance's API root
    pub fn client(&self) -> Result<LookerClient, AppError> {
        let root = self.api_root()?;
        Ok(LookerClient::new(root)?.with_query_timeout(self.query_timeout_secs))
    }
}

/// An authenticated dev-mode session with the target branch checked out
pub struct Session<A: LookerApi> {
    api: A,
    project: String,
    branch: String,
}

impl<A: LookerApi> Session<A> {
    /// Authenticate, switch to the dev workspace, then check out the branch
    pub async fn connect(mut api: A, settings: &ConnectionSettings) -> Result<Self, AppError> {
        log::info!("Authenticating Looker credentials.");
        api.login(&settings.client_id, &settings.client_secret)
            .await?;

        log::info!("Updating session to use development workspace.");
        api.update_session(&SessionUpdate::dev()).await?;

        log::info!("Setting git branch to: {}", settings.branch);
        api.update_git_branch(&settings.project, &settings.branch)
            .await?;

        Ok(Self {
            api,
            project: settings.project.clone(),
            branch: settings.branch.clone(),
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}
