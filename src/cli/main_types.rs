use crate::core::services::config_service::SettingsOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fonz")]
#[command(about = "Validate every Looker explore on a development branch")]
#[command(version)]
#[command(after_help = "Examples:
  fonz validate --branch feature/new-dims         # Validate a branch (creds from env)
  fonz validate --profile prod --branch my-branch # Use a saved profile
  fonz explores --branch master                   # List explores and dimension counts
  fonz config set --base-url https://company.looker.com --project analytics
  fonz config show

Environment Variables:
  LOOKER_BASE_URL        Looker instance URL
  LOOKER_PORT            API port (default: 19999)
  LOOKER_API_VERSION     API version (default: 3.1)
  LOOKER_CLIENT_ID       API3 client id
  LOOKER_CLIENT_SECRET   API3 client secret
  LOOKER_PROJECT         LookML project name
  LOOKER_BRANCH          Git branch to validate

Exit status: 0 all explores passed, 1 an explore returned a SQL error, 2 any other failure")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Profile name to use (default: the config's default profile)
    #[arg(short, long, global = true, env = "FONZ_PROFILE")]
    pub profile: Option<String>,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a query with every dimension of every explore and report SQL errors
    Validate(ConnectionArgs),
    /// List the project's explores and their dimension counts
    Explores(ConnectionArgs),
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Connection settings; each one overrides the active profile
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Looker instance URL, e.g. https://company.looker.com
    #[arg(long, env = "LOOKER_BASE_URL")]
    pub base_url: Option<String>,

    /// API port (default: 19999)
    #[arg(long, env = "LOOKER_PORT")]
    pub port: Option<u16>,

    /// API version (default: 3.1)
    #[arg(long, env = "LOOKER_API_VERSION")]
    pub api_version: Option<String>,

    /// API3 client id
    #[arg(long, env = "LOOKER_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API3 client secret
    #[arg(long, env = "LOOKER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// LookML project name
    #[arg(long, env = "LOOKER_PROJECT")]
    pub project: Option<String>,

    /// Git branch to check out in the dev workspace
    #[arg(long, env = "LOOKER_BRANCH")]
    pub branch: Option<String>,

    /// Seconds to wait for each query to run (default: 60)
    #[arg(long)]
    pub query_timeout: Option<u64>,
}

impl From<ConnectionArgs> for SettingsOverrides {
    fn from(args: ConnectionArgs) -> Self {
        SettingsOverrides {
            base_url: args.base_url,
            port: args.port,
            api_version: args.api_version,
            client_id: args.client_id,
            client_secret: args.client_secret,
            project: args.project,
            branch: args.branch,
            query_timeout_seconds: args.query_timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set values on the active profile (--profile, default: 'default')
    #[command(after_help = "Examples:
  fonz config set --base-url https://company.looker.com --project analytics
  fonz --profile staging config set --port 443 --api-version 4.0")]
    Set(ProfileArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub api_version: Option<String>,
    #[arg(long)]
    pub client_id: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub query_timeout: Option<u64>,
}

impl ProfileArgs {
    /// (field, value) pairs for every value that was given
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(v) = &self.base_url {
            fields.push(("base_url", v.clone()));
        }
        if let Some(v) = self.port {
            fields.push(("port", v.to_string()));
        }
        if let Some(v) = &self.api_version {
            fields.push(("api_version", v.clone()));
        }
        if let Some(v) = &self.client_id {
            fields.push(("client_id", v.clone()));
        }
        if let Some(v) = &self.project {
            fields.push(("project", v.clone()));
        }
        if let Some(v) = &self.branch {
            fields.push(("branch", v.clone()));
        }
        if let Some(v) = self.query_timeout {
            fields.push(("query_timeout", v.to_string()));
        }
        fields
    }
}
