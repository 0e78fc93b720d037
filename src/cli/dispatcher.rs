use crate::cli::command_handlers::{ConfigHandler, ExploresHandler, ValidateHandler};
use crate::cli::main_types::{Commands, ConnectionArgs};
use crate::core::services::config_service::{ConfigService, SettingsOverrides};
use crate::core::session::ConnectionSettings;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use std::path::PathBuf;

pub struct Dispatcher {
    config_service: ConfigService,
    profile: Option<String>,
    verbose: bool,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    /// `config_path` of None means the default config location
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            config_service: ConfigService::new(config, config_path),
            profile,
            verbose,
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Validate(args) => {
                self.log_verbose("Attempting validate command");
                let settings = self.resolve(args)?;
                ValidateHandler::new().handle(settings, self.verbose).await
            }
            Commands::Explores(args) => {
                self.log_verbose("Attempting explores command");
                let settings = self.resolve(args)?;
                ExploresHandler::new().handle(settings, self.verbose).await
            }
            Commands::Config { command } => {
                let profile = self.profile.clone();
                ConfigHandler::new().handle(
                    command,
                    &mut self.config_service,
                    profile.as_deref(),
                    self.verbose,
                )
            }
        }
    }

    fn resolve(&self, args: ConnectionArgs) -> Result<ConnectionSettings, AppError> {
        let name = self
            .config_service
            .active_profile_name(self.profile.as_deref());
        self.log_verbose(&format!("Using profile: {}", name));

        let overrides = SettingsOverrides::from(args);
        Ok(self
            .config_service
            .resolve_settings(self.profile.as_deref(), &overrides)?)
    }
}
