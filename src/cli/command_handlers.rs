use crate::cli::main_types::{ConfigCommands, ProfileArgs};
use crate::core::services::config_service::ConfigService;
use crate::core::services::explore_service::ExploreService;
use crate::core::services::traits::LookerApi;
use crate::core::services::types::{Explore, ValidationReport};
use crate::core::services::validation_service::ValidationService;
use crate::core::session::{ConnectionSettings, Session};
use crate::display::{OperationStatus, ProgressTracker, TableDisplay, display_status};
use crate::error::{AppError, CliError};
use crate::storage::credentials::{get_client_secret, mask_secret};
use crate::utils::logging::print_verbose;

const VALIDATION_STEPS: [&str; 4] = [
    "Connecting to Looker dev workspace",
    "Enumerating explores",
    "Fetching explore dimensions",
    "Running validation queries",
];

#[derive(Default)]
pub struct ValidateHandler;

impl ValidateHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, settings: ConnectionSettings, verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, &format!("Resolved settings: {:?}", settings));

        let client = settings.client()?;
        let report = self.run(client, &settings).await?;

        let display = TableDisplay::new();
        println!("{}", display.render_validation_report(&report));
        println!("{}", display.render_summary(&report));

        if report.has_errors() {
            println!("{}", display.render_failures(&report));
            display_status(
                &format!("SQL errors found on branch '{}'", settings.branch),
                OperationStatus::Error,
            );
        } else if report.total() == 0 {
            display_status(
                &format!("No explores found for project '{}'", settings.project),
                OperationStatus::Warning,
            );
        } else {
            display_status("All explores passed", OperationStatus::Success);
        }

        report.ensure_passed()?;
        Ok(())
    }

    /// Connect, enumerate, fetch dimensions and validate, in that order
    pub async fn run<A: LookerApi>(
        &self,
        api: A,
        settings: &ConnectionSettings,
    ) -> Result<ValidationReport, AppError> {
        let mut progress = ProgressTracker::new(&VALIDATION_STEPS);

        progress.next_step();
        let session = Session::connect(api, settings).await?;

        progress.next_step();
        let explore_service = ExploreService::new(session.api());
        let mut explores = explore_service.get_explores(session.project()).await?;

        progress.next_step();
        explore_service.get_dimensions(&mut explores).await?;

        progress.next_step();
        let report = ValidationService::new(session.api())
            .validate_explores(explores)
            .await?;

        Ok(report)
    }
}

#[derive(Default)]
pub struct ExploresHandler;

impl ExploresHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, settings: ConnectionSettings, verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, &format!("Resolved settings: {:?}", settings));

        let explores = self.run(settings.client()?, &settings).await?;
        println!("{}", TableDisplay::new().render_explore_list(&explores));
        Ok(())
    }

    pub async fn run<A: LookerApi>(
        &self,
        api: A,
        settings: &ConnectionSettings,
    ) -> Result<Vec<Explore>, AppError> {
        let session = Session::connect(api, settings).await?;
        let explore_service = ExploreService::new(session.api());
        let mut explores = explore_service.get_explores(session.project()).await?;
        explore_service.get_dimensions(&mut explores).await?;
        Ok(explores)
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        profile: Option<&str>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command using ConfigService");
                println!("{}", self.render_show(config_service));
                Ok(())
            }
            ConfigCommands::Set(args) => {
                let name = config_service.active_profile_name(profile);
                self.apply_set(config_service, &name, &args, verbose)?;
                config_service.save_config()?;
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }

    fn apply_set(
        &self,
        config_service: &mut ConfigService,
        profile: &str,
        args: &ProfileArgs,
        verbose: bool,
    ) -> Result<(), AppError> {
        let fields = args.fields();
        if fields.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "No configuration values provided. Use --base-url, --port, --api-version, --client-id, --project, --branch or --query-timeout".to_string(),
            )));
        }

        let mut updated = Vec::new();
        for (field, value) in fields {
            print_verbose(
                verbose,
                &format!("Setting {} = {} on profile {}", field, value, profile),
            );
            config_service.set_profile_field(profile, field, &value)?;
            updated.push(format!("{} to: {}", field, value));
        }

        println!("✅ Set profile '{}' {}", profile, updated.join(", "));
        Ok(())
    }

    pub fn render_show(&self, config_service: &ConfigService) -> String {
        let mut out = String::new();
        out.push_str("Current Configuration:\n");
        out.push_str("=====================\n");
        out.push_str(&format!(
            "Default Profile: {}\n",
            config_service.get_default_profile()
        ));

        match get_client_secret() {
            Some(secret) => out.push_str(&format!(
                "Client Secret: ✅ Set (LOOKER_CLIENT_SECRET = {})\n",
                mask_secret(&secret)
            )),
            None => out.push_str("Client Secret: ❌ Not set (LOOKER_CLIENT_SECRET)\n"),
        }

        out.push_str("\nProfiles:\n");
        let profiles = config_service.list_profiles();
        if profiles.is_empty() {
            out.push_str("  No profiles configured\n");
        }
        for (name, profile) in profiles {
            out.push_str(&format!("  [{}]\n", name));
            let fields = [
                ("URL", profile.base_url.clone()),
                ("Port", profile.port.map(|p| p.to_string())),
                ("API Version", profile.api_version.clone()),
                ("Client ID", profile.client_id.clone()),
                ("Project", profile.project.clone()),
                ("Branch", profile.branch.clone()),
                (
                    "Query Timeout",
                    profile.query_timeout_seconds.map(|s| format!("{} seconds", s)),
                ),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    out.push_str(&format!("    {}: {}\n", label, value));
                }
            }
        }

        out
    }
}
