use clap::Parser;
use fonz::cli::dispatcher::Dispatcher;
use fonz::cli::main_types::Cli;
use fonz::AppError;
use fonz::exit_codes;
use fonz::storage::config::Config;
use fonz::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {}", err);
        std::process::exit(exit_codes::ERROR);
    }

    let config_path = Config::path_in(cli.config_dir.as_deref());
    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(exit_codes::ERROR);
        }
    };

    if cli.verbose {
        println!("Verbose mode is enabled");
        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir.display());
        }
    }

    let mut dispatcher = Dispatcher::new(config, config_path, cli.profile, cli.verbose);
    if let Err(err) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", err.severity().emoji(), err);
        if let AppError::Api(api_error) = &err {
            eprintln!("   endpoint: {}", api_error.endpoint());
        }
        if let Some(hint) = err.troubleshooting_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(exit_codes::for_error(&err));
    }
}
