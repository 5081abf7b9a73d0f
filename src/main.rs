use clap::Parser;
use tracing::debug;

use marketdeck::adapter::inbound::cli::command::{
    Cli, Commands, ConfigCommand, ProvidersCommand,
};
use marketdeck::adapter::inbound::cli::output::{self, OutputConfig};
use marketdeck::adapter::inbound::cli::{
    cards, config, dashboard, lookback, providers, status,
};
use marketdeck::error::{Error, Result};
use marketdeck::infrastructure::bootstrap::Services;
use marketdeck::infrastructure::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let color = cli.color.enabled();
    owo_colors::set_override(color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, color));

    if let Err(e) = run(cli).await {
        // View failures were already rendered inline.
        if !matches!(e, Error::ViewFailed { .. }) {
            output::error(&e.to_string());
        }
        std::process::exit(1);
    }
}

/// Load configuration, honoring `--api-url`, and start logging.
fn load_config(cli: &Cli) -> Result<Config> {
    let (path, explicit) = cli.config_path();
    let mut config = match Config::load_or_default(&path, explicit) {
        Ok(config) => config,
        Err(e) => {
            LoggingConfig::default().init(cli.verbose);
            return Err(e);
        }
    };
    if let Some(url) = cli.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
    config.logging.init(cli.verbose);
    debug!(path = %path.display(), explicit, base_url = %config.api.base_url, "Configuration loaded");
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        LoggingConfig::default().init(cli.verbose);
        return config::execute_init(&args.path, args.force);
    }
    if let Commands::Config(ConfigCommand::Validate) = &cli.command {
        LoggingConfig::default().init(cli.verbose);
        let (path, _) = cli.config_path();
        return config::execute_validate(&path);
    }

    let loaded = load_config(&cli)?;
    if let Commands::Config(ConfigCommand::Show) = &cli.command {
        let (path, _) = cli.config_path();
        return config::execute_show(&path, &loaded);
    }

    let services = Services::from_config(loaded)?;
    match &cli.command {
        Commands::Status => status::execute(&services).await,
        Commands::Lookback(args) => lookback::execute(&services, args).await,
        Commands::Cards(args) => cards::execute(&services, args).await,
        Commands::Dashboard(args) => dashboard::execute(&services, args).await,
        Commands::Providers(ProvidersCommand::List) => providers::execute_list(&services).await,
        Commands::Providers(ProvidersCommand::Use { key }) => {
            providers::execute_use(&services, key.as_deref()).await
        }
        Commands::Providers(ProvidersCommand::Show) => providers::execute_show(&services),
        Commands::Config(_) => Ok(()),
    }
}
