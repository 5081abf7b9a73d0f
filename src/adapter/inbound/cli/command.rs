//! Command-line interface definitions.
//!
//! Defines the CLI structure for marketdeck using `clap`. One-shot commands
//! render a single region and exit; `dashboard` keeps the provider poller
//! and card grid live and reads commands from stdin.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::paths;

/// Terminal client for market-data provider status, lookback and overview cards
#[derive(Parser, Debug)]
#[command(name = "marketdeck")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.marketdeck/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The config path to load and whether it was given explicitly.
    #[must_use]
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (paths::default_config(), false),
        }
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Resolve to on/off. `auto` colors only a terminal without `NO_COLOR`.
    #[must_use]
    pub fn enabled(self) -> bool {
        use std::io::IsTerminal;
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show provider availability once
    Status,

    /// Fetch daily lookback records for one or more symbols
    Lookback(LookbackArgs),

    /// Show overview cards for one symbol
    Cards(CardsArgs),

    /// Live view: provider status, overview cards and stdin commands
    Dashboard(DashboardArgs),

    /// List, select and inspect data providers
    #[command(subcommand)]
    Providers(ProvidersCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `lookback`. Unset values come from `[lookback]` in config.
#[derive(Parser, Debug, Default)]
pub struct LookbackArgs {
    /// Comma-separated symbols (e.g. "ES=F,NQ=F")
    #[arg(long)]
    pub symbols: Option<String>,

    /// Number of trading days
    #[arg(long)]
    pub days: Option<u32>,

    /// Time of day to inspect (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Minutes around --time to aggregate
    #[arg(long)]
    pub window: Option<u32>,

    /// Data provider for this request only
    #[arg(long)]
    pub provider: Option<String>,

    /// Translate canonical names (GOLD, SILVER, BTC) into the provider's tickers
    #[arg(long)]
    pub resolve_symbols: bool,
}

/// Arguments for `cards`.
#[derive(Parser, Debug, Default)]
pub struct CardsArgs {
    /// Symbol to load [default: first of cards.symbols]
    #[arg(long)]
    pub symbol: Option<String>,
}

/// Arguments for `dashboard`.
#[derive(Parser, Debug, Default)]
pub struct DashboardArgs {
    /// Initially selected symbol [default: first of cards.symbols]
    #[arg(long)]
    pub symbol: Option<String>,

    /// Provider to start with
    #[arg(long)]
    pub provider: Option<String>,
}

/// Subcommands for `marketdeck providers`.
#[derive(Subcommand, Debug)]
pub enum ProvidersCommand {
    /// List providers the API knows about.
    List,
    /// Remember a provider for later requests.
    Use {
        /// Provider key; prompts for one when omitted.
        key: Option<String>,
    },
    /// Show the effective provider and where it came from.
    Show,
}

/// Subcommands for `marketdeck config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "marketdeck");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "marketdeck",
            "--json",
            "-q",
            "-vv",
            "--color",
            "never",
            "status",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["marketdeck", "cards", "-c", "deck.toml"]).unwrap();
        let (path, explicit) = cli.config_path();
        assert_eq!(path, PathBuf::from("deck.toml"));
        assert!(explicit);
    }

    #[test]
    fn test_default_config_path_is_implicit() {
        let cli = Cli::try_parse_from(["marketdeck", "status"]).unwrap();
        let (path, explicit) = cli.config_path();
        assert!(path.ends_with("config.toml"));
        assert!(!explicit);
    }

    #[test]
    fn test_parse_lookback_args() {
        let cli = Cli::try_parse_from([
            "marketdeck",
            "lookback",
            "--symbols",
            "ES=F,NQ=F",
            "--days",
            "5",
            "--time",
            "09:30",
            "--window",
            "15",
            "--provider",
            "fmp",
            "--resolve-symbols",
        ])
        .unwrap();
        let Commands::Lookback(args) = cli.command else {
            panic!("Expected Lookback command");
        };
        assert_eq!(args.symbols.as_deref(), Some("ES=F,NQ=F"));
        assert_eq!(args.days, Some(5));
        assert_eq!(args.time.as_deref(), Some("09:30"));
        assert_eq!(args.window, Some(15));
        assert_eq!(args.provider.as_deref(), Some("fmp"));
        assert!(args.resolve_symbols);
    }

    #[test]
    fn test_lookback_rejects_negative_days() {
        let result = Cli::try_parse_from(["marketdeck", "lookback", "--days", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_providers_use_without_key() {
        let cli = Cli::try_parse_from(["marketdeck", "providers", "use"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Providers(ProvidersCommand::Use { key: None })
        ));
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli =
            Cli::try_parse_from(["marketdeck", "config", "init", "out.toml", "--force"]).unwrap();
        let Commands::Config(ConfigCommand::Init(args)) = cli.command else {
            panic!("Expected config init");
        };
        assert_eq!(args.path, PathBuf::from("out.toml"));
        assert!(args.force);
    }
}
