//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use super::diagnostic::ConfigDiagnostic;
use super::output;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::{Config, API_URL_ENV};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Point api.base_url in {} at your API", path.display()));
    output::note(&format!("2. Run: marketdeck config validate -c {}", path.display()));
    output::note(&format!("3. Run: marketdeck dashboard -c {}", path.display()));
    Ok(())
}

/// Execute `config show` for an already loaded configuration.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_value("config", config);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "File",
        if path.exists() {
            path.display().to_string()
        } else {
            format!("{} (not found, defaults)", path.display())
        },
    );

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    if std::env::var_os(API_URL_ENV).is_some() {
        output::note(&format!("overridden by {API_URL_ENV}"));
    }
    output::field("Timeout", format!("{}ms", config.api.timeout_ms));
    output::field("Connect", format!("{}ms", config.api.connect_timeout_ms));
    for (name, endpoint) in config.api.endpoints.entries() {
        let label = name.trim_start_matches("endpoints.");
        output::field(label, endpoint);
    }

    output::section("Poller");
    output::field("Interval", format!("{}s", config.poller.interval_secs));

    output::section("Lookback");
    output::field("Symbols", &config.lookback.symbols);
    output::field("Days", config.lookback.days);
    output::field("Window", format!("{}m", config.lookback.window));
    output::field(
        "Time",
        config.lookback.time.as_deref().unwrap_or("(not set)"),
    );

    output::section("Cards");
    output::field("Symbols", config.cards.symbols.join(", "));

    output::section("Preferences");
    output::field("Persist", if config.preferences.persist { "yes" } else { "no" });
    if let Some(path) = &config.preferences.path {
        output::field("File", path.display());
    }
    output::field("Default", &config.preferences.default_provider);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
///
/// TOML syntax errors are rendered with the offending span highlighted.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());

    let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
    let config = match Config::parse_toml(&content) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::Parse(err))) => {
            if let Some(diagnostic) =
                ConfigDiagnostic::from_toml(&path.display().to_string(), &content, &err)
            {
                if !output::is_json() {
                    eprintln!("{}", diagnostic.render(output::is_color()));
                }
            }
            return Err(ConfigError::Parse(err).into());
        }
        Err(e) => return Err(e),
    };
    output::success("Config file is valid");

    let warnings = config.warnings();
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("marketdeck config show -c {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn test_config_template_parses_and_validates() {
        let config = Config::parse_toml(CONFIG_TEMPLATE);
        assert!(config.is_ok(), "CONFIG_TEMPLATE must be a valid config");
    }

    #[test]
    fn test_execute_init_creates_parent_directories() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_execute_init_refuses_overwrite_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        let error = execute_init(&config_path, false).unwrap_err();
        assert!(error.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing content");

        execute_init(&config_path, true).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn test_execute_validate_reports_parse_error() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[poller\ninterval_secs = 5\n").unwrap();

        let result = execute_validate(&config_path);
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn test_execute_validate_rejects_zero_interval() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[poller]\ninterval_secs = 0\n").unwrap();

        let result = execute_validate(&config_path);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "poller.interval_secs",
                ..
            }))
        ));
    }
}
