//! Handlers for the `providers` command group.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde_json::json;
use tracing::warn;

use super::output;
use crate::domain::{ProviderKey, KNOWN_PROVIDERS};
use crate::error::{Error, InputError, Result};
use crate::infrastructure::bootstrap::Services;

/// Execute `providers list`.
pub async fn execute_list(services: &Services) -> Result<()> {
    let pb = output::spinner("Fetching providers");
    let result = services.api.providers().await;
    output::spinner_clear(&pb);
    let keys = result?;

    let active = services.provider(None).key;
    if output::is_json() {
        output::json_value(
            "providers",
            &json!({
                "providers": keys,
                "active": active,
            }),
        );
        return Ok(());
    }

    output::section("Providers");
    if keys.is_empty() {
        output::note("(none reported)");
    }
    for key in &keys {
        if *key == active {
            output::lines(&format!("{} {}", output::strong(key), output::highlight("(active)")));
        } else {
            output::lines(key.as_str());
        }
    }
    Ok(())
}

/// Keys to offer in the interactive picker: the API's list, or the
/// built-in set when the API cannot be reached.
async fn choices(services: &Services) -> Vec<ProviderKey> {
    match services.api.providers().await {
        Ok(keys) if !keys.is_empty() => keys,
        Ok(_) => KNOWN_PROVIDERS.iter().map(|k| ProviderKey::new(k)).collect(),
        Err(e) => {
            warn!(error = %e, "Provider list unavailable, offering built-in providers");
            KNOWN_PROVIDERS.iter().map(|k| ProviderKey::new(k)).collect()
        }
    }
}

fn pick(options: &[ProviderKey], current: &ProviderKey) -> Result<ProviderKey> {
    if !std::io::stdin().is_terminal() {
        return Err(InputError::MissingArgument {
            command: "providers use",
            argument: "a provider key when not run interactively",
        }
        .into());
    }
    let labels: Vec<&str> = options.iter().map(ProviderKey::as_str).collect();
    let default = options.iter().position(|k| k == current).unwrap_or(0);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Data provider")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index].clone())
}

/// Execute `providers use [KEY]`.
pub async fn execute_use(services: &Services, key: Option<&str>) -> Result<()> {
    let key = match key {
        Some(raw) => ProviderKey::new(raw),
        None => {
            let options = choices(services).await;
            pick(&options, &services.provider(None).key)?
        }
    };
    if key.is_empty() {
        return Err(Error::Preference("provider key cannot be empty".to_string()));
    }
    if !services.config.preferences.persist {
        output::warning("preferences.persist is off; the choice lasts for this run only");
    }

    services.preferences.set_provider(&key)?;
    output::success(&format!("Using provider {}", output::highlight(&key)));
    Ok(())
}

/// Execute `providers show`.
pub fn execute_show(services: &Services) -> Result<()> {
    let selection = services.provider(None);
    if output::is_json() {
        output::json_value("provider", &selection);
        return Ok(());
    }
    output::section("Provider");
    output::field("Active", &selection.key);
    output::field("Source", selection.source);
    output::field("Default", &services.config.preferences.default_provider);
    Ok(())
}
