//! Handler for the `cards` command.

use super::command::CardsArgs;
use super::{output, render};
use crate::application::RegionId;
use crate::domain::Symbol;
use crate::error::{ConfigError, InputError, Result};
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::Config;

/// Symbol from the flag, else the first configured selector entry.
///
/// # Errors
///
/// Returns an error when the flag is blank or no symbol is configured.
pub fn selected_symbol(config: &Config, flag: Option<&str>) -> Result<Symbol> {
    match flag {
        Some(raw) => {
            let symbol = Symbol::new(raw);
            if symbol.as_str().is_empty() {
                return Err(InputError::NoSymbols.into());
            }
            Ok(symbol)
        }
        None => config.cards.initial_symbol().ok_or_else(|| {
            ConfigError::MissingField {
                field: "cards.symbols",
            }
            .into()
        }),
    }
}

/// Execute `cards`: one card grid load for the selected symbol.
pub async fn execute(services: &Services, args: &CardsArgs) -> Result<()> {
    let symbol = selected_symbol(&services.config, args.symbol.as_deref())?;

    let pb = output::spinner(&format!("Loading {symbol}..."));
    let outcome = services.card_grid_loader().load(&symbol).await;
    output::spinner_clear(&pb);

    render::finish_view(&services.page, RegionId::CardGrid, outcome)
}
