//! Handler for the `lookback` command.

use tracing::debug;

use super::command::LookbackArgs;
use super::{output, render};
use crate::application::lookback::LOADING_MESSAGE;
use crate::application::RegionId;
use crate::domain::{resolve_symbol, LookbackQuery, ProviderKey};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::LookbackDefaults;

/// Build a query from operator input, filling gaps from `[lookback]`.
///
/// With `resolve` set, canonical names are translated into the tickers
/// `provider` expects.
///
/// # Errors
///
/// Returns an input error when the merged values do not form a valid query.
pub fn build_query(
    defaults: &LookbackDefaults,
    args: &LookbackArgs,
    provider: ProviderKey,
) -> Result<LookbackQuery> {
    let symbols = args.symbols.as_deref().unwrap_or(&defaults.symbols);
    let time = args.time.as_deref().or(defaults.time.as_deref());
    let mut query = LookbackQuery::new(
        symbols,
        args.days.unwrap_or(defaults.days),
        time,
        args.window.unwrap_or(defaults.window),
        provider,
    )?;
    if args.resolve_symbols {
        query.symbols = query
            .symbols
            .iter()
            .map(|symbol| resolve_symbol(symbol, &query.provider))
            .collect();
    }
    Ok(query)
}

/// Execute `lookback`: one request, rendered once.
pub async fn execute(services: &Services, args: &LookbackArgs) -> Result<()> {
    let selection = services.provider(args.provider.as_deref());
    debug!(provider = %selection.key, source = %selection.source, "Active provider");
    let query = build_query(&services.config.lookback, args, selection.key)?;

    let pb = output::spinner(LOADING_MESSAGE);
    let outcome = services.lookback_fetcher().fetch(&query).await;
    output::spinner_clear(&pb);

    render::finish_view(&services.page, RegionId::Lookback, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InputError};

    #[test]
    fn defaults_fill_missing_arguments() {
        let defaults = LookbackDefaults::default();
        let query =
            build_query(&defaults, &LookbackArgs::default(), ProviderKey::new("yfinance")).unwrap();
        assert_eq!(query.symbols.len(), 3);
        assert_eq!(query.days, 10);
        assert_eq!(query.window, 10);
        assert!(query.time.is_none());
    }

    #[test]
    fn canonical_symbols_resolve_for_provider() {
        let args = LookbackArgs {
            symbols: Some("GOLD,ES=F".into()),
            resolve_symbols: true,
            ..LookbackArgs::default()
        };
        let query = build_query(&LookbackDefaults::default(), &args, ProviderKey::new("fmp"))
            .unwrap();
        assert_eq!(query.symbols[0].as_str(), "GOLD");
        assert_eq!(query.symbols[1].as_str(), "ES=F");

        let query = build_query(&LookbackDefaults::default(), &args, ProviderKey::new("yfinance"))
            .unwrap();
        assert_eq!(query.symbols[0].as_str(), "GC=F");
    }

    #[test]
    fn invalid_time_is_an_input_error() {
        let args = LookbackArgs {
            time: Some("25:00".into()),
            ..LookbackArgs::default()
        };
        let err = build_query(&LookbackDefaults::default(), &args, ProviderKey::new("fmp"))
            .unwrap_err();
        assert!(matches!(err, Error::Input(InputError::InvalidTime { .. })));
    }
}
