//! Handler for the `dashboard` command.
//!
//! Keeps the provider poller running in the background, loads the card
//! grid for the selected symbol, and reads one command per line from
//! stdin. Every page update triggers a redraw. Loads run as separate tasks
//! so a slow response never blocks input; each component's request gate
//! makes sure only the newest response is shown.

use std::io::IsTerminal;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::cards::selected_symbol;
use super::command::{DashboardArgs, LookbackArgs};
use super::lookback::build_query;
use super::{output, render};
use crate::application::{
    CardGridLoader, LookbackFetcher, ProviderChanged, SharedPage, StatusPoller,
};
use crate::domain::{ProviderKey, Symbol};
use crate::error::{InputError, Result};
use crate::infrastructure::bootstrap::Services;

const HELP: &str = "\
symbol <S>                          load overview cards for S
provider <P>                        switch and remember the data provider
lookback <S,..> [days] [HH:MM] [window]   fetch lookback records
refresh                             poll providers and reload cards
help                                show this list
quit                                leave the dashboard";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Symbol(Symbol),
    Provider(ProviderKey),
    Lookback {
        symbols: String,
        days: Option<u32>,
        time: Option<String>,
        window: Option<u32>,
    },
    Refresh,
    Help,
    Quit,
}

fn number(field: &'static str, raw: Option<&str>) -> std::result::Result<Option<u32>, InputError> {
    raw.map(|value| {
        value.parse::<u32>().map_err(|_| InputError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    })
    .transpose()
}

impl DashboardCommand {
    /// Parse a line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for unknown commands, missing arguments
    /// and malformed numbers.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, InputError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };

        let parsed = match command.to_ascii_lowercase().as_str() {
            "symbol" | "s" => {
                let symbol = words.next().ok_or(InputError::MissingArgument {
                    command: "symbol",
                    argument: "a symbol",
                })?;
                Self::Symbol(Symbol::new(symbol))
            }
            "provider" | "p" => {
                let key = words.next().ok_or(InputError::MissingArgument {
                    command: "provider",
                    argument: "a provider key",
                })?;
                Self::Provider(ProviderKey::new(key))
            }
            "lookback" | "l" => {
                let symbols = words.next().ok_or(InputError::MissingArgument {
                    command: "lookback",
                    argument: "comma-separated symbols",
                })?;
                let days = number("days", words.next())?;
                // Time is optional in the middle; a bare number is the window.
                let (time, window) = match words.next() {
                    Some(word) if word.contains(':') => {
                        (Some(word.to_string()), number("window", words.next())?)
                    }
                    other => (None, number("window", other)?),
                };
                Self::Lookback {
                    symbols: symbols.to_string(),
                    days,
                    time,
                    window,
                }
            }
            "refresh" | "r" => Self::Refresh,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => {
                return Err(InputError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };
        Ok(Some(parsed))
    }
}

/// Live components and the selection state they run against.
struct Dashboard {
    page: Arc<SharedPage>,
    poller: Arc<StatusPoller>,
    cards: Arc<CardGridLoader>,
    lookback: Arc<LookbackFetcher>,
    provider_tx: broadcast::Sender<ProviderChanged>,
    symbol: Symbol,
    provider: ProviderKey,
    clear_screen: bool,
}

impl Dashboard {
    fn load_cards(&self) {
        let cards = Arc::clone(&self.cards);
        let symbol = self.symbol.clone();
        tokio::spawn(async move {
            cards.load(&symbol).await;
        });
    }

    fn poll_now(&self) {
        let poller = Arc::clone(&self.poller);
        tokio::spawn(async move {
            poller.poll_once().await;
        });
    }

    fn redraw(&self) {
        if output::is_json() {
            return;
        }
        if self.clear_screen {
            print!("\x1b[2J\x1b[H");
        }
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Symbol", output::highlight(&self.symbol));
        output::field("Provider", output::highlight(&self.provider));
        let body = self.page.read(render::page);
        if !body.is_empty() {
            println!();
            output::lines(&body);
        }
        println!();
        output::hint("symbol <S> · provider <P> · lookback <S> [days] [HH:MM] [window] · refresh · help · quit");
    }

    /// Apply one command. Returns `false` when the operator asked to leave.
    fn apply(&mut self, services: &Services, command: DashboardCommand) -> bool {
        match command {
            DashboardCommand::Symbol(symbol) => {
                info!(symbol = %symbol, "Symbol changed");
                self.symbol = symbol;
                self.load_cards();
            }
            DashboardCommand::Provider(provider) => {
                if let Err(e) = services.preferences.set_provider(&provider) {
                    warn!(error = %e, "Could not remember provider");
                    output::warning(&format!("provider not saved: {e}"));
                }
                self.provider = provider.clone();
                // No receivers only means the poller is gone; nothing to notify.
                let _ = self.provider_tx.send(ProviderChanged(provider));
                self.redraw();
            }
            DashboardCommand::Lookback {
                symbols,
                days,
                time,
                window,
            } => {
                let args = LookbackArgs {
                    symbols: Some(symbols),
                    days,
                    time,
                    window,
                    provider: None,
                    resolve_symbols: false,
                };
                match build_query(&services.config.lookback, &args, self.provider.clone()) {
                    Ok(query) => {
                        let lookback = Arc::clone(&self.lookback);
                        tokio::spawn(async move {
                            lookback.fetch(&query).await;
                        });
                    }
                    Err(e) => output::warning(&e.to_string()),
                }
            }
            DashboardCommand::Refresh => {
                self.poll_now();
                self.load_cards();
            }
            DashboardCommand::Help => output::lines(HELP),
            DashboardCommand::Quit => return false,
        }
        true
    }
}

/// Execute `dashboard` until `quit`, end of input, or Ctrl-C.
pub async fn execute(services: &Services, args: &DashboardArgs) -> Result<()> {
    let symbol = selected_symbol(&services.config, args.symbol.as_deref())?;
    let selection = services.provider(args.provider.as_deref());
    info!(symbol = %symbol, provider = %selection.key, source = %selection.source, "Dashboard starting");

    let poller = Arc::new(services.status_poller().with_active(selection.key.clone()));
    let (provider_tx, provider_rx) = broadcast::channel(16);
    let poller_task = tokio::spawn(Arc::clone(&poller).run(provider_rx));

    let mut dashboard = Dashboard {
        page: Arc::clone(&services.page),
        poller,
        cards: Arc::new(services.card_grid_loader()),
        lookback: Arc::new(services.lookback_fetcher()),
        provider_tx,
        symbol,
        provider: selection.key,
        clear_screen: std::io::stdout().is_terminal(),
    };

    let mut updates = services.page.subscribe();
    dashboard.redraw();
    dashboard.load_cards();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    if output::is_json() {
                        services.page.read(|page| {
                            if let Some(region) = page.region(update.region) {
                                render::emit_region(region);
                            }
                        });
                    } else {
                        dashboard.redraw();
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Redraw notifications coalesced");
                    dashboard.redraw();
                }
                Err(RecvError::Closed) => break,
            },
            line = input.next_line() => match line {
                Ok(Some(line)) => match DashboardCommand::parse(&line) {
                    Ok(Some(command)) => {
                        if !dashboard.apply(services, command) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => output::warning(&e.to_string()),
                },
                Ok(None) => {
                    debug!("Input closed");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Cannot read input, leaving dashboard");
                    break;
                }
            },
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    poller_task.abort();
    info!("Dashboard stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbol_and_provider() {
        assert_eq!(
            DashboardCommand::parse("symbol NQ=F").unwrap(),
            Some(DashboardCommand::Symbol(Symbol::new("NQ=F")))
        );
        assert_eq!(
            DashboardCommand::parse("  provider FMP ").unwrap(),
            Some(DashboardCommand::Provider(ProviderKey::new("fmp")))
        );
    }

    #[test]
    fn lookback_time_is_optional() {
        assert_eq!(
            DashboardCommand::parse("lookback ES=F,GC=F 5 09:30 15").unwrap(),
            Some(DashboardCommand::Lookback {
                symbols: "ES=F,GC=F".into(),
                days: Some(5),
                time: Some("09:30".into()),
                window: Some(15),
            })
        );
        assert_eq!(
            DashboardCommand::parse("lookback ES=F 5 15").unwrap(),
            Some(DashboardCommand::Lookback {
                symbols: "ES=F".into(),
                days: Some(5),
                time: None,
                window: Some(15),
            })
        );
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(DashboardCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(
            DashboardCommand::parse("dance"),
            Err(InputError::UnknownCommand { .. })
        ));
        assert!(matches!(
            DashboardCommand::parse("symbol"),
            Err(InputError::MissingArgument { .. })
        ));
        assert!(matches!(
            DashboardCommand::parse("lookback ES=F ten"),
            Err(InputError::InvalidNumber { field: "days", .. })
        ));
    }
}
