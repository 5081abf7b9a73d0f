//! Terminal rendering of page regions.
//!
//! Turns [`Content`] into indented text blocks. Missing values print as
//! [`PLACEHOLDER`]. Prices use the symbol's pip precision so FX quotes keep
//! their fractional digits.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::application::{Content, Page, ProviderRow, Region, RegionId, SharedPage, ViewOutcome};
use crate::domain::{pip_size, DayRecord, Ohlc, OverviewCard, Symbol, SymbolDays};
use crate::error::{Error, Result};

/// Shown wherever the server left a value out.
pub const PLACEHOLDER: &str = "—";

/// Heading printed above a region.
#[must_use]
pub const fn title(id: RegionId) -> &'static str {
    match id {
        RegionId::ProviderStatus => "Providers",
        RegionId::Lookback => "Lookback",
        RegionId::CardGrid => "Market Overview",
    }
}

/// Decimal places used for prices of `symbol`.
#[must_use]
pub fn price_decimals(symbol: &str) -> usize {
    match pip_size(symbol) {
        Some(pip) if pip < 0.001 => 5,
        Some(_) => 3,
        None => 2,
    }
}

fn number(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.decimals$}"))
}

fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)
}

/// Render any region content as text.
#[must_use]
pub fn content(content: &Content) -> String {
    match content {
        Content::Loading { message } => output::muted(format!("… {message}")),
        Content::Error { message } => format!("{} {}", output::negative("×"), message),
        Content::Empty { message } => output::muted(message),
        Content::ProviderRows { rows } => provider_rows(rows),
        Content::Lookback { groups } => lookback_groups(groups),
        Content::CardGrid { symbol, cards } => card_grid(symbol, cards),
    }
}

/// One line per provider: indicator, display name, state.
#[must_use]
pub fn provider_rows(rows: &[ProviderRow]) -> String {
    if rows.is_empty() {
        return output::muted("No providers reported");
    }
    rows.iter()
        .map(|row| {
            let (indicator, state) = if row.status.available {
                (output::positive("●"), output::positive("online"))
            } else {
                (output::negative("●"), output::negative("error"))
            };
            let name = if row.active {
                output::strong(&row.status.name)
            } else {
                row.status.name.clone()
            };
            let marker = if row.active {
                format!(" {}", output::highlight("(active)"))
            } else {
                String::new()
            };
            format!(
                "{indicator} {name}  {state}  {}{marker}",
                output::muted(row.status.key.as_str())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ohlc_line(bar: Option<&Ohlc>, decimals: usize) -> String {
    let Some(bar) = bar else {
        return PLACEHOLDER.to_string();
    };
    let line = format!(
        "O {}  H {}  L {}  C {}",
        number(bar.open, decimals),
        number(bar.high, decimals),
        number(bar.low, decimals),
        number(bar.close, decimals),
    );
    match bar.is_bullish() {
        Some(true) => output::positive(line),
        Some(false) => output::negative(line),
        None => line,
    }
}

fn day_card(day: &DayRecord) -> String {
    let decimals = price_decimals(day.symbol.as_str());
    let pips = day
        .pips()
        .map_or_else(String::new, |pips| format!(" ({pips} pips)"));
    let mut lines = vec![format!(
        "{}  O {}  H {}  L {}  C {}  range {}{pips}",
        output::strong(text(Some(&day.date))),
        number(day.daily_open, decimals),
        number(day.daily_high, decimals),
        number(day.daily_low, decimals),
        number(day.daily_close, decimals),
        number(day.range_points, decimals),
    )];
    if let Some(volume) = day.daily_volume {
        lines.push(format!("  {} {volume:.0}", output::muted("volume")));
    }
    for (name, bar) in day.ordered_sessions() {
        lines.push(format!(
            "  {}  {}",
            output::muted(format!("{name:<16}")),
            ohlc_line(bar, decimals)
        ));
    }
    if let Some(bar) = &day.selected_time {
        lines.push(format!(
            "  {}  {}",
            output::highlight(format!("{:<16}", "selected time")),
            ohlc_line(Some(bar), decimals)
        ));
    }
    lines.join("\n")
}

/// Day cards grouped under a heading per symbol.
#[must_use]
pub fn lookback_groups(groups: &[SymbolDays]) -> String {
    groups
        .iter()
        .map(|group| {
            let mut block = vec![format!(
                "{} {}",
                output::highlight(group.symbol.as_str()),
                output::muted(format!("({} days)", group.days.len()))
            )];
            if group.days.is_empty() {
                block.push(output::muted("No days returned"));
            }
            block.extend(group.days.iter().map(day_card));
            block.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "FVG")]
    fvg: u32,
    #[tabled(rename = "Liquidity")]
    liquidity: u32,
    #[tabled(rename = "Premium")]
    premium: String,
    #[tabled(rename = "Discount")]
    discount: String,
}

impl CardRow {
    fn from_card(card: &OverviewCard, decimals: usize) -> Self {
        Self {
            date: text(Some(&card.date)),
            condition: text(card.market_condition.as_deref()),
            open: number(card.daily_open, decimals),
            high: number(card.daily_high, decimals),
            low: number(card.daily_low, decimals),
            close: number(card.daily_close, decimals),
            range: number(card.daily_range, decimals),
            fvg: card.fvg_count,
            liquidity: card.liquidity_count,
            premium: number(card.premium_price(), decimals),
            discount: number(card.discount_price(), decimals),
        }
    }
}

/// Summary cards as a table, in the order given.
#[must_use]
pub fn card_grid(symbol: &Symbol, cards: &[OverviewCard]) -> String {
    let decimals = price_decimals(symbol.as_str());
    let rows: Vec<CardRow> = cards
        .iter()
        .map(|card| CardRow::from_card(card, decimals))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n{table}", output::highlight(symbol.as_str()))
}

/// A region with its heading.
#[must_use]
pub fn region(region: &Region) -> String {
    let body = region
        .content
        .as_ref()
        .map_or_else(|| output::muted("(waiting)"), content);
    format!("{}\n{body}", output::strong(title(region.id)))
}

/// Every region, in creation order.
#[must_use]
pub fn page(page: &Page) -> String {
    page.regions().map(region).collect::<Vec<_>>().join("\n\n")
}

/// Print one region through the output module.
///
/// JSON mode emits the region as a typed line; errors always reach stderr
/// so quiet mode still reports them.
pub fn emit_region(region: &Region) {
    if output::is_json() {
        output::json_value("region", region);
        return;
    }
    match &region.content {
        Some(Content::Error { message }) => {
            output::section(title(region.id));
            output::error(message);
        }
        Some(body) => {
            output::section(title(region.id));
            output::lines(&content(body));
        }
        None => {}
    }
}

/// Print a one-shot command's region and map its outcome to an exit result.
///
/// # Errors
///
/// Returns [`Error::ViewFailed`] when the region ended in its error state;
/// the message has already been printed.
pub fn finish_view(page: &SharedPage, id: RegionId, outcome: ViewOutcome) -> Result<()> {
    page.read(|page| {
        if let Some(region) = page.region(id) {
            emit_region(region);
        }
    });
    if outcome.is_failure() {
        return Err(Error::ViewFailed {
            region: id.as_str(),
        });
    }
    Ok(())
}
