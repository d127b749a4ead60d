use futures::future::{self, LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

/// symbols the `crypto` command knows about, in display order
pub const TRACKED: &[&str] = &["BTC", "ETH", "ADA", "SOL", "MATIC"];

pub const NETWORK_ERROR: &str = "Network error while fetching crypto prices. Please try again later.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change24h: f64,
    pub change7d: f64,
    pub market_cap: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarketResponse {
    Quotes(Vec<Quote>),
    Failure { error: String },
}

/// Parse the price endpoint body: either a list of quotes or `{"error": ..}`.
pub fn parse_response(body: &str) -> Result<Vec<Quote>, CollaboratorError> {
    match serde_json::from_str::<MarketResponse>(body) {
        Ok(MarketResponse::Quotes(quotes)) => Ok(quotes),
        Ok(MarketResponse::Failure { error }) => Err(CollaboratorError::Service(error)),
        Err(e) => Err(CollaboratorError::Malformed(e.to_string())),
    }
}

/// Source of price quotes. One request, no parameters.
pub trait MarketData {
    fn fetch_quotes(&self) -> LocalBoxFuture<'static, Result<Vec<Quote>, CollaboratorError>>;
}

/// For builds without network access; every lookup fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineMarket;

impl MarketData for OfflineMarket {
    fn fetch_quotes(&self) -> LocalBoxFuture<'static, Result<Vec<Quote>, CollaboratorError>> {
        Box::pin(future::ready(Err(CollaboratorError::Network("offline".to_string()))))
    }
}

/// Render the requested symbols (in [`TRACKED`] order). `None` when the
/// response doesn't contain any of them.
pub fn format_quotes(quotes: &[Quote], symbols: &[&str]) -> Option<String> {
    let lines: Vec<String> = symbols
        .iter()
        .filter_map(|sym| quotes.iter().find(|q| q.symbol.eq_ignore_ascii_case(sym)))
        .map(format_quote)
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn format_quote(q: &Quote) -> String {
    format!(
        "{:<6} {:<10} ${:>12}  24h: {:>7}  7d: {:>7}  mcap: ${}",
        q.symbol,
        q.name,
        with_commas(q.price),
        signed_pct(q.change24h),
        signed_pct(q.change7d),
        compact(q.market_cap),
    )
}

fn signed_pct(v: f64) -> String {
    format!("{:+.2}%", v)
}

fn with_commas(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

fn compact(v: f64) -> String {
    const UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M")];
    for (size, suffix) in UNITS {
        if v.abs() >= *size {
            return format!("{:.2}{}", v / size, suffix);
        }
    }
    with_commas(v)
}
