use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;
use crate::market::{self, NETWORK_ERROR, TRACKED};
use crate::output::Output;

/// crypto [SYMBOL]...
/// Fetch current prices for the tracked coins.
pub struct CryptoCommand;

const CRYPTO_HELP: &str = "Usage: crypto [SYMBOL]...\nShow current prices for BTC, ETH, ADA, SOL and MATIC, or only the given SYMBOLs.\n\n      --help     display this help and exit";

impl Command for CryptoCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let symbols: Vec<&'static str> = if args.is_empty() {
            TRACKED.to_vec()
        } else {
            let mut picked = Vec::new();
            for arg in args {
                match TRACKED.iter().find(|s| s.eq_ignore_ascii_case(arg)) {
                    Some(sym) if !picked.contains(sym) => picked.push(*sym),
                    Some(_) => {}
                    None => {
                        return Err(format!(
                            "crypto: unknown symbol '{}' (tracked: {})",
                            arg,
                            TRACKED.join(", ")
                        ))
                    }
                }
            }
            picked
        };

        let lookup = ctx.market().fetch_quotes();
        Ok(Reply::Pending(Box::pin(async move {
            match lookup.await {
                Ok(quotes) => match market::format_quotes(&quotes, &symbols) {
                    Some(text) => Output::Plain(text),
                    None => {
                        tracing::warn!("market data had none of {:?}", symbols);
                        Output::plain(NETWORK_ERROR)
                    }
                },
                Err(e) => {
                    tracing::warn!("failed to fetch crypto prices: {}", e);
                    Output::plain(NETWORK_ERROR)
                }
            }
        })))
    }

    fn usage(&self) -> &'static str {
        CRYPTO_HELP
    }

    fn summary(&self) -> &'static str {
        "show cryptocurrency prices"
    }

    fn options(&self) -> &'static [&'static str] {
        &["btc", "eth", "ada", "sol", "matic"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, ctx};
    use crate::error::CollaboratorError;
    use crate::market::{MarketData, Quote};
    use futures::executor::block_on;
    use futures::future::{self, LocalBoxFuture};
    use std::rc::Rc;

    struct FixedMarket(Result<Vec<Quote>, CollaboratorError>);

    impl MarketData for FixedMarket {
        fn fetch_quotes(&self) -> LocalBoxFuture<'static, Result<Vec<Quote>, CollaboratorError>> {
            Box::pin(future::ready(self.0.clone()))
        }
    }

    fn quote(symbol: &str, name: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: 10.0,
            change24h: 1.0,
            change7d: 2.0,
            market_cap: 5e9,
        }
    }

    fn resolve(market: FixedMarket, list: &[&str]) -> Output {
        let mut ctx = ctx().with_market(Rc::new(market));
        match CryptoCommand.execute(&args(list), &mut ctx) {
            Ok(Reply::Pending(fut)) => block_on(fut),
            other => panic!("expected pending reply, got {:?}", other),
        }
    }

    #[test]
    fn formats_requested_symbols() {
        let market = FixedMarket(Ok(vec![quote("BTC", "Bitcoin"), quote("ETH", "Ethereum")]));
        match resolve(market, &["eth"]) {
            Output::Plain(text) => {
                assert!(text.starts_with("ETH"));
                assert!(!text.contains("BTC"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn collaborator_error_is_fixed_message() {
        let market = FixedMarket(Err(CollaboratorError::Service("API key not configured".to_string())));
        assert_eq!(resolve(market, &[]), Output::plain(NETWORK_ERROR));
    }

    #[test]
    fn empty_response_is_fixed_message() {
        assert_eq!(resolve(FixedMarket(Ok(vec![])), &[]), Output::plain(NETWORK_ERROR));
    }

    #[test]
    fn unknown_symbol_is_rejected_up_front() {
        let mut ctx = ctx();
        let err = CryptoCommand.execute(&args(&["doge"]), &mut ctx).unwrap_err();
        assert_eq!(err, "crypto: unknown symbol 'doge' (tracked: BTC, ETH, ADA, SOL, MATIC)");
    }
}
