use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Knobs for one terminal session. Every field has a default so a partial
/// JSON object (or none at all) is enough to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub user: String,
    pub host: String,
    pub history_capacity: usize,
    pub history_key: String,
    pub visited_key: String,
    pub market_endpoint: String,
    pub movie_asset: String,
    /// how long the loading indicator runs before a takeover starts
    pub loading_delay_ms: u32,
    pub loading_tick_ms: u32,
    /// one movie "tick"; a frame lasts `ticks * frame_tick_ms`
    pub frame_tick_ms: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "portfolio.dev".to_string(),
            history_capacity: crate::history::HISTORY_CAPACITY,
            history_key: "terminal_history".to_string(),
            visited_key: "terminal_has_visited".to_string(),
            market_endpoint: "/api/crypto-prices".to_string(),
            movie_asset: "/starwars.txt".to_string(),
            loading_delay_ms: 3000,
            loading_tick_ms: 500,
            frame_tick_ms: 67,
        }
    }
}

impl TerminalConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
