use std::rc::Rc;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::assets::{AssetSource, StaticAssets};
use crate::command::CommandRegistry;
use crate::config::TerminalConfig;
use crate::history::HistoryLog;
use crate::market::{MarketData, OfflineMarket};
use crate::path::PathStack;
use crate::vfs::VirtualFileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
}

impl Theme {
    pub const NAMES: &'static [&'static str] = &["dark", "light"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// colors the display surface applies for this theme
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette { background: "black", text: "green" },
            Theme::Light => Palette { background: "white", text: "black" },
        }
    }
}

/// Everything a command handler may read or change. Commands get it by
/// `&mut`; the display surface only ever sees the result through the session.
pub struct TerminalContext {
    pub fs: Rc<VirtualFileSystem>,
    pub cwd: PathStack,
    pub theme: Theme,
    /// 3D model panel behind the terminal
    pub viewer_visible: bool,
    pub history: HistoryLog,
    pub config: TerminalConfig,
    pub started_at: DateTime<Local>,
    market: Rc<dyn MarketData>,
    assets: Rc<dyn AssetSource>,
    registry: Option<Rc<CommandRegistry>>,
}

impl TerminalContext {
    pub fn new(fs: Rc<VirtualFileSystem>, config: TerminalConfig) -> Self {
        let history = HistoryLog::new(config.history_capacity);
        Self {
            fs,
            cwd: PathStack::root(),
            theme: Theme::default(),
            viewer_visible: true,
            history,
            config,
            started_at: Local::now(),
            market: Rc::new(OfflineMarket),
            assets: Rc::new(StaticAssets::new()),
            registry: None,
        }
    }

    pub fn with_market(mut self, market: Rc<dyn MarketData>) -> Self {
        self.market = market;
        self
    }

    pub fn with_assets(mut self, assets: Rc<dyn AssetSource>) -> Self {
        self.assets = assets;
        self
    }

    pub fn market(&self) -> Rc<dyn MarketData> {
        Rc::clone(&self.market)
    }

    pub fn assets(&self) -> Rc<dyn AssetSource> {
        Rc::clone(&self.assets)
    }

    pub fn get_command_registry(&self) -> Option<&Rc<CommandRegistry>> {
        self.registry.as_ref()
    }

    pub fn set_command_registry(&mut self, registry: Rc<CommandRegistry>) {
        self.registry = Some(registry);
    }

    /// `user@host current $`
    pub fn prompt(&self) -> String {
        format!("{}@{} {} $", self.config.user, self.config.host, self.cwd.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::Directory;

    #[test]
    fn theme_names_round_trip() {
        for name in Theme::NAMES {
            assert_eq!(Theme::from_name(name).map(Theme::name), Some(*name));
        }
        assert_eq!(Theme::from_name("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::from_name("purple"), None);
    }

    #[test]
    fn prompt_uses_last_segment() {
        let fs = Rc::new(VirtualFileSystem::new(Directory::new()));
        let mut ctx = TerminalContext::new(fs, TerminalConfig::default());
        assert_eq!(ctx.prompt(), "user@portfolio.dev ~ $");
        ctx.cwd = ctx.cwd.child("projects");
        assert_eq!(ctx.prompt(), "user@portfolio.dev projects $");
    }
}
