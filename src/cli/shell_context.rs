use std::io::{self, Stdout};

use dialoguer::theme::ColorfulTheme;
use tracing::warn;

use crate::{
    config::{Config, ConfigManager},
    core::{utils::PathResolver, ExpenseTracker},
    currency::HttpRateSource,
    storage::JsonStorage,
};

use super::commands;
use super::core::CliError;
use super::registry::{CommandEntry, CommandRegistry};
use super::ui::TerminalRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type Tracker = ExpenseTracker<JsonStorage, HttpRateSource>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub renderer: TerminalRenderer<Stdout>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Resolves the application directory, loads config, and restores the
    /// persisted ledger. Unreadable config falls back to defaults.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load().unwrap_or_else(|err| {
            warn!(error = %err, "config unreadable, using defaults");
            Config::default()
        });

        let storage_dir = config
            .data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::storage_dir_in(&base));
        let storage = JsonStorage::new(Some(storage_dir))?;
        let rates = HttpRateSource::new(config.rates_endpoint.clone());
        let tracker = ExpenseTracker::open(storage, rates);

        let renderer = TerminalRenderer::new(io::stdout(), mode == CliMode::Interactive)
            .with_money_format(config.locale_config(), config.currency_code())
            .with_display_mode(tracker.state().display_mode);

        Ok(Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            tracker,
            renderer,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        if self.tracker.state().active_filter().is_unrestricted() {
            "expense-tracker> ".to_string()
        } else {
            "expense-tracker [filtered]> ".to_string()
        }
    }

    /// Re-applies money formatting after a config change.
    pub fn refresh_renderer(&mut self) {
        self.renderer
            .set_money_format(self.config.locale_config(), self.config.currency_code());
    }
}
