//! Rendering port. Front ends implement [`Renderer`]; the ledger and filter
//! logic never touch widgets directly.

use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Serialize};

use super::services::{CategoryTotal, MonthlyTotal, Totals};
use super::state::AppState;
use crate::{errors::LedgerError, ledger::Transaction};

/// Persisted dark-mode preference, stored as `enabled` / `disabled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "disabled")]
    Light,
    #[serde(rename = "enabled")]
    Dark,
}

impl DisplayMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, DisplayMode::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    /// Icon of the toggle: the sun switches back to light, the moon to dark.
    pub fn icon(&self) -> &'static str {
        match self {
            DisplayMode::Light => "🌙",
            DisplayMode::Dark => "☀️",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        })
    }
}

impl FromStr for DisplayMode {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "on" | "enabled" => Ok(DisplayMode::Dark),
            "light" | "off" | "disabled" => Ok(DisplayMode::Light),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown display mode `{}` (use dark or light)",
                other
            ))),
        }
    }
}

/// Data behind the two charts, computed from the filtered transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    /// Pie view: expense sums per category.
    pub categories: Vec<CategoryTotal>,
    /// Bar view: income/expense per month, oldest first.
    pub monthly: Vec<MonthlyTotal>,
}

pub trait Renderer {
    fn render_list(&mut self, transactions: &[&Transaction]) -> io::Result<()>;
    fn render_summary(&mut self, totals: &Totals) -> io::Result<()>;
    fn render_charts(&mut self, charts: &ChartData) -> io::Result<()>;

    fn render_conversion(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn render_display_mode(&mut self, _mode: DisplayMode) -> io::Result<()> {
        Ok(())
    }
}

/// Full re-render: summary figures, filtered list, and both charts.
pub fn render_dashboard(state: &AppState, renderer: &mut dyn Renderer) -> io::Result<()> {
    renderer.render_summary(&state.totals())?;
    render_filtered(state, renderer)
}

/// Re-render of the filter-sensitive views only.
pub fn render_filtered(state: &AppState, renderer: &mut dyn Renderer) -> io::Result<()> {
    renderer.render_list(&state.visible_transactions())?;
    renderer.render_charts(&state.chart_data())
}
