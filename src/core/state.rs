use super::render::{ChartData, DisplayMode};
use super::services::{SummaryService, Totals};
use crate::ledger::{Filter, FilterController, Ledger, Transaction};

/// Everything the views are derived from. Owned by one controller and lent
/// out by reference to query and render functions.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ledger: Ledger,
    pub filter: FilterController,
    pub display_mode: DisplayMode,
}

impl AppState {
    pub fn new(ledger: Ledger, display_mode: DisplayMode) -> Self {
        Self {
            ledger,
            filter: FilterController::new(),
            display_mode,
        }
    }

    pub fn active_filter(&self) -> &Filter {
        self.filter.active()
    }

    /// Dashboard totals, independent of the active filter.
    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    /// Filtered transactions, newest first.
    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        self.ledger.filtered(self.filter.active())
    }

    pub fn chart_data(&self) -> ChartData {
        let filter = self.filter.active();
        ChartData {
            categories: SummaryService::category_totals(self.ledger.matching(filter)),
            monthly: SummaryService::monthly_totals(self.ledger.matching(filter)),
        }
    }
}
