//! Terminal implementation of the rendering port.

use std::io::{self, Write};

use colored::{Color, Colorize};
use uuid::Uuid;

use super::table_renderer::{Table, TableColumn};
use crate::{
    core::{services::Totals, ChartData, DisplayMode, Renderer},
    currency::{format_currency_value, format_date, CurrencyCode, LocaleConfig},
    ledger::Transaction,
};

pub const EMPTY_LIST_MESSAGE: &str = "No transactions match your filters.";
const BAR_WIDTH: usize = 30;

const LIGHT_PALETTE: [Color; 6] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
];

const DARK_PALETTE: [Color; 6] = [
    Color::BrightBlue,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightRed,
];

/// First eight hex digits of a transaction id, as shown in lists.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

pub struct TerminalRenderer<W> {
    out: W,
    styled: bool,
    locale: LocaleConfig,
    currency: CurrencyCode,
    display_mode: DisplayMode,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            locale: LocaleConfig::default(),
            currency: CurrencyCode::default(),
            display_mode: DisplayMode::default(),
        }
    }

    pub fn with_money_format(mut self, locale: LocaleConfig, currency: CurrencyCode) -> Self {
        self.set_money_format(locale, currency);
        self
    }

    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    pub fn set_money_format(&mut self, locale: LocaleConfig, currency: CurrencyCode) {
        self.locale = locale;
        self.currency = currency;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn money(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale)
    }

    fn palette(&self) -> &'static [Color] {
        if self.display_mode.is_dark() {
            &DARK_PALETTE
        } else {
            &LIGHT_PALETTE
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.styled {
            text.color(color).to_string()
        } else {
            text
        }
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let line = if self.styled {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        writeln!(self.out, "\n{}", line)
    }

    fn income_color(&self) -> Color {
        if self.display_mode.is_dark() {
            Color::BrightGreen
        } else {
            Color::Green
        }
    }

    fn expense_color(&self) -> Color {
        if self.display_mode.is_dark() {
            Color::BrightRed
        } else {
            Color::Red
        }
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells.max(1))
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_list(&mut self, transactions: &[&Transaction]) -> io::Result<()> {
        self.heading("Transactions")?;
        if transactions.is_empty() {
            return writeln!(self.out, "{}", EMPTY_LIST_MESSAGE);
        }
        let mut table = Table::new(vec![
            TableColumn::left("ID"),
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Category"),
            TableColumn::left("Description").truncate_at(32),
            TableColumn::right("Amount"),
        ]);
        for txn in transactions {
            let amount = format!("{}{}", txn.kind.sign(), self.money(txn.amount));
            let color = if txn.is_income() {
                self.income_color()
            } else {
                self.expense_color()
            };
            table.push_row(vec![
                short_id(&txn.id),
                format_date(txn.date),
                txn.kind.label().to_string(),
                txn.category.label().to_string(),
                txn.description.clone(),
                self.paint(amount, color),
            ]);
        }
        writeln!(self.out, "{}", table.render())
    }

    fn render_summary(&mut self, totals: &Totals) -> io::Result<()> {
        self.heading("Summary")?;
        let income = self.paint(self.money(totals.income), self.income_color());
        let expense = self.paint(self.money(totals.expense), self.expense_color());
        let balance = self.money(totals.balance);
        writeln!(self.out, "  Total income   : {}", income)?;
        writeln!(self.out, "  Total expenses : {}", expense)?;
        writeln!(self.out, "  Balance        : {}", balance)?;
        writeln!(
            self.out,
            "  Theme          : {} {}",
            self.display_mode,
            self.display_mode.icon()
        )
    }

    fn render_charts(&mut self, charts: &ChartData) -> io::Result<()> {
        self.heading("Expenses by Category")?;
        if charts.categories.is_empty() {
            writeln!(self.out, "No expense data for the current filters.")?;
        } else {
            let total: f64 = charts.categories.iter().map(|slice| slice.amount).sum();
            let max = charts
                .categories
                .iter()
                .map(|slice| slice.amount)
                .fold(0.0, f64::max);
            let label_width = charts
                .categories
                .iter()
                .map(|slice| slice.category.label().chars().count())
                .max()
                .unwrap_or(0);
            let palette = self.palette();
            for (idx, slice) in charts.categories.iter().enumerate() {
                let share = if total > 0.0 { slice.amount / total * 100.0 } else { 0.0 };
                let slice_bar = self.paint(bar(slice.amount, max), palette[idx % palette.len()]);
                let amount = self.money(slice.amount);
                writeln!(
                    self.out,
                    "  {:<width$}  {:>12}  {:>5.1}%  {}",
                    slice.category.label(),
                    amount,
                    share,
                    slice_bar,
                    width = label_width
                )?;
            }
        }

        self.heading("Monthly Income vs Expenses")?;
        if charts.monthly.is_empty() {
            return writeln!(self.out, "No monthly data for the current filters.");
        }
        let max = charts
            .monthly
            .iter()
            .map(|month| month.income.max(month.expense))
            .fold(0.0, f64::max);
        for month in &charts.monthly {
            let income_bar = self.paint(bar(month.income, max), self.income_color());
            let expense_bar = self.paint(bar(month.expense, max), self.expense_color());
            let (income, expense) = (self.money(month.income), self.money(month.expense));
            let label = month.bucket.label();
            writeln!(self.out, "  {}  income  {:>12} {}", label, income, income_bar)?;
            writeln!(
                self.out,
                "  {}  expense {:>12} {}",
                " ".repeat(label.chars().count()),
                expense,
                expense_bar
            )?;
        }
        Ok(())
    }

    fn render_conversion(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "Converter: {}", message)
    }

    fn render_display_mode(&mut self, mode: DisplayMode) -> io::Result<()> {
        self.display_mode = mode;
        let name = if mode.is_dark() { "Dark" } else { "Light" };
        writeln!(
            self.out,
            "{} mode enabled (toggle: {})",
            name,
            mode.icon()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::ledger::{Category, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, amount: f64, category: &str, month: u32, day: u32) -> Transaction {
        Transaction::new(
            kind,
            amount,
            Category::new(category),
            NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            None,
        )
        .unwrap()
    }

    fn render_to_string(render: impl FnOnce(&mut TerminalRenderer<Vec<u8>>)) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        render(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let output = render_to_string(|r| r.render_list(&[]).unwrap());
        assert!(output.contains(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn list_rows_carry_signed_amounts_and_labels() {
        let food = txn(TransactionKind::Expense, 50.0, "food", 1, 10);
        let salary = txn(TransactionKind::Income, 2000.0, "salary", 1, 5);
        let output = render_to_string(|r| r.render_list(&[&food, &salary]).unwrap());

        assert!(output.contains("Jan 10, 2024"));
        assert!(output.contains("Food & Dining"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("+$2,000.00"));
        assert!(output.contains(&short_id(&food.id)));
        assert!(output.contains("No description"));
    }

    #[test]
    fn summary_uses_configured_currency() {
        let totals = Totals {
            income: 1234.5,
            expense: 34.5,
            balance: 1200.0,
        };
        let output = render_to_string(|r| {
            r.set_money_format(LocaleConfig::from_tag("de-DE"), CurrencyCode::new("EUR"));
            r.render_summary(&totals).unwrap()
        });
        assert!(output.contains("€1.234,50"));
        assert!(output.contains("€1.200,00"));
        assert!(output.contains("light 🌙"));
    }

    #[test]
    fn charts_render_both_sections() {
        let items = [
            txn(TransactionKind::Expense, 50.0, "food", 1, 10),
            txn(TransactionKind::Income, 2000.0, "salary", 1, 5),
            txn(TransactionKind::Expense, 30.0, "transport", 2, 1),
        ];
        let charts = ChartData {
            categories: SummaryService::category_totals(&items),
            monthly: SummaryService::monthly_totals(&items),
        };
        let output = render_to_string(|r| r.render_charts(&charts).unwrap());

        assert!(output.contains("Expenses by Category"));
        assert!(output.contains("62.5%"));
        assert!(output.contains("Monthly Income vs Expenses"));
        assert!(output.contains("Jan 24"));
        assert!(output.contains("Feb 24"));
    }

    #[test]
    fn display_mode_switch_is_remembered() {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        renderer.render_display_mode(DisplayMode::Dark).unwrap();
        assert!(renderer.display_mode().is_dark());
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Dark mode enabled"));
    }
}
