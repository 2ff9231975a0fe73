#![allow(dead_code)]

use std::{
    cell::Cell,
    collections::HashMap,
    io,
    path::PathBuf,
    rc::Rc,
    sync::Mutex,
};

use chrono::NaiveDate;
use expense_tracker::{
    core::{services::Totals, ChartData, DisplayMode, Renderer},
    currency::{ConversionError, CurrencyCode, RateSource, RateTable},
    errors::LedgerError,
    ledger::{Category, Transaction, TransactionKind},
    storage::{JsonStorage, StorageBackend},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn temp_storage() -> JsonStorage {
    JsonStorage::new(Some(temp_dir().join("storage"))).expect("create json storage backend")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn txn(kind: TransactionKind, amount: f64, category: &str, day: NaiveDate) -> Transaction {
    Transaction::new(kind, amount, Category::new(category), day, None).expect("valid transaction")
}

/// The three-transaction ledger used across scenario tests.
pub fn scenario() -> Vec<Transaction> {
    vec![
        txn(TransactionKind::Expense, 50.0, "food", date(2024, 1, 10)),
        txn(TransactionKind::Income, 2000.0, "salary", date(2024, 1, 5)),
        txn(TransactionKind::Expense, 30.0, "transport", date(2024, 2, 1)),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    List(Vec<uuid::Uuid>),
    Summary(Totals),
    Charts(ChartData),
    Conversion(String),
    DisplayMode(DisplayMode),
}

/// Records every render call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Rendered>,
}

impl RecordingRenderer {
    pub fn last_list(&self) -> Option<&[uuid::Uuid]> {
        self.calls.iter().rev().find_map(|call| match call {
            Rendered::List(ids) => Some(ids.as_slice()),
            _ => None,
        })
    }

    pub fn conversions(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Rendered::Conversion(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render_list(&mut self, transactions: &[&Transaction]) -> io::Result<()> {
        self.calls
            .push(Rendered::List(transactions.iter().map(|txn| txn.id).collect()));
        Ok(())
    }

    fn render_summary(&mut self, totals: &Totals) -> io::Result<()> {
        self.calls.push(Rendered::Summary(*totals));
        Ok(())
    }

    fn render_charts(&mut self, charts: &ChartData) -> io::Result<()> {
        self.calls.push(Rendered::Charts(charts.clone()));
        Ok(())
    }

    fn render_conversion(&mut self, message: &str) -> io::Result<()> {
        self.calls.push(Rendered::Conversion(message.to_string()));
        Ok(())
    }

    fn render_display_mode(&mut self, mode: DisplayMode) -> io::Result<()> {
        self.calls.push(Rendered::DisplayMode(mode));
        Ok(())
    }
}

/// Fixed rate table keyed by base currency; counts lookups.
#[derive(Clone, Default)]
pub struct StubRates {
    tables: HashMap<String, HashMap<String, f64>>,
    pub calls: Rc<Cell<usize>>,
    pub offline: bool,
}

impl StubRates {
    pub fn with_rates(base: &str, rates: &[(&str, f64)]) -> Self {
        let mut stub = Self::default();
        stub.tables.insert(
            base.to_string(),
            rates.iter().map(|(code, rate)| (code.to_string(), *rate)).collect(),
        );
        stub
    }

    pub fn add_table(&mut self, base: &str, rates: &[(&str, f64)]) {
        self.tables.insert(
            base.to_string(),
            rates.iter().map(|(code, rate)| (code.to_string(), *rate)).collect(),
        );
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

impl RateSource for StubRates {
    fn latest(&self, base: &CurrencyCode) -> Result<RateTable, ConversionError> {
        self.calls.set(self.calls.get() + 1);
        if self.offline {
            return Err(ConversionError::Fetch("connection refused".into()));
        }
        Ok(RateTable {
            base: Some(base.to_string()),
            rates: self.tables.get(base.as_str()).cloned().unwrap_or_default(),
        })
    }
}

/// Reads like an empty store; every write fails.
#[derive(Default)]
pub struct ReadOnlyStorage;

impl StorageBackend for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, LedgerError> {
        Ok(None)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<(), LedgerError> {
        Err(LedgerError::Storage(format!("`{}` is read-only", key)))
    }
}
