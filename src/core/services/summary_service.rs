use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use chrono::{Datelike, NaiveDate};

use crate::currency::month_label;
use crate::ledger::{Category, Transaction, TransactionKind};

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Calendar year-month used to bucket the monthly chart. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short chart label such as `Mar 24`.
    pub fn label(&self) -> String {
        format!("{} {:02}", month_label(self.month), self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub bucket: MonthBucket,
    pub income: f64,
    pub expense: f64,
}

/// Stateless aggregation passes over transaction sequences.
pub struct SummaryService;

impl SummaryService {
    pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
        let (income, expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expense),
                    TransactionKind::Expense => (income, expense + txn.amount),
                });
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Expense sums per category, in the order each category is first seen.
    pub fn category_totals<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&Category, usize> = HashMap::new();
        for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
            match index.get(&txn.category) {
                Some(&slot) => totals[slot].amount += txn.amount,
                None => {
                    index.insert(&txn.category, totals.len());
                    totals.push(CategoryTotal {
                        category: txn.category.clone(),
                        amount: txn.amount,
                    });
                }
            }
        }
        totals
    }

    /// Income and expense sums per year-month, oldest month first.
    pub fn monthly_totals<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<MonthlyTotal> {
        let mut buckets: BTreeMap<MonthBucket, (f64, f64)> = BTreeMap::new();
        for txn in transactions {
            let entry = buckets.entry(MonthBucket::of(txn.date)).or_default();
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
        }
        buckets
            .into_iter()
            .map(|(bucket, (income, expense))| MonthlyTotal {
                bucket,
                income,
                expense,
            })
            .collect()
    }
}
