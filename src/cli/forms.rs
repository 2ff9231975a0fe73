//! Prompt-driven transaction entry for the interactive shell.

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::ledger::{categories_for, parse_amount, parse_date, TransactionDraft, TransactionKind, DATE_FORMAT};

const OTHER_CATEGORY: &str = "Other (type a tag)";

/// Collects raw form values. Validation of amount and date happens inline so
/// the returned draft only fails on submit for reasons the prompts cannot see.
pub fn transaction_form(theme: &ColorfulTheme, today: NaiveDate) -> Result<TransactionDraft, CommandError> {
    let kinds = [TransactionKind::Expense, TransactionKind::Income];
    let labels: Vec<String> = kinds.iter().map(|kind| kind.label().to_string()).collect();
    let kind = kinds[io::select_index(theme, "Type", &labels, 0)?];

    let amount = io::prompt_validated(theme, "Amount", None, |value| {
        parse_amount(value).map(|_| ()).map_err(|err| err.to_string())
    })?;

    let category = choose_category(theme, kind)?;

    let default_date = today.format(DATE_FORMAT).to_string();
    let date = io::prompt_validated(theme, "Date (YYYY-MM-DD)", Some(&default_date), |value| {
        parse_date(value).map(|_| ()).map_err(|err| err.to_string())
    })?;

    let description = io::prompt_text(theme, "Description (optional)", None)?;

    Ok(TransactionDraft {
        kind: kind.as_str().to_string(),
        amount,
        category,
        date,
        description,
    })
}

fn choose_category(theme: &ColorfulTheme, kind: TransactionKind) -> Result<String, CommandError> {
    let options: Vec<_> = categories_for(kind).collect();
    let mut labels: Vec<String> = options.iter().map(|info| info.label.to_string()).collect();
    labels.push(OTHER_CATEGORY.to_string());

    let choice = io::select_index(theme, "Category", &labels, 0)?;
    match options.get(choice) {
        Some(info) => Ok(info.tag.to_string()),
        None => io::prompt_validated(theme, "Category tag", None, |value| {
            if value.trim().is_empty() {
                Err("category is required".to_string())
            } else {
                Ok(())
            }
        }),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
