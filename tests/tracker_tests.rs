mod common;

use common::{date, scenario, temp_storage, ReadOnlyStorage, RecordingRenderer, Rendered, StubRates};
use expense_tracker::{
    core::{services::ServiceError, DisplayMode, ExpenseTracker, TrackerError},
    errors::LedgerError,
    currency::{ConversionError, CurrencyCode},
    ledger::{Category, Filter, Transaction, TransactionDraft, TransactionKind},
    storage::{self, MemoryStorage, StorageBackend},
};

fn draft(kind: &str, amount: &str, category: &str, day: &str) -> TransactionDraft {
    TransactionDraft {
        kind: kind.into(),
        amount: amount.into(),
        category: category.into(),
        date: day.into(),
        description: String::new(),
    }
}

#[test]
fn adding_persists_and_rerenders_every_view() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();

    let added = tracker
        .submit(draft("expense", "50.00", "food", "2024-01-10"), &mut renderer)
        .unwrap();

    assert_eq!(renderer.calls.len(), 3);
    assert!(matches!(renderer.calls[0], Rendered::Summary(totals) if totals.expense == 50.0));
    assert_eq!(renderer.last_list(), Some(&[added.id][..]));
    assert!(matches!(renderer.calls[2], Rendered::Charts(_)));

    let persisted = storage::load_ledger(tracker.storage());
    assert_eq!(persisted.transactions(), tracker.state().ledger.transactions());
}

#[test]
fn invalid_drafts_leave_state_and_storage_untouched() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();

    for bad in [
        draft("expense", "0", "food", "2024-01-10"),
        draft("expense", "-4", "food", "2024-01-10"),
        draft("expense", "abc", "food", "2024-01-10"),
        draft("", "10", "food", "2024-01-10"),
        draft("expense", "10", "", "2024-01-10"),
        draft("expense", "10", "food", "10/01/2024"),
    ] {
        assert!(tracker.submit(bad, &mut renderer).is_err());
    }
    assert!(tracker.state().ledger.is_empty());
    assert!(renderer.calls.is_empty());
    assert!(storage::load_ledger(tracker.storage()).is_empty());
}

#[test]
fn typed_transactions_are_checked_before_commit() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();
    let valid = common::txn(TransactionKind::Expense, 50.0, "food", date(2024, 1, 10));

    let negative = Transaction {
        amount: -50.0,
        ..valid.clone()
    };
    let uncategorised = Transaction {
        category: Category::new(""),
        ..valid.clone()
    };
    let infinite = Transaction {
        amount: f64::INFINITY,
        ..valid
    };

    for bad in [negative, uncategorised, infinite] {
        let err = tracker.add_transaction(bad, &mut renderer).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Service(ServiceError::Ledger(LedgerError::InvalidInput(_)))
        ));
    }
    assert!(tracker.state().ledger.is_empty());
    assert_eq!(tracker.state().totals().balance, 0.0);
    assert!(renderer.calls.is_empty());
    assert_eq!(tracker.storage().get_item(storage::TRANSACTIONS_KEY).unwrap(), None);
}

#[test]
fn failed_write_rolls_back_the_mutation() {
    let mut tracker = ExpenseTracker::open(ReadOnlyStorage, StubRates::default());
    let mut renderer = RecordingRenderer::default();

    let result = tracker.submit(draft("income", "10", "gift", "2024-01-01"), &mut renderer);
    assert!(result.is_err());
    assert!(tracker.state().ledger.is_empty());
    assert!(renderer.calls.is_empty());
}

#[test]
fn reopening_restores_ledger_and_display_mode() {
    let storage = temp_storage();
    let mut renderer = RecordingRenderer::default();
    {
        let mut tracker = ExpenseTracker::open(storage.clone(), StubRates::default());
        for transaction in scenario() {
            tracker.add_transaction(transaction, &mut renderer).unwrap();
        }
        tracker
            .set_display_mode(DisplayMode::Dark, &mut renderer)
            .unwrap();
    }

    let reopened = ExpenseTracker::open(storage, StubRates::default());
    assert_eq!(reopened.state().ledger.len(), 3);
    assert_eq!(reopened.state().display_mode, DisplayMode::Dark);
    assert_eq!(reopened.state().totals().balance, 1920.0);
}

#[test]
fn filter_changes_only_rerender_filtered_views() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();
    for transaction in scenario() {
        tracker.add_transaction(transaction, &mut renderer).unwrap();
    }
    renderer.clear();

    tracker
        .apply_filter(Filter::all().with_kind(TransactionKind::Income), &mut renderer)
        .unwrap();
    assert_eq!(renderer.calls.len(), 2);
    assert_eq!(renderer.last_list().map(<[_]>::len), Some(1));
    // Dashboard totals ignore the filter.
    assert_eq!(tracker.state().totals().expense, 80.0);

    tracker.reset_filter(&mut renderer).unwrap();
    assert_eq!(renderer.last_list().map(<[_]>::len), Some(3));
    assert!(tracker.state().active_filter().is_unrestricted());
}

#[test]
fn filter_from_panel_inputs_ignores_malformed_dates() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();
    for transaction in scenario() {
        tracker.add_transaction(transaction, &mut renderer).unwrap();
    }

    let filter = Filter::from_inputs("2024-02-01", "not-a-date", "all", "expense");
    tracker.apply_filter(filter, &mut renderer).unwrap();
    assert_eq!(tracker.state().visible_transactions().len(), 1);
    assert_eq!(tracker.state().visible_transactions()[0].date, date(2024, 2, 1));
}

#[test]
fn removing_unknown_id_is_reported() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();
    let err = tracker
        .remove_transaction(uuid::Uuid::new_v4(), &mut renderer)
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn toggle_flips_and_persists_display_mode() {
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), StubRates::default());
    let mut renderer = RecordingRenderer::default();

    assert_eq!(tracker.toggle_display_mode(&mut renderer).unwrap(), DisplayMode::Dark);
    assert_eq!(storage::load_display_mode(tracker.storage()), DisplayMode::Dark);
    assert_eq!(tracker.toggle_display_mode(&mut renderer).unwrap(), DisplayMode::Light);
    assert_eq!(
        renderer.calls,
        vec![
            Rendered::DisplayMode(DisplayMode::Dark),
            Rendered::DisplayMode(DisplayMode::Light)
        ]
    );
}

#[test]
fn invalid_amount_never_reaches_the_rate_source() {
    let rates = StubRates::with_rates("USD", &[("EUR", 0.925)]);
    let calls = rates.calls.clone();
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), rates);
    let mut renderer = RecordingRenderer::default();
    let (usd, eur) = (CurrencyCode::new("USD"), CurrencyCode::new("EUR"));

    for amount in ["0", "abc", "", "-3"] {
        let err = tracker.convert(amount, &usd, &eur, &mut renderer).unwrap_err();
        assert!(matches!(err, TrackerError::Conversion(ConversionError::InvalidAmount)));
    }
    assert_eq!(calls.get(), 0);
    assert!(renderer
        .conversions()
        .iter()
        .all(|message| *message == "Please enter a valid amount."));
}

#[test]
fn conversion_shows_progress_then_result() {
    let rates = StubRates::with_rates("USD", &[("EUR", 0.925)]);
    let calls = rates.calls.clone();
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), rates);
    let mut renderer = RecordingRenderer::default();

    let conversion = tracker
        .convert("100", &CurrencyCode::new("USD"), &CurrencyCode::new("EUR"), &mut renderer)
        .unwrap();

    assert!((conversion.converted - 92.5).abs() < 1e-9);
    assert_eq!(calls.get(), 1);
    assert_eq!(
        renderer.conversions(),
        vec!["Converting...", "100 USD = 92.50 EUR (1 USD = 0.9250 EUR)"]
    );
    assert!(matches!(tracker.conversions().shown(), Some(Ok(_))));
}

#[test]
fn conversion_failures_are_plain_messages() {
    let mut renderer = RecordingRenderer::default();
    let mut offline = ExpenseTracker::open(MemoryStorage::new(), StubRates::offline());
    let err = offline
        .convert("10", &CurrencyCode::new("USD"), &CurrencyCode::new("EUR"), &mut renderer)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to fetch exchange rates. Check your connection."
    );

    let mut missing = ExpenseTracker::open(
        MemoryStorage::new(),
        StubRates::with_rates("USD", &[("EUR", 0.0)]),
    );
    let err = missing
        .convert("10", &CurrencyCode::new("USD"), &CurrencyCode::new("EUR"), &mut renderer)
        .unwrap_err();
    assert_eq!(err.to_string(), "Conversion rate not available.");
    assert_eq!(
        renderer.conversions().last().copied(),
        Some("Conversion rate not available.")
    );
}

#[test]
fn only_the_latest_overlapping_conversion_is_shown() {
    let mut rates = StubRates::with_rates("USD", &[("EUR", 0.925), ("GBP", 0.79)]);
    rates.add_table("EUR", &[("USD", 1.08)]);
    let mut tracker = ExpenseTracker::open(MemoryStorage::new(), rates);
    let mut renderer = RecordingRenderer::default();
    let (usd, eur, gbp) = (
        CurrencyCode::new("USD"),
        CurrencyCode::new("EUR"),
        CurrencyCode::new("GBP"),
    );

    let first = tracker
        .begin_conversion("100", &usd, &eur, &mut renderer)
        .unwrap();
    let second = tracker
        .begin_conversion("200", &usd, &gbp, &mut renderer)
        .unwrap();

    // The newer lookup answers first; the older one arrives late.
    let second_outcome = tracker.lookup(&second);
    let first_outcome = tracker.lookup(&first);
    let shown = tracker
        .finish_conversion(second, second_outcome, &mut renderer)
        .unwrap();
    let late = tracker.finish_conversion(first, first_outcome, &mut renderer);

    assert!(matches!(late, Err(TrackerError::Superseded)));
    assert_eq!(shown.to, gbp);
    assert_eq!(
        renderer.conversions(),
        vec!["Converting...", "Converting...", "200 USD = 158.00 GBP (1 USD = 0.7900 GBP)"]
    );
    assert!(matches!(
        tracker.conversions().shown(),
        Some(Ok(conversion)) if conversion.to == gbp
    ));

    // A newer request that fails validation also retires the pending one.
    let pending = tracker
        .begin_conversion("5", &eur, &usd, &mut renderer)
        .unwrap();
    let outcome = tracker.lookup(&pending);
    assert!(tracker.convert("0", &usd, &eur, &mut renderer).is_err());
    let stale = tracker.finish_conversion(pending, outcome, &mut renderer);
    assert!(matches!(stale, Err(TrackerError::Superseded)));
    assert_eq!(
        renderer.conversions().last().copied(),
        Some("Please enter a valid amount.")
    );
}
