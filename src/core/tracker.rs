//! The view-model controller: owns the application state, persists every
//! mutation, and re-renders the affected views.

use std::io;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::render::{render_dashboard, render_filtered, DisplayMode, Renderer};
use super::services::{ServiceError, ServiceResult, TransactionService};
use super::state::AppState;
use crate::{
    currency::{
        Conversion, ConversionError, ConversionRequest, ConversionSlot, ConversionTicket,
        CurrencyCode, CurrencyConverter, RateSource,
    },
    errors::LedgerError,
    ledger::{Filter, Ledger, Transaction, TransactionDraft},
    storage::{self, StorageBackend},
};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("render failed: {0}")]
    Render(#[from] io::Error),
    #[error("conversion superseded by a newer request")]
    Superseded,
}

impl From<LedgerError> for TrackerError {
    fn from(err: LedgerError) -> Self {
        TrackerError::Service(ServiceError::Ledger(err))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// A validated conversion waiting for its rate lookup to be published.
#[derive(Debug, Clone)]
pub struct PendingConversion {
    ticket: ConversionTicket,
    request: ConversionRequest,
}

pub struct ExpenseTracker<S, R> {
    state: AppState,
    storage: S,
    converter: CurrencyConverter<R>,
    conversions: ConversionSlot,
}

impl<S: StorageBackend, R: RateSource> ExpenseTracker<S, R> {
    /// Restores persisted state. Never fails: unreadable data starts empty.
    pub fn open(storage: S, rates: R) -> Self {
        let ledger = storage::load_ledger(&storage);
        let display_mode = storage::load_display_mode(&storage);
        info!(
            transactions = ledger.len(),
            display_mode = %display_mode,
            "expense tracker opened"
        );
        Self {
            state: AppState::new(ledger, display_mode),
            storage,
            converter: CurrencyConverter::new(rates),
            conversions: ConversionSlot::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn conversions(&self) -> &ConversionSlot {
        &self.conversions
    }

    pub fn render(&self, renderer: &mut dyn Renderer) -> TrackerResult<()> {
        render_dashboard(&self.state, renderer)?;
        Ok(())
    }

    /// Adds a typed transaction, persists, and re-renders everything.
    pub fn add_transaction(
        &mut self,
        transaction: Transaction,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<Uuid> {
        let id = self.commit(|ledger| TransactionService::add(ledger, transaction))?;
        self.render(renderer)?;
        Ok(id)
    }

    /// Parses raw form values; invalid input leaves state untouched.
    pub fn submit(
        &mut self,
        draft: TransactionDraft,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<Transaction> {
        let transaction = self.commit(|ledger| TransactionService::add_draft(ledger, draft))?;
        self.render(renderer)?;
        Ok(transaction)
    }

    pub fn remove_transaction(
        &mut self,
        id: Uuid,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<Transaction> {
        let removed = self.commit(|ledger| TransactionService::remove(ledger, id))?;
        self.render(renderer)?;
        Ok(removed)
    }

    pub fn apply_filter(&mut self, filter: Filter, renderer: &mut dyn Renderer) -> TrackerResult<()> {
        self.state.filter.apply(filter);
        render_filtered(&self.state, renderer)?;
        Ok(())
    }

    pub fn reset_filter(&mut self, renderer: &mut dyn Renderer) -> TrackerResult<()> {
        self.state.filter.reset();
        render_filtered(&self.state, renderer)?;
        Ok(())
    }

    pub fn set_display_mode(
        &mut self,
        mode: DisplayMode,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<()> {
        storage::save_display_mode(&self.storage, mode)?;
        self.state.display_mode = mode;
        renderer.render_display_mode(mode)?;
        Ok(())
    }

    pub fn toggle_display_mode(&mut self, renderer: &mut dyn Renderer) -> TrackerResult<DisplayMode> {
        let next = self.state.display_mode.toggled();
        self.set_display_mode(next, renderer)?;
        Ok(next)
    }

    /// Validates, looks up the rate, and publishes in one go.
    pub fn convert(
        &mut self,
        amount: &str,
        from: &CurrencyCode,
        to: &CurrencyCode,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<Conversion> {
        let pending = self.begin_conversion(amount, from, to, renderer)?;
        let outcome = self.lookup(&pending);
        self.finish_conversion(pending, outcome, renderer)
    }

    /// Issues a ticket and validates locally. Invalid input is published at
    /// once and never reaches the rate source.
    pub fn begin_conversion(
        &mut self,
        amount: &str,
        from: &CurrencyCode,
        to: &CurrencyCode,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<PendingConversion> {
        let ticket = self.conversions.begin();
        let request = match self.converter.validate(amount, from, to) {
            Ok(request) => request,
            Err(err) => {
                self.conversions.publish(ticket, Err(err.clone()));
                renderer.render_conversion(&err.to_string())?;
                return Err(err.into());
            }
        };
        renderer.render_conversion("Converting...")?;
        Ok(PendingConversion { ticket, request })
    }

    /// The rate lookup for a pending conversion. Leaves tracker state alone,
    /// so lookups for several pending requests may complete in any order.
    pub fn lookup(&self, pending: &PendingConversion) -> Result<Conversion, ConversionError> {
        self.converter.lookup(&pending.request)
    }

    /// Publishes `outcome` unless a newer conversion was begun since
    /// `pending`, in which case nothing is rendered.
    pub fn finish_conversion(
        &mut self,
        pending: PendingConversion,
        outcome: Result<Conversion, ConversionError>,
        renderer: &mut dyn Renderer,
    ) -> TrackerResult<Conversion> {
        if !self.conversions.publish(pending.ticket, outcome.clone()) {
            return Err(TrackerError::Superseded);
        }
        let message = match &outcome {
            Ok(conversion) => conversion.describe(),
            Err(err) => err.to_string(),
        };
        renderer.render_conversion(&message)?;
        Ok(outcome?)
    }

    /// Applies `mutate` to a copy of the ledger and swaps it in only once the
    /// new list is persisted.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Ledger) -> ServiceResult<T>,
    ) -> TrackerResult<T> {
        let mut next = self.state.ledger.clone();
        let value = mutate(&mut next)?;
        storage::save_ledger(&self.storage, &next)?;
        debug!(transactions = next.len(), "ledger persisted");
        self.state.ledger = next;
        Ok(value)
    }
}
