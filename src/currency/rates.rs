use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use super::CurrencyCode;

pub const DEFAULT_RATES_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";

/// Response body of the rate endpoint; only `rates` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateTable {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Rate for `code`, ignoring zero, negative, or non-finite entries.
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates
            .get(code.as_str())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("Please enter a valid amount.")]
    InvalidAmount,
    #[error("Unknown currency code `{0}`.")]
    InvalidCurrency(String),
    #[error("Conversion rate not available.")]
    RateUnavailable { from: String, to: String },
    #[error("Failed to fetch exchange rates. Check your connection.")]
    Fetch(String),
}

/// Supplies the latest rate table for a base currency.
pub trait RateSource {
    fn latest(&self, base: &CurrencyCode) -> Result<RateTable, ConversionError>;
}

/// Blocking HTTP lookup: `GET {endpoint}/{BASE}`. No caching and no retry.
#[derive(Clone)]
pub struct HttpRateSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpRateSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn url_for(&self, base: &CurrencyCode) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), base.as_str())
    }
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_ENDPOINT)
    }
}

impl RateSource for HttpRateSource {
    fn latest(&self, base: &CurrencyCode) -> Result<RateTable, ConversionError> {
        let url = self.url_for(base);
        debug!(%url, "fetching exchange rates");
        let response = self.agent.get(&url).call().map_err(|err| {
            error!(%url, error = %err, "exchange rate request failed");
            ConversionError::Fetch(err.to_string())
        })?;
        let body = response
            .into_string()
            .map_err(|err| ConversionError::Fetch(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| {
            error!(%url, error = %err, "exchange rate response could not be parsed");
            ConversionError::Fetch(err.to_string())
        })
    }
}

/// Validated converter inputs, ready for a rate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// The amount exactly as entered, trimmed.
    pub input: String,
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub input: String,
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
    pub converted: f64,
}

impl Conversion {
    /// `100.50 USD = 92.96 EUR (1 USD = 0.9250 EUR)`, echoing the amount as typed.
    pub fn describe(&self) -> String {
        format!(
            "{} {} = {:.2} {} (1 {} = {:.4} {})",
            self.input, self.from, self.converted, self.to, self.from, self.rate, self.to
        )
    }
}

pub struct CurrencyConverter<R> {
    source: R,
}

impl<R: RateSource> CurrencyConverter<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Checks the inputs without touching the network.
    pub fn validate(
        &self,
        amount_input: &str,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ConversionRequest, ConversionError> {
        let input = amount_input.trim();
        let amount = input
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or(ConversionError::InvalidAmount)?;
        for code in [from, to] {
            if !code.is_well_formed() {
                return Err(ConversionError::InvalidCurrency(code.to_string()));
            }
        }
        Ok(ConversionRequest {
            input: input.to_string(),
            amount,
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// One rate lookup for the request's base currency.
    pub fn lookup(&self, request: &ConversionRequest) -> Result<Conversion, ConversionError> {
        let table = self.source.latest(&request.from)?;
        let rate = table
            .rate(&request.to)
            .ok_or_else(|| ConversionError::RateUnavailable {
                from: request.from.to_string(),
                to: request.to.to_string(),
            })?;
        Ok(Conversion {
            input: request.input.clone(),
            amount: request.amount,
            from: request.from.clone(),
            to: request.to.clone(),
            rate,
            converted: request.amount * rate,
        })
    }

    pub fn convert(
        &self,
        amount_input: &str,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Conversion, ConversionError> {
        let request = self.validate(amount_input, from, to)?;
        self.lookup(&request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTicket(u64);

/// Result panel of the converter. Only the most recently issued request may
/// publish, so a slow earlier lookup cannot overwrite a newer answer.
#[derive(Debug, Default)]
pub struct ConversionSlot {
    issued: u64,
    shown: Option<Result<Conversion, ConversionError>>,
}

impl ConversionSlot {
    pub fn begin(&mut self) -> ConversionTicket {
        self.issued += 1;
        ConversionTicket(self.issued)
    }

    pub fn is_current(&self, ticket: ConversionTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Stores `outcome` if `ticket` is still current; returns whether it was kept.
    pub fn publish(
        &mut self,
        ticket: ConversionTicket,
        outcome: Result<Conversion, ConversionError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale conversion result");
            return false;
        }
        self.shown = Some(outcome);
        true
    }

    pub fn shown(&self) -> Option<&Result<Conversion, ConversionError>> {
        self.shown.as_ref()
    }
}
