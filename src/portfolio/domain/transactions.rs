use std::fmt;

use chrono::{DateTime, Utc};
use semval::prelude::*;
use uuid::Uuid;

const MAX_ASSET_NAME_LENGTH: usize = 100;
const MAX_TICKER_LENGTH: usize = 10;
const MAX_ESG_SCORE: f64 = 100.0;

/// The kind of an investment transaction.
///
/// BUY, SELL, and DIVIDEND are the well known values, but this is an open
/// enum: unrecognized strings are carried through unchanged rather than
/// rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Other(String),
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        match value {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            "DIVIDEND" => Self::Dividend,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("BUY"),
            Self::Sell => f.write_str("SELL"),
            Self::Dividend => f.write_str("DIVIDEND"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

/// A transaction entered by a user that has not been persisted yet. Only
/// constructable through [`Self::from_data`], which validates it.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    id: Uuid,
    account_id: Uuid,
    amount: f64,
    currency: String,
    transaction_type: TransactionType,
    asset_name: Option<String>,
    asset_ticker: Option<String>,
    esg_score: Option<f64>,
    co2_impact: Option<f64>,
    timestamp: DateTime<Utc>,
    notes: Option<String>,
}

impl NewTransaction {
    /// Construct a transaction from wire-level data, defaulting the currency
    /// to EUR and the timestamp to now.
    pub fn from_data(
        account_id: Uuid,
        data: NewTransactionData,
    ) -> Result<Self, ValidationContext<NewTransactionInvalidity>> {
        let into = Self {
            id: Uuid::new_v4(),
            account_id,
            amount: data.amount,
            currency: data.currency.unwrap_or_else(|| "EUR".to_owned()),
            transaction_type: TransactionType::from(data.transaction_type.as_str()),
            asset_name: data.asset_name,
            asset_ticker: data.asset_ticker,
            esg_score: data.esg_score,
            co2_impact: data.co2_impact,
            timestamp: data.timestamp.unwrap_or_else(Utc::now),
            notes: data.notes,
        };

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err(context),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn transaction_type(&self) -> &TransactionType {
        &self.transaction_type
    }

    pub fn asset_name(&self) -> Option<&str> {
        self.asset_name.as_deref()
    }

    pub fn asset_ticker(&self) -> Option<&str> {
        self.asset_ticker.as_deref()
    }

    pub fn esg_score(&self) -> Option<f64> {
        self.esg_score
    }

    pub fn co2_impact(&self) -> Option<f64> {
        self.co2_impact
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum NewTransactionInvalidity {
    /// The amount is NaN or infinite.
    AmountNotFinite,
    /// The currency is not a three letter uppercase ISO 4217 code.
    CurrencyFormat,
    /// The asset name exceeds the maximum length contained as a value.
    AssetNameTooLong(usize),
    /// The asset ticker exceeds the maximum length contained as a value.
    TickerTooLong(usize),
    /// The ESG score falls outside the 0-100 range.
    EsgScoreOutOfRange,
    /// The CO2 impact is negative or not finite.
    Co2ImpactInvalid,
}

impl Validate for NewTransaction {
    type Invalidity = NewTransactionInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !self.amount.is_finite(),
                NewTransactionInvalidity::AmountNotFinite,
            )
            .invalidate_if(
                !is_currency_code(&self.currency),
                NewTransactionInvalidity::CurrencyFormat,
            )
            .invalidate_if(
                self.asset_name
                    .as_deref()
                    .map(|name| name.chars().count() > MAX_ASSET_NAME_LENGTH)
                    .unwrap_or(false),
                NewTransactionInvalidity::AssetNameTooLong(MAX_ASSET_NAME_LENGTH),
            )
            .invalidate_if(
                self.asset_ticker
                    .as_deref()
                    .map(|ticker| ticker.chars().count() > MAX_TICKER_LENGTH)
                    .unwrap_or(false),
                NewTransactionInvalidity::TickerTooLong(MAX_TICKER_LENGTH),
            )
            .invalidate_if(
                self.esg_score
                    .map(|score| !(0.0..=MAX_ESG_SCORE).contains(&score))
                    .unwrap_or(false),
                NewTransactionInvalidity::EsgScoreOutOfRange,
            )
            .invalidate_if(
                self.co2_impact
                    .map(|kg| !kg.is_finite() || kg < 0.0)
                    .unwrap_or(false),
                NewTransactionInvalidity::Co2ImpactInvalid,
            )
            .into()
    }
}

fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.bytes().all(|c| c.is_ascii_uppercase())
}

/// Wire-level data for a new transaction.
#[derive(Clone, Debug)]
pub struct NewTransactionData {
    pub amount: f64,
    pub currency: Option<String>,
    pub transaction_type: String,
    pub asset_name: Option<String>,
    pub asset_ticker: Option<String>,
    pub esg_score: Option<f64>,
    pub co2_impact: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A transaction that has been persisted.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub transaction_type: TransactionType,
    pub asset_name: Option<String>,
    pub asset_ticker: Option<String>,
    pub esg_score: Option<f64>,
    pub co2_impact: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
