use chrono::{DateTime, Utc};
use semval::context::Context as ValidationContext;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::portfolio::domain::{
    accounts::{self, NewAccountInvalidity},
    transactions::{self, NewTransactionInvalidity},
};

#[derive(Deserialize)]
pub struct NewAccountRequest {
    user_id: Uuid,
    name: String,
}

impl From<NewAccountRequest> for accounts::NewAccountData {
    fn from(rep: NewAccountRequest) -> Self {
        Self {
            user_id: rep.user_id,
            name: rep.name,
        }
    }
}

#[derive(Serialize)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&accounts::Account> for Account {
    fn from(account: &accounts::Account) -> Self {
        Self {
            id: account.id,
            user_id: account.user_id,
            name: account.name.clone(),
            created_at: account.created_at,
        }
    }
}

#[derive(Default, Serialize)]
pub struct AccountValidationError {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    name: Vec<String>,
}

impl From<ValidationContext<NewAccountInvalidity>> for AccountValidationError {
    fn from(validation: ValidationContext<NewAccountInvalidity>) -> Self {
        let mut response = AccountValidationError::default();

        for invalidity in validation.into_iter() {
            match invalidity {
                NewAccountInvalidity::NameEmpty => response
                    .name
                    .push("Account names cannot be blank.".to_owned()),
                NewAccountInvalidity::NameTooLong(max) => response.name.push(format!(
                    "Account names may not contain more than {} characters.",
                    max
                )),
            }
        }

        response
    }
}

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    amount: f64,
    currency: Option<String>,
    transaction_type: String,
    asset_name: Option<String>,
    asset_ticker: Option<String>,
    esg_score: Option<f64>,
    co2_impact: Option<f64>,
    timestamp: Option<DateTime<Utc>>,
    notes: Option<String>,
}

impl From<NewTransactionRequest> for transactions::NewTransactionData {
    fn from(rep: NewTransactionRequest) -> Self {
        Self {
            amount: rep.amount,
            currency: rep.currency,
            transaction_type: rep.transaction_type,
            asset_name: rep.asset_name,
            asset_ticker: rep.asset_ticker,
            esg_score: rep.esg_score,
            co2_impact: rep.co2_impact,
            timestamp: rep.timestamp,
            notes: rep.notes,
        }
    }
}

#[derive(Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub transaction_type: String,
    pub asset_name: Option<String>,
    pub asset_ticker: Option<String>,
    pub esg_score: Option<f64>,
    pub co2_impact: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&transactions::Transaction> for Transaction {
    fn from(transaction: &transactions::Transaction) -> Self {
        Self {
            id: transaction.id,
            account_id: transaction.account_id,
            amount: transaction.amount,
            currency: transaction.currency.clone(),
            transaction_type: transaction.transaction_type.to_string(),
            asset_name: transaction.asset_name.clone(),
            asset_ticker: transaction.asset_ticker.clone(),
            esg_score: transaction.esg_score,
            co2_impact: transaction.co2_impact,
            timestamp: transaction.timestamp,
            notes: transaction.notes.clone(),
            created_at: transaction.created_at,
        }
    }
}

#[derive(Default, Serialize)]
pub struct TransactionValidationError {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    amount: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    currency: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    asset_name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    asset_ticker: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    esg_score: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    co2_impact: Vec<String>,
}

impl From<ValidationContext<NewTransactionInvalidity>> for TransactionValidationError {
    fn from(validation: ValidationContext<NewTransactionInvalidity>) -> Self {
        let mut response = TransactionValidationError::default();

        for invalidity in validation.into_iter() {
            match invalidity {
                NewTransactionInvalidity::AmountNotFinite => response
                    .amount
                    .push("Amounts must be finite numbers.".to_owned()),
                NewTransactionInvalidity::CurrencyFormat => response
                    .currency
                    .push("Currencies must be a three letter ISO 4217 code.".to_owned()),
                NewTransactionInvalidity::AssetNameTooLong(max) => {
                    response.asset_name.push(format!(
                        "Asset names may not contain more than {} characters.",
                        max
                    ))
                }
                NewTransactionInvalidity::TickerTooLong(max) => response.asset_ticker.push(
                    format!("Tickers may not contain more than {} characters.", max),
                ),
                NewTransactionInvalidity::EsgScoreOutOfRange => response
                    .esg_score
                    .push("ESG scores must be between 0 and 100.".to_owned()),
                NewTransactionInvalidity::Co2ImpactInvalid => response
                    .co2_impact
                    .push("CO2 impacts must be zero or more kilograms.".to_owned()),
            }
        }

        response
    }
}
