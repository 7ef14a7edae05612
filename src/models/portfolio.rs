use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::portfolio::domain;

/// An account row.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for domain::accounts::Account {
    fn from(model: Account) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

/// A transaction row.
#[derive(Clone, Debug, sqlx::FromRow)]
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

impl From<Transaction> for domain::transactions::Transaction {
    fn from(model: Transaction) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            amount: model.amount,
            currency: model.currency,
            transaction_type: domain::transactions::TransactionType::from(
                model.transaction_type.as_str(),
            ),
            asset_name: model.asset_name,
            asset_ticker: model.asset_ticker,
            esg_score: model.esg_score,
            co2_impact: model.co2_impact,
            timestamp: model.timestamp,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}
