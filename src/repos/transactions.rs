use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

use crate::{
    database::PostgresConnection,
    models,
    portfolio::domain::transactions::{NewTransaction, Transaction},
};

#[derive(Debug, Error)]
pub enum TransactionPersistenceError {
    /// The transaction references an account that does not exist.
    #[error("no account exists with the ID {0}")]
    UnknownAccount(Uuid),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DynTransactionRepo = Arc<dyn TransactionRepo + Send + Sync>;

#[async_trait]
pub trait TransactionRepo {
    /// Persist a new transaction and return the stored record.
    async fn persist_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, TransactionPersistenceError>;

    /// Fetch a single transaction by its ID.
    async fn get_transaction(&self, transaction_id: Uuid) -> anyhow::Result<Option<Transaction>>;

    /// List every transaction recorded against an account, newest first.
    async fn list_transactions_for_account(
        &self,
        account_id: Uuid,
    ) -> anyhow::Result<Vec<Transaction>>;

    /// List an account's transactions with a timestamp at or after `cutoff`,
    /// newest first.
    async fn list_transactions_since(
        &self,
        account_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Transaction>>;

    /// Delete a transaction. Deleting a transaction that does not exist is
    /// not an error.
    async fn delete_transaction(&self, transaction_id: Uuid) -> anyhow::Result<()>;
}

// Postgres foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const TRANSACTION_COLUMNS: &str = r#"
    id, account_id, amount, currency, transaction_type, asset_name,
    asset_ticker, esg_score, co2_impact, "timestamp", notes, created_at
"#;

#[async_trait]
impl TransactionRepo for PostgresConnection {
    async fn persist_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, TransactionPersistenceError> {
        let query = format!(
            r#"
            INSERT INTO transactions (
                id, account_id, amount, currency, transaction_type, asset_name,
                asset_ticker, esg_score, co2_impact, "timestamp", notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        );

        let result = sqlx::query_as::<_, models::portfolio::Transaction>(&query)
            .bind(transaction.id())
            .bind(transaction.account_id())
            .bind(transaction.amount())
            .bind(transaction.currency())
            .bind(transaction.transaction_type().to_string())
            .bind(transaction.asset_name())
            .bind(transaction.asset_ticker())
            .bind(transaction.esg_score())
            .bind(transaction.co2_impact())
            .bind(transaction.timestamp())
            .bind(transaction.notes())
            .fetch_one(&**self)
            .await;

        match result {
            Ok(saved) => Ok(saved.into()),
            Err(sqlx::Error::Database(error))
                if error.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                Err(TransactionPersistenceError::UnknownAccount(
                    transaction.account_id(),
                ))
            }
            Err(error) => Err(TransactionPersistenceError::Other(error.into())),
        }
    }

    async fn get_transaction(&self, transaction_id: Uuid) -> anyhow::Result<Option<Transaction>> {
        trace!(%transaction_id, "Querying for transaction by ID.");

        let query = format!(
            "SELECT {} FROM transactions WHERE id = $1",
            TRANSACTION_COLUMNS
        );

        let transaction = sqlx::query_as::<_, models::portfolio::Transaction>(&query)
            .bind(transaction_id)
            .fetch_optional(&**self)
            .await?;

        Ok(transaction.map(Into::into))
    }

    async fn list_transactions_for_account(
        &self,
        account_id: Uuid,
    ) -> anyhow::Result<Vec<Transaction>> {
        let query = format!(
            r#"
            SELECT {}
            FROM transactions
            WHERE account_id = $1
            ORDER BY "timestamp" DESC
            "#,
            TRANSACTION_COLUMNS
        );

        let transactions = sqlx::query_as::<_, models::portfolio::Transaction>(&query)
            .bind(account_id)
            .fetch_all(&**self)
            .await?;

        Ok(transactions.into_iter().map(Into::into).collect())
    }

    async fn list_transactions_since(
        &self,
        account_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Transaction>> {
        let query = format!(
            r#"
            SELECT {}
            FROM transactions
            WHERE account_id = $1 AND "timestamp" >= $2
            ORDER BY "timestamp" DESC
            "#,
            TRANSACTION_COLUMNS
        );

        let transactions = sqlx::query_as::<_, models::portfolio::Transaction>(&query)
            .bind(account_id)
            .bind(cutoff)
            .fetch_all(&**self)
            .await?;

        Ok(transactions.into_iter().map(Into::into).collect())
    }

    async fn delete_transaction(&self, transaction_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(transaction_id)
            .execute(&**self)
            .await?;

        Ok(())
    }
}
