use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;
use uuid::Uuid;

use crate::{
    database::PostgresConnection,
    models,
    portfolio::domain::accounts::{Account, NewAccount},
};

pub type DynAccountRepo = Arc<dyn AccountRepo + Send + Sync>;

#[async_trait]
pub trait AccountRepo {
    /// Persist a new account and return the stored record.
    async fn persist_new_account(&self, account: &NewAccount) -> anyhow::Result<Account>;

    /// Fetch a single account by its ID.
    async fn get_account(&self, account_id: Uuid) -> anyhow::Result<Option<Account>>;

    /// List all accounts owned by a user, oldest first.
    async fn list_accounts_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Account>>;
}

#[async_trait]
impl AccountRepo for PostgresConnection {
    async fn persist_new_account(&self, account: &NewAccount) -> anyhow::Result<Account> {
        let saved = sqlx::query_as::<_, models::portfolio::Account>(
            r#"
            INSERT INTO accounts (id, user_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(account.id())
        .bind(account.user_id())
        .bind(account.name())
        .fetch_one(&**self)
        .await?;

        Ok(saved.into())
    }

    async fn get_account(&self, account_id: Uuid) -> anyhow::Result<Option<Account>> {
        trace!(%account_id, "Querying for account by ID.");

        let account = sqlx::query_as::<_, models::portfolio::Account>(
            r#"
            SELECT id, user_id, name, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&**self)
        .await?;

        Ok(account.map(Into::into))
    }

    async fn list_accounts_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, models::portfolio::Account>(
            r#"
            SELECT id, user_id, name, created_at
            FROM accounts
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&**self)
        .await?;

        Ok(accounts.into_iter().map(Into::into).collect())
    }
}
