use semval::ValidatedFrom;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::repos::{DynAccountRepo, DynTransactionRepo, TransactionPersistenceError};

use super::domain::{
    accounts::{Account, NewAccount, NewAccountData, NewAccountInvalidity},
    transactions::{NewTransaction, NewTransactionData, NewTransactionInvalidity, Transaction},
};

/// A service object providing functionality relating to accounts and the
/// transactions recorded against them.
#[derive(Clone)]
pub struct PortfolioService {
    account_repo: DynAccountRepo,
    transaction_repo: DynTransactionRepo,
}

#[derive(Debug, Error)]
pub enum CreateAccountError {
    /// The provided account data is invalid.
    #[error("invalid account data: {0:?}")]
    InvalidAccount(semval::context::Context<NewAccountInvalidity>),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum RecordTransactionError {
    /// The provided transaction data is invalid.
    #[error("invalid transaction data: {0:?}")]
    InvalidTransaction(semval::context::Context<NewTransactionInvalidity>),

    /// The target account does not exist.
    #[error("no account exists with the ID {0}")]
    UnknownAccount(Uuid),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PortfolioService {
    pub fn new(account_repo: DynAccountRepo, transaction_repo: DynTransactionRepo) -> Self {
        Self {
            account_repo,
            transaction_repo,
        }
    }

    pub async fn create_account(
        &self,
        data: NewAccountData,
    ) -> Result<Account, CreateAccountError> {
        let new_account = NewAccount::validated_from(data)
            .map_err(|(_, context)| CreateAccountError::InvalidAccount(context))?;

        let saved = self.account_repo.persist_new_account(&new_account).await?;

        info!(account_id = %saved.id, user_id = %saved.user_id, "Created account.");

        Ok(saved)
    }

    pub async fn list_accounts(&self, user_id: Uuid) -> anyhow::Result<Vec<Account>> {
        self.account_repo.list_accounts_for_user(user_id).await
    }

    /// Record a transaction against an account.
    pub async fn record_transaction(
        &self,
        account_id: Uuid,
        data: NewTransactionData,
    ) -> Result<Transaction, RecordTransactionError> {
        let new_transaction = NewTransaction::from_data(account_id, data)
            .map_err(RecordTransactionError::InvalidTransaction)?;

        match self
            .transaction_repo
            .persist_transaction(&new_transaction)
            .await
        {
            Ok(saved) => Ok(saved),
            Err(TransactionPersistenceError::UnknownAccount(id)) => {
                Err(RecordTransactionError::UnknownAccount(id))
            }
            Err(TransactionPersistenceError::Other(error)) => {
                Err(RecordTransactionError::Other(error))
            }
        }
    }

    pub async fn list_transactions(&self, account_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        self.transaction_repo
            .list_transactions_for_account(account_id)
            .await
    }

    pub async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> anyhow::Result<Option<Transaction>> {
        self.transaction_repo.get_transaction(transaction_id).await
    }

    pub async fn delete_transaction(&self, transaction_id: Uuid) -> anyhow::Result<()> {
        self.transaction_repo
            .delete_transaction(transaction_id)
            .await
    }
}
