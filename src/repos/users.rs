use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{database::PostgresConnection, models::identities::NewUserModel};

#[derive(Debug, Error)]
pub enum UserPersistenceError {
    #[error("duplicate email address: {0:?}")]
    DuplicateEmail(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DynUserRepo = Arc<dyn UserRepo + Send + Sync>;

#[async_trait]
pub trait UserRepo {
    /// Persist a newly registered user.
    async fn persist_new_user(&self, user: &NewUserModel) -> Result<(), UserPersistenceError>;
}

// Postgres unique violation.
const UNIQUE_VIOLATION: &str = "23505";

#[async_trait]
impl UserRepo for PostgresConnection {
    async fn persist_new_user(&self, user: &NewUserModel) -> Result<(), UserPersistenceError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, full_name, country_code,
                preferred_currency, verification_token
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.country_code)
        .bind(&user.preferred_currency)
        .bind(&user.verification_token)
        .execute(&**self)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(error)) if error.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(UserPersistenceError::DuplicateEmail(user.email.clone()))
            }
            Err(error) => Err(UserPersistenceError::Other(error.into())),
        }
    }
}
