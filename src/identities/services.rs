use std::sync::Arc;

use anyhow::Context;
use semval::ValidatedFrom;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    models::identities::NewUserModel,
    rate_limit::{RateLimitError, RateLimiter},
    repos::{DynUserRepo, UserPersistenceError},
};

use super::domain::{
    email::EmailVerification,
    users::{NewUser, NewUserData, NewUserInvalidity},
};

pub type DynRateLimiter = Arc<dyn RateLimiter>;

const MAX_REGISTRATIONS_PER_MINUTE: u64 = 10;

/// A service object providing functionality relating to users.
#[derive(Clone)]
pub struct IdentityService {
    rate_limiter: DynRateLimiter,
    user_repo: DynUserRepo,
}

#[derive(Debug, Error)]
pub enum RegisterUserError {
    /// The provided user data is invalid.
    #[error("invalid user data: {0:?}")]
    InvalidUser(semval::context::Context<NewUserInvalidity>),

    /// An account with the provided email already exists.
    #[error("an account already exists for the email {0:?}")]
    DuplicateEmail(String),

    /// The operation is rate limited for the provided client.
    #[error("operation is rate limited")]
    RateLimited(RateLimitError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IdentityService {
    pub fn new(rate_limiter: DynRateLimiter, user_repo: DynUserRepo) -> Self {
        Self {
            rate_limiter,
            user_repo,
        }
    }

    /// Register a new user.
    ///
    /// The raw password is hashed before anything is persisted, the preferred
    /// currency is defaulted from the country code when absent, and an email
    /// verification token is stored alongside the user.
    ///
    /// # Arguments
    ///
    /// * `client_identifier` - A unique identifier for the client performing
    ///   the operation. This is used for rate limiting.
    /// * `new_user_data` - The new user's information.
    pub async fn register_user(
        &self,
        client_identifier: &str,
        new_user_data: NewUserData,
    ) -> Result<NewUser, RegisterUserError> {
        let rate_limit_key = format!("/auth/register_post_{}", client_identifier);
        self.rate_limiter
            .record_operation(&rate_limit_key, MAX_REGISTRATIONS_PER_MINUTE)
            .map_err(|error| match error {
                RateLimitError::LimitedUntil(_) => RegisterUserError::RateLimited(error),
                RateLimitError::Other(inner) => RegisterUserError::Other(inner),
            })?;

        let new_user = NewUser::validated_from(new_user_data)
            .map_err(|(_, context)| RegisterUserError::InvalidUser(context))?;

        let verification = EmailVerification::new();
        let user_model = NewUserModel::from_domain(&new_user, &verification)
            .context("Failed to convert from domain to model.")?;

        match self.user_repo.persist_new_user(&user_model).await {
            Ok(()) => {
                info!(user_id = %new_user.id(), "Registered new user.");

                Ok(new_user)
            }
            Err(UserPersistenceError::DuplicateEmail(email)) => {
                Err(RegisterUserError::DuplicateEmail(email))
            }
            Err(error) => {
                error!(?error, "Failed to persist new user.");

                Err(anyhow::Error::from(error).into())
            }
        }
    }
}
