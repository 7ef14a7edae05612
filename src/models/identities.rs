use uuid::Uuid;

use crate::identities::domain::{email::EmailVerification, users::NewUser};

/// A user row ready to be inserted. Status flags, notification preferences,
/// and timestamps are filled in by column defaults.
#[derive(Clone, Debug)]
pub struct NewUserModel {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub country_code: Option<String>,
    pub preferred_currency: String,
    pub verification_token: String,
}

impl NewUserModel {
    pub fn from_domain(
        user: &NewUser,
        verification: &EmailVerification,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            id: user.id(),
            email: user.email().address().to_owned(),
            password_hash: user.password_hash()?.value().to_owned(),
            full_name: user.full_name().map(str::to_owned),
            country_code: user.country_code().map(str::to_owned),
            preferred_currency: user.preferred_currency().to_owned(),
            verification_token: verification.token().to_owned(),
        })
    }
}
