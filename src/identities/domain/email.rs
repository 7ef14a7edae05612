use rand::{distributions::Alphanumeric, thread_rng, Rng};
use semval::prelude::*;

/// An email address provided during registration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Email(String);

impl Email {
    /// Create an unvalidated email.
    ///
    /// This can be useful when constructing an object that contains an email
    /// but has not been validated yet.
    pub fn unvalidated(address: String) -> Self {
        Self(address)
    }

    pub fn address(&self) -> &str {
        &self.0
    }

    fn domain_is_present(&self) -> bool {
        match self.0.find('@') {
            Some(index) => index < self.0.len() - 1,
            None => false,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum EmailInvalidity {
    /// The address does not have a domain portion.
    MissingDomain,

    /// The address is missing the `@` symbol separating the local and domain
    /// parts.
    MissingSeparator,
}

impl Validate for Email {
    type Invalidity = EmailInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(!self.0.contains('@'), EmailInvalidity::MissingSeparator)
            .invalidate_if(!self.domain_is_present(), EmailInvalidity::MissingDomain)
            .into()
    }
}

impl ValidatedFrom<&str> for Email {
    fn validated_from(from: &str) -> ValidatedResult<Self> {
        let into = Self(from.to_owned());

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err((into, context)),
        }
    }
}

const VERIFICATION_TOKEN_LENGTH: usize = 64;

/// A random token a user must present to prove ownership of their email
/// address.
pub struct EmailVerification {
    token: String,
}

impl EmailVerification {
    pub fn new() -> Self {
        let token: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(VERIFICATION_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Default for EmailVerification {
    fn default() -> Self {
        Self::new()
    }
}
