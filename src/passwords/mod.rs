//! Dealing with user passwords: validation of raw passwords and argon2
//! hashing.

use std::fmt::Debug;

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::SaltString;
use rand_core::OsRng;
use semval::prelude::*;

const MAX_PASSWORD_LENGTH: usize = 512;
const MIN_PASSWORD_LENGTH: usize = 8;

/// A user's raw password.
pub struct Password(String);

impl Password {
    /// Construct an unvalidated password.
    ///
    /// This can be useful when constructing an object that contains a password
    /// so that the object can be validated as a whole.
    pub fn unvalidated(password: String) -> Self {
        Self(password)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PasswordInvalidity {
    /// The provided value exceeds the maximum allowable length for a password.
    /// The max length is contained as a value.
    MaxLength(usize),
    /// The provided value is smaller than the minimum allowable length for a
    /// password. The min length is contained as a value.
    MinLength(usize),
}

impl Validate for Password {
    type Invalidity = PasswordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                self.0.len() < MIN_PASSWORD_LENGTH,
                PasswordInvalidity::MinLength(MIN_PASSWORD_LENGTH),
            )
            .invalidate_if(
                self.0.len() > MAX_PASSWORD_LENGTH,
                PasswordInvalidity::MaxLength(MAX_PASSWORD_LENGTH),
            )
            .into()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't include the raw password in debug output.
        f.debug_tuple("Password").field(&"*".repeat(8)).finish()
    }
}

/// The hash of a user's password, stored in PHC string format.
#[derive(Clone, Debug)]
pub struct Hash(String);

impl Hash {
    /// Hash a user's password with a freshly generated salt.
    pub fn new(password: &Password) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), salt.as_ref())?
            .to_string();

        Ok(Self(password_hash))
    }

    /// Determine if the hash matches a raw password.
    pub fn matches_raw_password(&self, raw_password: &str) -> Result<bool> {
        // This parse should not fail because a `Hash` is only creatable from
        // valid data.
        let parsed_hash = PasswordHash::new(&self.0)?;

        match Argon2::default().verify_password(raw_password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    /// Retrieve the hash's string representation.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValidatedFrom<&str> for Password {
    fn validated_from(from: &str) -> ValidatedResult<Self> {
        let into = Password(from.to_owned());

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err((into, context)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_minimum_length() {
        let (_, context) = Password::validated_from("a".repeat(7).as_ref())
            .expect_err("seven characters should be too short");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert_eq!(vec![PasswordInvalidity::MinLength(8)], invalidities);
    }

    #[test]
    fn validate_maximum_length() {
        let (_, context) = Password::validated_from("a".repeat(513).as_ref())
            .expect_err("513 characters should be too long");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert_eq!(vec![PasswordInvalidity::MaxLength(512)], invalidities);
    }

    #[test]
    fn validate_minimum_length_boundary() {
        Password::validated_from("a".repeat(8).as_ref())
            .expect("an eight character password should be accepted");
    }

    #[test]
    fn debug_does_not_contain_value() {
        let raw_password = "some-very-unique-string";
        let password = Password::unvalidated(raw_password.to_owned());

        let debug_output = format!("{:?}", password);

        assert!(
            !debug_output.contains(raw_password),
            "The raw password {:?} should not be contained in the debug output {:?}.",
            raw_password,
            debug_output
        );
    }

    #[test]
    fn new_hash_matches_password() {
        let raw_password = "hunter2!";
        let hash =
            Hash::new(&Password::unvalidated(raw_password.to_owned())).expect("hashing failed");

        let password_matches = hash
            .matches_raw_password(raw_password)
            .expect("comparison should not error");

        assert!(password_matches, "Password does not match its own hash.");
    }

    #[test]
    fn new_hash_does_not_match_other_passwords() {
        let hash = Hash::new(&Password::unvalidated("hunter2!".to_owned())).expect("hashing failed");

        let password_matches = hash
            .matches_raw_password("not-the-password")
            .expect("comparison should not error");

        assert!(
            !password_matches,
            "Password matched hash of different password."
        );
    }
}
