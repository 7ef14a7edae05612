use anyhow::Result;
use semval::prelude::*;
use uuid::Uuid;

use crate::passwords::{self, Password, PasswordInvalidity};

use super::email::{Email, EmailInvalidity};

const MAX_FULL_NAME_LENGTH: usize = 100;

/// The currency a user's reporting defaults to when they don't pick one
/// themselves, keyed by their ISO 3166 country code.
pub fn default_currency_for_country(country_code: &str) -> &'static str {
    match country_code {
        "CH" => "CHF",
        "DK" => "DKK",
        "GB" => "GBP",
        "NO" => "NOK",
        "SE" => "SEK",
        "US" => "USD",
        _ => "EUR",
    }
}

fn is_alpha_code(value: &str, expected_len: usize) -> bool {
    value.len() == expected_len && value.bytes().all(|c| c.is_ascii_uppercase())
}

/// A user in the process of registering.
#[derive(Debug)]
pub struct NewUser {
    id: Uuid,
    email: Email,
    password: Password,
    full_name: Option<String>,
    country_code: Option<String>,
    preferred_currency: String,
}

impl NewUser {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> Result<passwords::Hash> {
        passwords::Hash::new(&self.password)
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn preferred_currency(&self) -> &str {
        &self.preferred_currency
    }
}

#[derive(Debug)]
pub enum NewUserInvalidity {
    Email(EmailInvalidity),
    Password(PasswordInvalidity),
    /// The full name exceeds the maximum length contained as a value.
    FullNameTooLong(usize),
    /// The country code is not a two letter uppercase ISO 3166 code.
    CountryCodeFormat,
    /// The preferred currency is not a three letter uppercase ISO 4217 code.
    CurrencyFormat,
}

impl Validate for NewUser {
    type Invalidity = NewUserInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .validate_with(&self.email, NewUserInvalidity::Email)
            .validate_with(&self.password, NewUserInvalidity::Password)
            .invalidate_if(
                self.full_name
                    .as_deref()
                    .map(|name| name.chars().count() > MAX_FULL_NAME_LENGTH)
                    .unwrap_or(false),
                NewUserInvalidity::FullNameTooLong(MAX_FULL_NAME_LENGTH),
            )
            .invalidate_if(
                self.country_code
                    .as_deref()
                    .map(|code| !is_alpha_code(code, 2))
                    .unwrap_or(false),
                NewUserInvalidity::CountryCodeFormat,
            )
            .invalidate_if(
                !is_alpha_code(&self.preferred_currency, 3),
                NewUserInvalidity::CurrencyFormat,
            )
            .into()
    }
}

#[derive(Clone, Debug)]
pub struct NewUserData {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub country_code: Option<String>,
    pub preferred_currency: Option<String>,
}

impl ValidatedFrom<NewUserData> for NewUser {
    fn validated_from(from: NewUserData) -> ValidatedResult<Self> {
        // The preferred currency falls back to a country based default only
        // when the user didn't pick one.
        let preferred_currency = from.preferred_currency.unwrap_or_else(|| {
            from.country_code
                .as_deref()
                .map(default_currency_for_country)
                .unwrap_or("EUR")
                .to_owned()
        });

        let into = NewUser {
            id: Uuid::new_v4(),
            email: Email::unvalidated(from.email),
            password: Password::unvalidated(from.password),
            full_name: from.full_name,
            country_code: from.country_code,
            preferred_currency,
        };

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err((into, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> NewUserData {
        NewUserData {
            email: "test@example.com".to_owned(),
            password: "CorrectHorseBatteryStaple".to_owned(),
            full_name: None,
            country_code: None,
            preferred_currency: None,
        }
    }

    #[test]
    fn validated_from_valid() -> Result<()> {
        let data = data();

        let new_user = NewUser::validated_from(data.clone()).expect("user should be valid");

        assert_eq!(data.email, new_user.email().address());
        assert!(new_user
            .password_hash()?
            .matches_raw_password(&data.password)?);

        Ok(())
    }

    #[test]
    fn currency_defaults_from_country_code() {
        let new_user = NewUser::validated_from(NewUserData {
            country_code: Some("NO".to_owned()),
            ..data()
        })
        .expect("user should be valid");

        assert_eq!("NOK", new_user.preferred_currency());
    }

    #[test]
    fn currency_defaults_to_eur_for_unmapped_country() {
        let new_user = NewUser::validated_from(NewUserData {
            country_code: Some("FR".to_owned()),
            ..data()
        })
        .expect("user should be valid");

        assert_eq!("EUR", new_user.preferred_currency());
    }

    #[test]
    fn explicit_currency_wins_over_country_default() {
        let new_user = NewUser::validated_from(NewUserData {
            country_code: Some("NO".to_owned()),
            preferred_currency: Some("USD".to_owned()),
            ..data()
        })
        .expect("user should be valid");

        assert_eq!("USD", new_user.preferred_currency());
    }

    #[test]
    fn currency_defaults_to_eur_without_country() {
        let new_user = NewUser::validated_from(data()).expect("user should be valid");

        assert_eq!("EUR", new_user.preferred_currency());
    }

    #[test]
    fn short_password_is_invalid() {
        let (_, context) = NewUser::validated_from(NewUserData {
            password: "short".to_owned(),
            ..data()
        })
        .expect_err("a five character password should be rejected");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert!(matches!(
            invalidities[..],
            [NewUserInvalidity::Password(PasswordInvalidity::MinLength(8))]
        ));
    }

    #[test]
    fn malformed_country_code_is_invalid() {
        let (_, context) = NewUser::validated_from(NewUserData {
            country_code: Some("Norway".to_owned()),
            ..data()
        })
        .expect_err("a full country name should be rejected");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert!(matches!(
            invalidities[..],
            [NewUserInvalidity::CountryCodeFormat]
        ));
    }
}
