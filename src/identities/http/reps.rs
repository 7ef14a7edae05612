use semval::context::Context as ValidationContext;
use serde::{Deserialize, Serialize};

use crate::{
    identities::domain::{
        self,
        email::EmailInvalidity,
        users::NewUserInvalidity,
    },
    passwords::PasswordInvalidity,
};

#[derive(Deserialize)]
pub struct NewUserRequest {
    email: String,
    password: String,
    full_name: Option<String>,
    country_code: Option<String>,
    preferred_currency: Option<String>,
}

impl From<NewUserRequest> for domain::users::NewUserData {
    fn from(rep: NewUserRequest) -> Self {
        Self {
            email: rep.email,
            password: rep.password,
            full_name: rep.full_name,
            country_code: rep.country_code,
            preferred_currency: rep.preferred_currency,
        }
    }
}

#[derive(Serialize)]
pub struct NewUserResponse {
    pub email: String,
}

#[derive(Default, Serialize)]
pub struct NewUserValidationError {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    email: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    password: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    full_name: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    country_code: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    preferred_currency: Vec<String>,
}

impl From<ValidationContext<NewUserInvalidity>> for NewUserValidationError {
    fn from(validation: ValidationContext<NewUserInvalidity>) -> Self {
        let mut response = NewUserValidationError::default();

        for invalidity in validation.into_iter() {
            match invalidity {
                NewUserInvalidity::Email(email_invalidity) => match email_invalidity {
                    EmailInvalidity::MissingDomain => {
                        response.email.push("Email is missing a domain.".to_owned())
                    }
                    EmailInvalidity::MissingSeparator => response
                        .email
                        .push("Email is missing an '@' symbol.".to_owned()),
                },
                NewUserInvalidity::Password(password_invalidity) => match password_invalidity {
                    PasswordInvalidity::MaxLength(max) => response.password.push(format!(
                        "Passwords may not contain more than {} characters.",
                        max
                    )),
                    PasswordInvalidity::MinLength(min) => response.password.push(format!(
                        "Passwords must contain at least {} characters.",
                        min
                    )),
                },
                NewUserInvalidity::FullNameTooLong(max) => response.full_name.push(format!(
                    "Full names may not contain more than {} characters.",
                    max
                )),
                NewUserInvalidity::CountryCodeFormat => response
                    .country_code
                    .push("Country codes must be a two letter ISO 3166 code.".to_owned()),
                NewUserInvalidity::CurrencyFormat => response
                    .preferred_currency
                    .push("Currencies must be a three letter ISO 4217 code.".to_owned()),
            }
        }

        response
    }
}

#[cfg(test)]
mod test {
    use semval::ValidatedFrom;

    use super::*;
    use crate::identities::domain::users::{NewUser, NewUserData};

    #[test]
    fn short_password_produces_field_level_message() {
        let (_, context) = NewUser::validated_from(NewUserData {
            email: "test@example.com".to_owned(),
            password: "short".to_owned(),
            full_name: None,
            country_code: None,
            preferred_currency: None,
        })
        .expect_err("a short password should fail validation");

        let rep = NewUserValidationError::from(context);
        let serialized = serde_json::to_value(&rep).expect("serialization should not fail");

        let password_errors = serialized["password"]
            .as_array()
            .expect("password errors should be present");

        assert_eq!(1, password_errors.len());
        assert_eq!(
            "Passwords must contain at least 8 characters.",
            password_errors[0]
        );
        assert!(serialized.get("email").is_none());
    }

    #[test]
    fn multiple_invalid_fields_are_reported_together() {
        let (_, context) = NewUser::validated_from(NewUserData {
            email: "not-an-email".to_owned(),
            password: "short".to_owned(),
            full_name: None,
            country_code: None,
            preferred_currency: None,
        })
        .expect_err("both fields should fail validation");

        let rep = NewUserValidationError::from(context);

        assert!(!rep.email.is_empty());
        assert!(!rep.password.is_empty());
    }
}
