use chrono::{DateTime, Utc};
use semval::prelude::*;
use uuid::Uuid;

const MAX_ACCOUNT_NAME_LENGTH: usize = 100;

/// An investment account owned by a user. Every transaction belongs to
/// exactly one account.
#[derive(Clone, Debug)]
pub struct NewAccount {
    id: Uuid,
    user_id: Uuid,
    name: String,
}

impl NewAccount {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum NewAccountInvalidity {
    NameEmpty,
    /// The account name exceeds the maximum length contained as a value.
    NameTooLong(usize),
}

impl Validate for NewAccount {
    type Invalidity = NewAccountInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                self.name.trim().is_empty(),
                NewAccountInvalidity::NameEmpty,
            )
            .invalidate_if(
                self.name.chars().count() > MAX_ACCOUNT_NAME_LENGTH,
                NewAccountInvalidity::NameTooLong(MAX_ACCOUNT_NAME_LENGTH),
            )
            .into()
    }
}

#[derive(Clone, Debug)]
pub struct NewAccountData {
    pub user_id: Uuid,
    pub name: String,
}

impl ValidatedFrom<NewAccountData> for NewAccount {
    fn validated_from(from: NewAccountData) -> ValidatedResult<Self> {
        let into = NewAccount {
            id: Uuid::new_v4(),
            user_id: from.user_id,
            name: from.name,
        };

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err((into, context)),
        }
    }
}

/// An account that has been persisted.
#[derive(Clone, Debug)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_name_is_invalid() {
        let (_, context) = NewAccount::validated_from(NewAccountData {
            user_id: Uuid::new_v4(),
            name: "   ".to_owned(),
        })
        .expect_err("a blank account name should be rejected");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert_eq!(vec![NewAccountInvalidity::NameEmpty], invalidities);
    }

    #[test]
    fn overlong_name_is_invalid() {
        let (_, context) = NewAccount::validated_from(NewAccountData {
            user_id: Uuid::new_v4(),
            name: "a".repeat(101),
        })
        .expect_err("a 101 character account name should be rejected");

        let invalidities = context.into_iter().collect::<Vec<_>>();

        assert_eq!(vec![NewAccountInvalidity::NameTooLong(100)], invalidities);
    }

    #[test]
    fn reasonable_name_is_valid() {
        let account = NewAccount::validated_from(NewAccountData {
            user_id: Uuid::new_v4(),
            name: "Green Growth ISA".to_owned(),
        })
        .expect("account should be valid");

        assert_eq!("Green Growth ISA", account.name());
    }
}
