use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role tag carried by every user record.
/// Unknown or missing tags fall back to `Individual` so a dashboard can
/// always be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    Business,
    #[default]
    Individual,
    Charity,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [AccountType::Business, AccountType::Individual, AccountType::Charity];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Business => "Business",
            AccountType::Individual => "Individual",
            AccountType::Charity => "Charity",
        }
    }

    /// Lenient parse: case-insensitive, defaults to `Individual`.
    pub fn parse(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("business") {
            AccountType::Business
        } else if tag.eq_ignore_ascii_case("charity") {
            AccountType::Charity
        } else {
            AccountType::Individual
        }
    }
}

impl From<String> for AccountType {
    fn from(tag: String) -> Self { AccountType::parse(&tag) }
}

impl From<AccountType> for String {
    fn from(t: AccountType) -> Self { t.as_str().to_string() }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as returned by the backend. Cached by the session store;
/// never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "role")]
    pub account_type: AccountType,
    /// Role-dependent string fields (businessName, organizationName, fullName, ...).
    #[serde(default, rename = "profileFields")]
    pub profile: HashMap<String, String>,
}

impl User {
    /// Best display name for the account, falling back to the email address.
    pub fn display_name(&self) -> &str {
        let key = match self.account_type {
            AccountType::Business => "businessName",
            AccountType::Charity => "organizationName",
            AccountType::Individual => "fullName",
        };
        self.profile
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_tags_default_to_individual() {
        assert_eq!(AccountType::parse("Business"), AccountType::Business);
        assert_eq!(AccountType::parse("charity"), AccountType::Charity);
        assert_eq!(AccountType::parse("unknown"), AccountType::Individual);
        assert_eq!(AccountType::parse(""), AccountType::Individual);
    }

    #[test]
    fn user_decodes_from_wire_shape() {
        let json = r#"{
            "id": "u-42",
            "email": "contact@tastybites.com",
            "role": "Business",
            "profileFields": { "businessName": "Tasty Bites Restaurant" }
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.account_type, AccountType::Business);
        assert_eq!(user.display_name(), "Tasty Bites Restaurant");

        // Missing role and profile still decode; display name falls back to email.
        let user: User = serde_json::from_str(r#"{"id":"u-1","email":"a@b.com"}"#).unwrap();
        assert_eq!(user.account_type, AccountType::Individual);
        assert_eq!(user.display_name(), "a@b.com");
    }
}
