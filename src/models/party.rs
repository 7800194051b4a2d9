use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registering party, secured party or debtor.
///
/// Debtors and secured parties carry exactly one of `businessName` or
/// `personName`; a registering party may instead be identified by `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150))]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub person_name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 8))]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[validate(length(min = 1, max = 50))]
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50))]
    pub middle: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(max = 50))]
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50))]
    pub street_additional: Option<String>,
    #[validate(length(min = 1, max = 40))]
    pub city: String,
    #[validate(length(max = 2))]
    pub region: String,
    #[validate(length(max = 15))]
    pub postal_code: String,
    #[validate(length(equal = 2))]
    pub country: String,
}

impl Party {
    pub fn business(name: &str) -> Self {
        Self {
            business_name: Some(name.to_string()),
            person_name: None,
            address: None,
            email_address: None,
            birth_date: None,
            party_id: None,
            code: None,
        }
    }

    pub fn person(first: &str, last: &str) -> Self {
        Self {
            business_name: None,
            person_name: Some(PersonName {
                first: first.to_string(),
                middle: None,
                last: last.to_string(),
            }),
            ..Self::business("")
        }
    }

    /// True when exactly one of business name and person name is set.
    pub fn has_single_name(&self) -> bool {
        self.business_name.is_some() != self.person_name.is_some()
    }

    /// Registry-style comparison of the party names: business names match
    /// ignoring case and runs of whitespace; person names match on first and
    /// last name the same way.
    pub fn name_matches(&self, other: &Party) -> bool {
        match (&self.business_name, &other.business_name) {
            (Some(a), Some(b)) => return normalize_name(a) == normalize_name(b),
            (Some(_), None) | (None, Some(_)) => return false,
            (None, None) => {}
        }

        match (&self.person_name, &other.person_name) {
            (Some(a), Some(b)) => {
                normalize_name(&a.first) == normalize_name(&b.first)
                    && normalize_name(&a.last) == normalize_name(&b.last)
            }
            _ => false,
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
