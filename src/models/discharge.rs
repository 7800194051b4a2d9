use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::party::Party;

/// Payment details echoed by clients from an earlier response. Accepted on
/// input and never produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

/// Request to discharge a financing statement, and the recorded discharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DischargeStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10))]
    pub base_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub base_debtor: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub registering_party: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20))]
    pub client_reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub payment: Option<Payment>,
}
