//! Registration store abstraction.
//!
//! Handlers and services talk to a `RegistrationStore`; PostgreSQL backs it in
//! deployed environments and an in-memory map backs it in tests and local
//! runs without a database.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{DischargeStatement, FinancingStatement};

/// Format a sequence value as a registration number: six digits then `B`.
pub fn format_registration_number(sequence: i64) -> String {
    format!("{:06}B", sequence)
}

/// A stored document with the account that registered it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRegistration<T> {
    pub account_id: String,
    pub document: T,
}

/// Persistence operations for base registrations and their discharges.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Allocate the next registration number from the shared sequence
    async fn next_registration_number(&self) -> Result<String, ApiError>;

    /// Store a new financing statement under its `baseRegistrationNumber`
    async fn insert_financing_statement(
        &self,
        account_id: &str,
        statement: &FinancingStatement,
    ) -> Result<(), ApiError>;

    /// Find a financing statement; `statusType` reflects the current state
    async fn find_financing_statement(
        &self,
        registration_num: &str,
    ) -> Result<Option<StoredRegistration<FinancingStatement>>, ApiError>;

    /// Record a discharge and mark its base registration historical.
    ///
    /// Fails with a historical-registration error if the base registration
    /// is no longer active, so two concurrent discharges cannot both land.
    async fn record_discharge(
        &self,
        account_id: &str,
        discharge: &DischargeStatement,
    ) -> Result<(), ApiError>;

    /// Find a recorded discharge of `base_registration_num`
    async fn find_discharge(
        &self,
        base_registration_num: &str,
        discharge_registration_num: &str,
    ) -> Result<Option<StoredRegistration<DischargeStatement>>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_format() {
        assert_eq!(format_registration_number(23001), "023001B");
        assert_eq!(format_registration_number(100001), "100001B");
    }
}
