//! In-memory registration store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::repository::{RegistrationStore, StoredRegistration, format_registration_number};
use crate::error::{ApiError, ErrorCode};
use crate::models::{DischargeStatement, FinancingStatement, RegistrationState};

/// First value handed out by the in-memory registration sequence.
const SEQUENCE_START: i64 = 100_001;

#[derive(Debug)]
struct Inner {
    next_sequence: i64,
    statements: HashMap<String, StoredRegistration<FinancingStatement>>,
    discharges: HashMap<String, StoredRegistration<DischargeStatement>>,
}

/// Registration store held in process memory, guarded by a tokio `RwLock`.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_sequence: SEQUENCE_START,
                statements: HashMap::new(),
                discharges: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn next_registration_number(&self) -> Result<String, ApiError> {
        let mut inner = self.inner.write().await;
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        Ok(format_registration_number(sequence))
    }

    async fn insert_financing_statement(
        &self,
        account_id: &str,
        statement: &FinancingStatement,
    ) -> Result<(), ApiError> {
        let registration_num = statement
            .registration_number()
            .ok_or_else(|| {
                ApiError::Internal("Financing statement has no registration number".to_string())
            })?
            .to_string();

        let mut inner = self.inner.write().await;
        if inner.statements.contains_key(&registration_num) {
            return Err(ApiError::with_code(
                ErrorCode::DatabaseTransactionFailed,
                format!("Registration {} already exists", registration_num),
            ));
        }

        debug!(registration_num = %registration_num, "Storing financing statement in memory");
        inner.statements.insert(
            registration_num,
            StoredRegistration {
                account_id: account_id.to_string(),
                document: statement.clone(),
            },
        );
        Ok(())
    }

    async fn find_financing_statement(
        &self,
        registration_num: &str,
    ) -> Result<Option<StoredRegistration<FinancingStatement>>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.statements.get(registration_num).cloned())
    }

    async fn record_discharge(
        &self,
        account_id: &str,
        discharge: &DischargeStatement,
    ) -> Result<(), ApiError> {
        let base_num = discharge.base_registration_number.as_deref().unwrap_or_default();
        let discharge_num = discharge
            .discharge_registration_number
            .clone()
            .ok_or_else(|| ApiError::Internal("Discharge has no registration number".to_string()))?;

        let mut inner = self.inner.write().await;
        let stored = inner
            .statements
            .get_mut(base_num)
            .ok_or_else(|| ApiError::registration_not_found(base_num))?;

        if !stored.document.is_active() {
            return Err(ApiError::registration_historical(base_num));
        }
        stored.document.status_type = Some(RegistrationState::Historical);

        inner.discharges.insert(
            discharge_num,
            StoredRegistration {
                account_id: account_id.to_string(),
                document: discharge.clone(),
            },
        );
        Ok(())
    }

    async fn find_discharge(
        &self,
        base_registration_num: &str,
        discharge_registration_num: &str,
    ) -> Result<Option<StoredRegistration<DischargeStatement>>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner
            .discharges
            .get(discharge_registration_num)
            .filter(|stored| {
                stored.document.base_registration_number.as_deref() == Some(base_registration_num)
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Party;

    fn discharge_of(base: &str, number: &str) -> DischargeStatement {
        DischargeStatement {
            base_registration_number: Some(base.to_string()),
            base_debtor: Some(Party::business("TEST BUS 2 DEBTOR")),
            registering_party: None,
            client_reference_id: None,
            discharge_registration_number: Some(number.to_string()),
            create_date_time: Some(chrono::Utc::now()),
            payment: None,
        }
    }

    #[tokio::test]
    async fn test_sequence_is_monotonic() {
        let store = MemoryStore::new();
        assert_eq!(store.next_registration_number().await.unwrap(), "100001B");
        assert_eq!(store.next_registration_number().await.unwrap(), "100002B");
    }

    #[tokio::test]
    async fn test_discharge_unknown_registration() {
        let store = MemoryStore::new();
        let err = store
            .record_discharge("PS12345", &discharge_of("X12345X", "100001B"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_discharge_lookup_checks_base_number() {
        let store = MemoryStore::new();
        crate::database::fixtures::seed(&store).await.unwrap();

        store
            .record_discharge("PS12345", &discharge_of("TEST0001", "100001B"))
            .await
            .unwrap();

        let found = store.find_discharge("TEST0001", "100001B").await.unwrap();
        assert_eq!(found.map(|stored| stored.account_id), Some("PS12345".to_string()));
        assert!(store.find_discharge("TEST0002", "100001B").await.unwrap().is_none());

        let err = store
            .record_discharge("PS12345", &discharge_of("TEST0001", "100002B"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::RegistrationHistorical);
    }
}
