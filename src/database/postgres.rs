//! PostgreSQL registration store.
//!
//! Documents are kept as JSONB next to the columns the registry filters on.
//! The `state_type` column is authoritative for a statement's state.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tracing::{debug, warn};

use super::DatabasePool;
use super::repository::{RegistrationStore, StoredRegistration, format_registration_number};
use crate::error::ApiError;
use crate::models::{DischargeStatement, FinancingStatement, RegistrationState};

#[derive(Clone)]
pub struct PgStore {
    pool: DatabasePool,
}

impl PgStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StatementRow {
    account_id: String,
    state_type: String,
    document: Json<FinancingStatement>,
}

#[derive(sqlx::FromRow)]
struct DischargeRow {
    account_id: String,
    document: Json<DischargeStatement>,
}

#[async_trait]
impl RegistrationStore for PgStore {
    async fn next_registration_number(&self) -> Result<String, ApiError> {
        let sequence: i64 = sqlx::query_scalar("SELECT nextval('registration_num_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(format_registration_number(sequence))
    }

    async fn insert_financing_statement(
        &self,
        account_id: &str,
        statement: &FinancingStatement,
    ) -> Result<(), ApiError> {
        let registration_num = statement.registration_number().ok_or_else(|| {
            ApiError::Internal("Financing statement has no registration number".to_string())
        })?;
        let state = statement.status_type.unwrap_or(RegistrationState::Active);

        sqlx::query(
            "INSERT INTO financing_statements
                 (registration_number, registration_type, state_type, account_id, document, create_ts)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(registration_num)
        .bind(statement.registration_type.code())
        .bind(state.as_str())
        .bind(account_id)
        .bind(Json(statement))
        .bind(statement.create_date_time.unwrap_or_else(Utc::now))
        .execute(&self.pool)
        .await?;

        debug!(registration_num = %registration_num, "Financing statement inserted");
        Ok(())
    }

    async fn find_financing_statement(
        &self,
        registration_num: &str,
    ) -> Result<Option<StoredRegistration<FinancingStatement>>, ApiError> {
        let row = sqlx::query_as::<_, StatementRow>(
            "SELECT account_id, state_type, document
             FROM financing_statements
             WHERE registration_number = $1",
        )
        .bind(registration_num)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let mut statement = row.document.0;
            match row.state_type.parse::<RegistrationState>() {
                Ok(state) => statement.status_type = Some(state),
                Err(e) => warn!(registration_num = %registration_num, "{}", e),
            }
            StoredRegistration {
                account_id: row.account_id,
                document: statement,
            }
        }))
    }

    async fn record_discharge(
        &self,
        account_id: &str,
        discharge: &DischargeStatement,
    ) -> Result<(), ApiError> {
        let base_num = discharge.base_registration_number.as_deref().unwrap_or_default();
        let discharge_num = discharge.discharge_registration_number.as_deref().ok_or_else(|| {
            ApiError::Internal("Discharge has no registration number".to_string())
        })?;
        let created = discharge.create_date_time.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE financing_statements
             SET state_type = $2, discharged_ts = $3
             WHERE registration_number = $1 AND state_type = $4",
        )
        .bind(base_num)
        .bind(RegistrationState::Historical.as_str())
        .bind(created)
        .bind(RegistrationState::Active.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            let exists: Option<String> = sqlx::query_scalar(
                "SELECT state_type FROM financing_statements WHERE registration_number = $1",
            )
            .bind(base_num)
            .fetch_optional(&mut *tx)
            .await?;
            tx.rollback().await?;

            return Err(match exists {
                Some(_) => ApiError::registration_historical(base_num),
                None => ApiError::registration_not_found(base_num),
            });
        }

        sqlx::query(
            "INSERT INTO discharges
                 (registration_number, base_registration_number, account_id, document, create_ts)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(discharge_num)
        .bind(base_num)
        .bind(account_id)
        .bind(Json(discharge))
        .bind(created)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(
            base_registration_num = %base_num,
            discharge_registration_num = %discharge_num,
            "Discharge recorded"
        );
        Ok(())
    }

    async fn find_discharge(
        &self,
        base_registration_num: &str,
        discharge_registration_num: &str,
    ) -> Result<Option<StoredRegistration<DischargeStatement>>, ApiError> {
        let row = sqlx::query_as::<_, DischargeRow>(
            "SELECT account_id, document
             FROM discharges
             WHERE registration_number = $1 AND base_registration_number = $2",
        )
        .bind(discharge_registration_num)
        .bind(base_registration_num)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| StoredRegistration {
            account_id: row.account_id,
            document: row.document.0,
        }))
    }
}
