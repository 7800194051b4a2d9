// Registration service
// Business rules for creating, reading and discharging financing statements

use std::sync::Arc;

use chrono::{DateTime, Duration, Months, Utc};
use tracing::{info, warn};

use crate::database::{RegistrationStore, StoredRegistration};
use crate::error::{ApiError, ErrorCode, Result};
use crate::models::{DischargeStatement, FinancingStatement, RegistrationState, RegistrationType};
use crate::services::validation::{validate_discharge, validate_financing_statement};

/// Days a repairers lien stays registered.
const REPAIRERS_LIEN_DAYS: i64 = 180;

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Validate and register a new financing statement for `account_id`.
    pub async fn create_financing_statement(
        &self,
        account_id: &str,
        mut statement: FinancingStatement,
    ) -> Result<FinancingStatement> {
        validate_financing_statement(&statement)?;

        let registration_num = self.store.next_registration_number().await?;
        let created = Utc::now();

        statement.base_registration_number = Some(registration_num.clone());
        statement.create_date_time = Some(created);
        statement.expiry_date = expiry_date(&statement, created);
        statement.registration_description =
            Some(statement.registration_type.description().to_string());
        statement.status_type = Some(RegistrationState::Active);

        self.store
            .insert_financing_statement(account_id, &statement)
            .await?;

        info!(
            registration_num = %registration_num,
            registration_type = statement.registration_type.code(),
            account_id = %account_id,
            "Financing statement registered"
        );
        Ok(statement)
    }

    /// Fetch a base registration. Historical registrations are visible to
    /// staff only.
    pub async fn get_financing_statement(
        &self,
        registration_num: &str,
        staff: bool,
    ) -> Result<StoredRegistration<FinancingStatement>> {
        let stored = self.find(registration_num).await?;
        if !staff && !stored.document.is_active() {
            return Err(ApiError::registration_historical(registration_num));
        }
        Ok(stored)
    }

    /// Discharge the active financing statement `registration_num`.
    ///
    /// The request must name the same base registration as the path and a
    /// debtor whose name matches one on the base registration. Non-staff
    /// callers may only discharge registrations made by their own account.
    pub async fn discharge(
        &self,
        registration_num: &str,
        account_id: &str,
        staff: bool,
        mut request: DischargeStatement,
    ) -> Result<DischargeStatement> {
        validate_discharge(&request)?;

        if request.base_registration_number.as_deref() != Some(registration_num) {
            return Err(ApiError::with_details(
                ErrorCode::PathDataMismatch,
                "The path registration number does not match the payload baseRegistrationNumber",
                format!(
                    "path {} payload {}",
                    registration_num,
                    request.base_registration_number.as_deref().unwrap_or_default()
                ),
            ));
        }

        let stored = self.find(registration_num).await?;
        if !staff && stored.account_id != account_id {
            warn!(
                registration_num = %registration_num,
                account_id = %account_id,
                "Discharge of a registration owned by another account"
            );
            return Err(ApiError::role_not_authorized(Some(account_id)));
        }

        let base = stored.document;
        if !base.is_active() {
            return Err(ApiError::registration_historical(registration_num));
        }

        let debtor_matches = request
            .base_debtor
            .as_ref()
            .and_then(|debtor| base.matching_debtor(debtor))
            .is_some();
        if !debtor_matches {
            warn!(registration_num = %registration_num, "Discharge base debtor does not match");
            return Err(ApiError::with_code(
                ErrorCode::DebtorNameMismatch,
                format!(
                    "The base debtor name does not match a debtor on registration {}",
                    registration_num
                ),
            ));
        }

        let discharge_num = self.store.next_registration_number().await?;
        request.discharge_registration_number = Some(discharge_num.clone());
        request.create_date_time = Some(Utc::now());
        request.payment = None;

        self.store.record_discharge(account_id, &request).await?;

        info!(
            registration_num = %registration_num,
            discharge_registration_num = %discharge_num,
            account_id = %account_id,
            "Financing statement discharged"
        );
        Ok(request)
    }

    /// Fetch a recorded discharge of `registration_num`.
    pub async fn get_discharge(
        &self,
        registration_num: &str,
        discharge_num: &str,
    ) -> Result<StoredRegistration<DischargeStatement>> {
        self.store
            .find_discharge(registration_num, discharge_num)
            .await?
            .ok_or_else(|| ApiError::registration_not_found(discharge_num))
    }

    async fn find(&self, registration_num: &str) -> Result<StoredRegistration<FinancingStatement>> {
        self.store
            .find_financing_statement(registration_num)
            .await?
            .ok_or_else(|| ApiError::registration_not_found(registration_num))
    }
}

fn expiry_date(statement: &FinancingStatement, created: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if statement.registration_type == RegistrationType::RepairersLien {
        return Some(created + Duration::days(REPAIRERS_LIEN_DAYS));
    }
    if statement.life_infinite.unwrap_or(false) {
        return None;
    }
    statement
        .life_years
        .and_then(|years| u32::try_from(years).ok())
        .and_then(|years| created.checked_add_months(Months::new(years * 12)))
}
