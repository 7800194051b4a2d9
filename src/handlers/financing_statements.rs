//! Financing statement and discharge endpoints.
//!
//! Every handler authorizes before it reads the body or the registry.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::app_state::AppState;
use crate::auth::Permission;
use crate::auth::middleware::{AccountId, AuthenticatedUser};
use crate::database::StoredRegistration;
use crate::error::{ApiError, Result};
use crate::handlers::authorization::authorize;
use crate::models::{DischargeStatement, FinancingStatement};

/// Register a new financing statement
#[utoipa::path(
    post,
    path = "/api/v1/financing-statements",
    tag = "financing-statements",
    request_body = FinancingStatement,
    params(("Account-Id" = Option<String>, Header, description = "Account the registration is made for")),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Financing statement registered", body = FinancingStatement),
        (status = 400, description = "Invalid payload or missing account"),
        (status = 401, description = "Missing token or role not authorized")
    )
)]
pub async fn create_financing_statement(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AccountId(account_id): AccountId,
    payload: std::result::Result<Json<FinancingStatement>, JsonRejection>,
) -> Result<(StatusCode, Json<FinancingStatement>)> {
    let account_id = authorize(
        &user,
        account_id.as_deref(),
        &Permission::create_financing_statement(),
    )?;
    let Json(statement) = payload?;

    info!(user = %user.username, account_id = %account_id, "Create financing statement request");
    let created = state
        .registration_service
        .create_financing_statement(&account_id, statement)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch a financing statement by base registration number
#[utoipa::path(
    get,
    path = "/api/v1/financing-statements/{registration_num}",
    tag = "financing-statements",
    params(
        ("registration_num" = String, Path, description = "Base registration number"),
        ("Account-Id" = Option<String>, Header, description = "Account the request is made for")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Financing statement", body = FinancingStatement),
        (status = 400, description = "Registration is historical or account missing"),
        (status = 401, description = "Missing token or role not authorized"),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn get_financing_statement(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AccountId(account_id): AccountId,
    Path(registration_num): Path<String>,
) -> Result<Json<FinancingStatement>> {
    let account_id = authorize(
        &user,
        account_id.as_deref(),
        &Permission::read_financing_statement(),
    )?;

    let stored = state
        .registration_service
        .get_financing_statement(&registration_num, user.is_staff())
        .await?;

    Ok(Json(owned_by(stored, &account_id, user.is_staff())?))
}

/// Discharge an active financing statement
#[utoipa::path(
    post,
    path = "/api/v1/financing-statements/{registration_num}/discharges",
    tag = "discharges",
    request_body = DischargeStatement,
    params(
        ("registration_num" = String, Path, description = "Base registration number to discharge"),
        ("Account-Id" = Option<String>, Header, description = "Account the discharge is made for")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Discharge recorded", body = DischargeStatement),
        (status = 400, description = "Invalid payload, path mismatch, historical registration or debtor mismatch"),
        (status = 401, description = "Missing token or role not authorized"),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn create_discharge(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AccountId(account_id): AccountId,
    Path(registration_num): Path<String>,
    payload: std::result::Result<Json<DischargeStatement>, JsonRejection>,
) -> Result<Json<DischargeStatement>> {
    let account_id = authorize(&user, account_id.as_deref(), &Permission::create_discharge())?;
    let Json(request) = payload?;

    info!(
        user = %user.username,
        account_id = %account_id,
        registration_num = %registration_num,
        "Discharge request"
    );
    let discharge = state
        .registration_service
        .discharge(&registration_num, &account_id, user.is_staff(), request)
        .await?;

    Ok(Json(discharge))
}

/// Fetch a recorded discharge
#[utoipa::path(
    get,
    path = "/api/v1/financing-statements/{registration_num}/discharges/{discharge_num}",
    tag = "discharges",
    params(
        ("registration_num" = String, Path, description = "Base registration number"),
        ("discharge_num" = String, Path, description = "Discharge registration number"),
        ("Account-Id" = Option<String>, Header, description = "Account the request is made for")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Discharge", body = DischargeStatement),
        (status = 400, description = "Account missing"),
        (status = 401, description = "Missing token or role not authorized"),
        (status = 404, description = "Discharge not found")
    )
)]
pub async fn get_discharge(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AccountId(account_id): AccountId,
    Path((registration_num, discharge_num)): Path<(String, String)>,
) -> Result<Json<DischargeStatement>> {
    let account_id = authorize(&user, account_id.as_deref(), &Permission::read_discharge())?;

    let stored = state
        .registration_service
        .get_discharge(&registration_num, &discharge_num)
        .await?;

    Ok(Json(owned_by(stored, &account_id, user.is_staff())?))
}

/// Non-staff callers may only read registrations made by their own account.
fn owned_by<T>(stored: StoredRegistration<T>, account_id: &str, staff: bool) -> Result<T> {
    if staff || stored.account_id == account_id {
        Ok(stored.document)
    } else {
        Err(ApiError::role_not_authorized(Some(account_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_owned_by_rejects_other_accounts() {
        let stored = StoredRegistration {
            account_id: "PS00001".to_string(),
            document: 7,
        };
        assert_eq!(owned_by(stored.clone(), "PS00001", false).unwrap(), 7);
        assert_eq!(owned_by(stored.clone(), "PS99999", true).unwrap(), 7);

        let err = owned_by(stored, "PS99999", false).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::RoleNotAuthorized);
    }
}
