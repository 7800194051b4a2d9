//! Authorization helpers for handler endpoints.
//!
//! Every registry request is made on behalf of an account. Staff may omit
//! the account; everyone else must send one, and must then hold a role that
//! grants the requested permission.

use crate::auth::{Claims, Permission};
use crate::error::ApiError;

/// Account recorded against staff requests that arrive without one.
pub const STAFF_ACCOUNT_ID: &str = "PS12345";

/// Resolve the account a request acts for, then check the caller's roles.
///
/// The account check runs first: a non-staff caller without an account is a
/// bad request whatever roles it holds.
pub fn authorize(
    user: &Claims,
    account_id: Option<&str>,
    permission: &Permission,
) -> Result<String, ApiError> {
    let account_id = match account_id {
        Some(id) => id.to_string(),
        None if user.is_staff() => STAFF_ACCOUNT_ID.to_string(),
        None => return Err(ApiError::account_required()),
    };

    if !user.has_permission(permission) {
        return Err(ApiError::role_not_authorized(Some(&account_id)));
    }

    Ok(account_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::{COLIN_ROLE, PPR_ROLE, STAFF_ROLE};
    use crate::error::ErrorCode;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn create_test_claims(roles: &[&str]) -> Claims {
        Claims::new(
            Uuid::new_v4(),
            "test_user".to_string(),
            roles.iter().map(|r| r.to_string()).collect(),
            "test",
            3600,
        )
    }

    #[test]
    fn test_ppr_with_account_authorized() {
        let user = create_test_claims(&[PPR_ROLE]);
        let account = authorize(&user, Some("PS00001"), &Permission::create_discharge()).unwrap();
        assert_eq!(account, "PS00001");
    }

    #[test]
    fn test_non_staff_without_account_is_bad_request() {
        let user = create_test_claims(&[COLIN_ROLE]);
        let err = authorize(&user, None, &Permission::create_discharge()).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::AccountRequired);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_staff_without_account_uses_staff_account() {
        let user = create_test_claims(&[PPR_ROLE, STAFF_ROLE]);
        let account = authorize(&user, None, &Permission::create_discharge()).unwrap();
        assert_eq!(account, STAFF_ACCOUNT_ID);
    }

    #[test]
    fn test_role_without_permission_is_unauthorized() {
        let user = create_test_claims(&[COLIN_ROLE]);
        let err = authorize(&user, Some("PS00001"), &Permission::create_discharge()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
